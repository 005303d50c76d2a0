use super::types::{FooterGroup, FooterItem};
use crate::app::state::AppState;

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.is_palette_open() {
        return vec![FooterGroup {
            name: "SEARCH",
            items: vec![
                FooterItem::new("↑/↓", "move", "move selection"),
                FooterItem::new("Enter", "open", "open result"),
                FooterItem::new("Esc", "close", "close search"),
            ],
        }];
    }

    let mut groups = Vec::new();

    if state.quick_view.is_some() {
        groups.push(FooterGroup {
            name: "CLIENT",
            items: vec![
                FooterItem::new("o", "client", "open client"),
                FooterItem::new("p", "projects", "open projects"),
                FooterItem::new("x", "close", "close panel"),
            ],
        });
    }

    groups.push(FooterGroup {
        name: "GO",
        items: vec![
            FooterItem::new("^K", "search", "search everything"),
            FooterItem::new("r", "reload", "reload page"),
        ],
    });

    let has_feed = state.page.as_ref().is_some_and(|p| !p.feed.is_empty());
    let mut view = vec![
        FooterItem::new("t", "theme", "switch light/dark"),
        FooterItem::new("d", "density", "calm/dense cards"),
        FooterItem::new("e", "easy", "easy mode"),
    ];
    if has_feed {
        view.push(FooterItem {
            highlighted: state.feed_muted,
            ..FooterItem::new("m", "mute", "mute feed")
        });
    }
    groups.push(FooterGroup {
        name: "VIEW",
        items: view,
    });

    groups.push(FooterGroup {
        name: "APP",
        items: vec![FooterItem::new("q", "quit", "quit opsdeck")],
    });

    groups
}
