use crate::app::state::AppState;
use crate::app::ui::{side_layout, trigger_regions};
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Widget},
};

/// Activity feed above the list of quick-view triggers.
pub struct Sidebar<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;
        let layout = side_layout(area);

        let feed_title = if state.feed_muted {
            " ACTIVITY · muted "
        } else {
            " ACTIVITY "
        };
        let feed: Vec<ListItem> = state
            .visible_feed()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", glyphs::FEED), theme.feed_kind),
                    Span::styled(format!("{:<9}", row.kind), theme.feed_kind),
                    Span::styled(row.text.clone(), theme.feed_text),
                ]))
            })
            .collect();
        let feed_block = Block::default()
            .title(Span::styled(feed_title, theme.lane_title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border);
        if feed.is_empty() {
            let inner = feed_block.inner(layout.feed);
            feed_block.render(layout.feed, buf);
            if inner.height > 0 {
                buf.set_string(inner.x + 1, inner.y, "Nothing new.", theme.dimmed);
            }
        } else {
            List::new(feed).block(feed_block).render(layout.feed, buf);
        }

        let (offset, total) = state
            .page
            .as_ref()
            .map_or((0, 0), |p| (p.trigger_scroll, p.triggers.len()));
        let shown = trigger_regions(state, area).len();
        let triggers: Vec<ListItem> = state
            .page
            .iter()
            .flat_map(|p| p.triggers.iter().skip(offset))
            .map(|t| {
                let label = if t.label.is_empty() { "Client" } else { t.label.as_str() };
                ListItem::new(Span::styled(format!(" {label}"), theme.trigger))
            })
            .collect();
        let mut trigger_block = Block::default()
            .title(Span::styled(" CLIENTS ", theme.lane_title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border);
        let hidden = total.saturating_sub(offset + shown);
        if offset > 0 || hidden > 0 {
            trigger_block = trigger_block.title_bottom(Span::styled(
                format!(" ↑{offset} +{hidden} more "),
                theme.dimmed,
            ));
        }
        List::new(triggers)
            .block(trigger_block)
            .render(layout.triggers, buf);
    }
}
