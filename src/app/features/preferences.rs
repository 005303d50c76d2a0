use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    persistence::{Preferences, ThemeMode},
    state::{AppState, Toast},
};
use crate::theme::Theme;
use std::collections::BTreeSet;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    let (prefs, message) = match action {
        Action::ToggleTheme => {
            let theme = state.preferences.theme.toggled();
            let message = match theme {
                ThemeMode::Light => "Light mode enabled.",
                ThemeMode::Dark => "Dark mode enabled.",
            };
            (state.preferences.with_theme(theme), message.to_string())
        }
        Action::ToggleDensity => {
            let density = state.preferences.density.toggled();
            (
                state.preferences.with_density(density),
                format!("Density set to {}.", density.label()),
            )
        }
        Action::ToggleEasyMode => {
            let easy_mode = !state.preferences.easy_mode;
            let message = if easy_mode {
                "Easy Mode enabled."
            } else {
                "Easy Mode disabled."
            };
            (state.preferences.with_easy_mode(easy_mode), message.to_string())
        }
        Action::ToggleFeedMute => match toggle_feed_mute(state) {
            Some(change) => change,
            None => return UpdateResult::Handled(None),
        },
        _ => return UpdateResult::NotHandled,
    };

    apply(state, prefs);
    state.push_toast(Toast::info(message));
    UpdateResult::Handled(Some(Command::SavePreferences(state.preferences.clone())))
}

fn toggle_feed_mute(state: &mut AppState) -> Option<(Preferences, String)> {
    let page = state.page.as_ref()?;
    if page.feed.is_empty() {
        return None;
    }
    if state.feed_muted {
        state.feed_muted = false;
        let prefs = state
            .preferences
            .with_muted_feeds(&state.tenant_id, BTreeSet::new());
        return Some((prefs, "Feed unmuted.".to_string()));
    }

    let mut muted = state
        .preferences
        .muted_for(&state.tenant_id)
        .cloned()
        .unwrap_or_default();
    muted.extend(page.feed.iter().filter_map(|row| row.id.clone()));
    state.feed_muted = true;
    let prefs = state.preferences.with_muted_feeds(&state.tenant_id, muted);
    Some((prefs, "Feed muted and saved.".to_string()))
}

fn apply(state: &mut AppState, prefs: Preferences) {
    if prefs.theme != state.theme.mode {
        state.theme = Theme::for_mode(prefs.theme);
    }
    tracing::debug!(
        theme = ?prefs.theme,
        density = prefs.density.label(),
        easy_mode = prefs.easy_mode,
        "preferences changed"
    );
    state.preferences = prefs;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::persistence::Density;
    use crate::app::state::PageView;
    use crate::domain::page::PageBuilder;

    fn saved(result: UpdateResult) -> Preferences {
        match result {
            UpdateResult::Handled(Some(Command::SavePreferences(p))) => p,
            other => panic!("expected save, got {other:?}"),
        }
    }

    fn with_feed() -> AppState<'static> {
        let mut b = PageBuilder::new("/");
        b.leaf("li", &[("data-feed-kind", "task"), ("data-feed-id", "f1")], "Task done");
        b.leaf("li", &[("data-feed-kind", "billing"), ("data-feed-id", "f2")], "Invoice");
        b.leaf("li", &[("data-feed-kind", "note")], "No id");
        let mut state = AppState {
            tenant_id: "3".to_string(),
            ..AppState::default()
        };
        state.page = Some(PageView::build(b.finish(), &state.board_configs));
        state
    }

    #[test]
    fn test_toggle_theme_rebuilds_styles() {
        let mut state = AppState::default();
        let prefs = saved(update(&mut state, &Action::ToggleTheme));
        assert_eq!(prefs.theme, ThemeMode::Light);
        assert_eq!(state.theme.mode, ThemeMode::Light);
        assert_eq!(state.toasts[0].message, "Light mode enabled.");

        update(&mut state, &Action::ToggleTheme);
        assert_eq!(state.theme.mode, ThemeMode::Dark);
        assert_eq!(state.toasts[1].message, "Dark mode enabled.");
    }

    #[test]
    fn test_toggle_density_and_easy_mode() {
        let mut state = AppState::default();
        let prefs = saved(update(&mut state, &Action::ToggleDensity));
        assert_eq!(prefs.density, Density::Dense);
        assert_eq!(state.toasts[0].message, "Density set to Dense.");

        let prefs = saved(update(&mut state, &Action::ToggleEasyMode));
        assert!(prefs.easy_mode);
        assert_eq!(prefs.density, Density::Dense);
        assert_eq!(state.toasts[1].message, "Easy Mode enabled.");
        update(&mut state, &Action::ToggleEasyMode);
        assert_eq!(state.toasts[2].message, "Easy Mode disabled.");
    }

    #[test]
    fn test_mute_merges_visible_ids() {
        let mut state = with_feed();
        state.preferences = state
            .preferences
            .with_muted_feeds("3", ["old".to_string()].into());

        let prefs = saved(update(&mut state, &Action::ToggleFeedMute));
        let muted: Vec<_> = prefs.muted_for("3").unwrap().iter().cloned().collect();
        assert_eq!(muted, vec!["f1", "f2", "old"]);
        assert!(state.feed_muted);
        assert_eq!(state.toasts[0].message, "Feed muted and saved.");

        let visible: Vec<_> = state.visible_feed().map(|r| r.text.clone()).collect();
        assert_eq!(visible, vec!["No id"]);
    }

    #[test]
    fn test_unmute_clears_tenant_set() {
        let mut state = with_feed();
        update(&mut state, &Action::ToggleFeedMute);
        let prefs = saved(update(&mut state, &Action::ToggleFeedMute));
        assert!(prefs.muted_for("3").is_none());
        assert!(!state.feed_muted);
        assert_eq!(state.toasts[1].message, "Feed unmuted.");
        assert_eq!(state.visible_feed().count(), 3);
    }

    #[test]
    fn test_mute_without_feed_is_noop() {
        let mut state = AppState::default();
        let result = update(&mut state, &Action::ToggleFeedMute);
        assert!(matches!(result, UpdateResult::Handled(None)));
        assert!(state.toasts.is_empty());
    }
}
