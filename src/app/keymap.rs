use super::action::Action;
use super::state::QuickViewLink;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Single-key shortcuts active while the palette is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
    /// Overrides while the quick-view panel is open.
    pub quick_view: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();
        let mut quick_view = HashMap::new();

        global.insert(key('q'), Action::Quit);
        global.insert(key('r'), Action::Reload);
        global.insert(key('t'), Action::ToggleTheme);
        global.insert(key('d'), Action::ToggleDensity);
        global.insert(key('e'), Action::ToggleEasyMode);
        global.insert(key('m'), Action::ToggleFeedMute);
        global.insert(key('/'), Action::TogglePalette);

        quick_view.insert(key('o'), Action::OpenQuickViewLink(QuickViewLink::Client));
        quick_view.insert(key('p'), Action::OpenQuickViewLink(QuickViewLink::Projects));
        quick_view.insert(key('x'), Action::CloseQuickView);

        Self { global, quick_view }
    }
}

impl KeyMap {
    #[must_use]
    pub fn get_action(&self, event: KeyEvent, quick_view_open: bool) -> Option<Action> {
        let event = normalize(event);
        if quick_view_open {
            if let Some(action) = self.quick_view.get(&event) {
                return Some(action.clone());
            }
        }
        self.global.get(&event).cloned()
    }
}

/// Ctrl+K or Super+K, in either case.
pub fn is_palette_toggle(event: &KeyEvent) -> bool {
    matches!(event.code, KeyCode::Char('k' | 'K'))
        && event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

// Terminals disagree on whether Shift accompanies an uppercase char, and
// the kind/state fields never matter for lookups.
fn normalize(event: KeyEvent) -> KeyEvent {
    let modifiers = match event.code {
        KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
        _ => event.modifiers,
    };
    KeyEvent::new(event.code, modifiers)
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
}
