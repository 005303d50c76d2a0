use super::keymap::KeyMap;
use super::persistence::Preferences;
use crate::board::{builtin_boards, BoardConfig};
use crate::theme::Theme;
use std::path::PathBuf;
use std::sync::Arc;

pub mod input;
pub mod page;
pub mod palette;
pub mod quick_view;
pub mod toast;

// Re-exports
pub use input::QueryField;
pub use page::{FeedRow, PageStatus, PageView, QuickViewTrigger};
pub use palette::{PaletteSession, SearchPhase};
pub use quick_view::{QuickViewLink, QuickViewState};
pub use toast::{Toast, ToastKind};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Lifecycle ---
    pub should_quit: bool,
    pub frame_count: u64,

    // --- Console ---
    pub tenant_id: String,
    /// Location of the page shown, or being loaded.
    pub location: String,
    pub page_status: PageStatus,
    pub page: Option<PageView>,
    pub board_configs: Vec<Arc<BoardConfig>>,

    // --- Overlays ---
    /// `Some` exactly while the palette is open.
    pub palette: Option<PaletteSession<'a>>,
    pub quick_view: Option<QuickViewState>,
    pub toasts: Vec<Toast>,

    // --- Search bookkeeping (monotonic across sessions) ---
    pub search_generation: u64,
    pub debounce_ticket: u64,

    // --- Preferences ---
    pub preferences: Preferences,
    /// Where preference changes are written. `None` keeps them in memory.
    pub preferences_path: Option<PathBuf>,
    /// Mute toggle of the feed on the current page.
    pub feed_muted: bool,
    pub theme: Theme,
    pub keymap: Arc<KeyMap>,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(tenant_id: String, start_location: String, preferences: Preferences) -> Self {
        Self {
            tenant_id,
            location: start_location,
            theme: Theme::for_mode(preferences.theme),
            preferences,
            ..Default::default()
        }
    }

    pub fn is_palette_open(&self) -> bool {
        self.palette.is_some()
    }

    /// Feed rows not hidden by the tenant's muted set.
    pub fn visible_feed(&self) -> impl Iterator<Item = &FeedRow> {
        self.page.iter().flat_map(|p| p.feed.iter()).filter(|row| {
            row.id
                .as_deref()
                .map_or(true, |id| !self.preferences.is_muted(&self.tenant_id, id))
        })
    }

    /// Index of the board with a drag gesture in progress.
    pub fn dragging_board(&self) -> Option<usize> {
        self.page
            .as_ref()?
            .boards
            .iter()
            .position(|b| b.dragged_card().is_some())
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            frame_count: 0,
            tenant_id: String::new(),
            location: "/".to_string(),
            page_status: PageStatus::Loading,
            page: None,
            board_configs: builtin_boards().into_iter().map(Arc::new).collect(),
            palette: None,
            quick_view: None,
            toasts: Vec::new(),
            search_generation: 0,
            debounce_ticket: 0,
            preferences: Preferences::default(),
            preferences_path: None,
            feed_muted: false,
            theme: Theme::default(),
            keymap: Arc::new(KeyMap::default()),
        }
    }
}
