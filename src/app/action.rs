use crate::app::command::Command;
use crate::app::state::QuickViewLink;
use crate::domain::models::{QuickView, SearchPayload};
use crate::domain::page::PageDocument;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Command Palette ---
    TogglePalette,                         // Ctrl/Super+K
    ClosePalette,                          // Click outside the palette
    Dismiss,                               // Esc: palette and quick view
    PaletteInput(crossterm::event::KeyEvent), // Edit the query field
    PaletteNext,                           // ArrowDown
    PalettePrev,                           // ArrowUp
    PaletteCommit,                         // Enter on the selected row
    PaletteCommitIndex(usize),             // Click on a result row
    SearchDue(u64),                        // Debounce timer fired (ticket)

    // --- Navigation ---
    Navigate(String),
    Reload,

    // --- Boards ---
    BoardPress { board: usize, card: usize },
    BoardDragMove { board: usize, lane: Option<usize> },
    BoardRelease { board: usize, lane: Option<usize> },
    /// Gesture interrupted without a drop.
    BoardCancel { board: usize },
    ScrollLane { board: usize, lane: Option<usize>, delta: isize },

    // --- Preferences ---
    ToggleTheme,
    ToggleDensity,
    ToggleEasyMode,
    ToggleFeedMute,

    // --- Quick View ---
    OpenQuickView(usize), // Index into the page's triggers
    ScrollTriggers(isize),
    OpenQuickViewLink(QuickViewLink),
    CloseQuickView,

    // --- Async Results ---
    SearchLoaded {
        generation: u64,
        query: String,
        result: Result<SearchPayload, String>,
    },
    PageLoaded {
        location: String,
        result: Result<Box<PageDocument>, String>,
    },
    LaneMoveCompleted {
        success_message: String,
        result: Result<(), String>,
    },
    QuickViewLoaded {
        client_id: String,
        data: Option<Box<QuickView>>,
    },
}
