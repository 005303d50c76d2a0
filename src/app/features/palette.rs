use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{palette::NAVIGATE_DELAY, AppState, PaletteSession},
};
use crate::search::rank;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::TogglePalette => {
            if state.palette.is_some() {
                close_palette(state);
                UpdateResult::Handled(None)
            } else {
                UpdateResult::Handled(Some(open_palette(state)))
            }
        }
        Action::ClosePalette => {
            close_palette(state);
            UpdateResult::Handled(None)
        }
        Action::Dismiss => {
            close_palette(state);
            state.quick_view = None;
            UpdateResult::Handled(None)
        }
        Action::PaletteInput(key) => {
            let Some(session) = state.palette.as_mut() else {
                return UpdateResult::Handled(None);
            };
            if !session.input.edit(*key) {
                return UpdateResult::Handled(None);
            }
            state.debounce_ticket += 1;
            session.debounce_ticket = state.debounce_ticket;
            UpdateResult::Handled(Some(Command::ScheduleSearch(state.debounce_ticket)))
        }
        Action::SearchDue(ticket) => {
            let due = state
                .palette
                .as_ref()
                .is_some_and(|s| s.debounce_ticket == *ticket);
            if !due {
                tracing::trace!(ticket, "ignoring superseded search timer");
                return UpdateResult::Handled(None);
            }
            UpdateResult::Handled(begin_search(state))
        }
        Action::SearchLoaded {
            generation,
            query,
            result,
        } => {
            let Some(session) = state.palette.as_mut() else {
                tracing::debug!(generation, "search response after palette closed, discarded");
                return UpdateResult::Handled(None);
            };
            if session.generation != *generation {
                tracing::debug!(
                    generation,
                    current = session.generation,
                    "stale search response discarded"
                );
                return UpdateResult::Handled(None);
            }
            match result {
                Ok(payload) => session.show_results(rank(payload, query)),
                Err(e) => {
                    tracing::warn!(error = %e, query = %query, "search failed");
                    session.show_unavailable();
                }
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteNext => {
            if let Some(session) = state.palette.as_mut() {
                session.move_selection(1);
            }
            UpdateResult::Handled(None)
        }
        Action::PalettePrev => {
            if let Some(session) = state.palette.as_mut() {
                session.move_selection(-1);
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteCommit => {
            let index = state.palette.as_ref().map(|s| s.selected_index);
            UpdateResult::Handled(index.and_then(|i| commit(state, i)))
        }
        Action::PaletteCommitIndex(index) => UpdateResult::Handled(commit(state, *index)),
        _ => UpdateResult::NotHandled,
    }
}

/// Opens a fresh session and asks for the unfiltered result set.
fn open_palette(state: &mut AppState) -> Command {
    if let Some(page) = state.page.as_mut() {
        page.end_gestures();
    }
    state.palette = Some(PaletteSession::default());
    state.search_generation += 1;
    let generation = state.search_generation;
    if let Some(session) = state.palette.as_mut() {
        session.begin_search(generation);
    }
    Command::Search {
        generation,
        query: String::new(),
    }
}

pub fn close_palette(state: &mut AppState) {
    if state.palette.take().is_some() {
        tracing::trace!("palette closed");
    }
}

fn begin_search(state: &mut AppState) -> Option<Command> {
    let session = state.palette.as_mut()?;
    state.search_generation += 1;
    session.begin_search(state.search_generation);
    let query = session.query();
    tracing::debug!(generation = state.search_generation, query = %query, "search issued");
    Some(Command::Search {
        generation: state.search_generation,
        query,
    })
}

/// Closes the palette and schedules navigation to the item at `index`.
///
/// With no item at `index` the palette stays open; an item without a URL
/// only closes it.
fn commit(state: &mut AppState, index: usize) -> Option<Command> {
    let session = state.palette.as_ref()?;
    let item = session.results.get(index)?;
    let target = item.target().map(str::to_string);
    close_palette(state);
    target.map(|url| Command::NavigateAfter(url, NAVIGATE_DELAY))
}
