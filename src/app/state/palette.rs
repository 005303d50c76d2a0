use super::input::QueryField;
use crate::search::{Category, RankedResults, SearchResultItem};
use std::time::Duration;

/// Quiet period after the last edit before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(120);
/// Delay between closing the palette and navigating to the committed item.
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(10);
pub const SKELETON_ROWS: usize = 3;

pub const UNAVAILABLE_TITLE: &str = "Search unavailable";
pub const UNAVAILABLE_HINT: &str = "Press Esc to close and refresh once.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Rendered,
    Failed,
}

/// One open palette, from open to close.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSession<'a> {
    pub input: QueryField<'a>,
    pub phase: SearchPhase,
    /// Last rendered result set. Kept while a newer search loads and stays
    /// the commit target until it is replaced.
    pub results: RankedResults,
    pub selected_index: usize,
    /// Generation of the only request whose response is still wanted.
    pub generation: u64,
    /// Ticket of the debounce timer armed by the latest edit.
    pub debounce_ticket: u64,
}

impl Default for PaletteSession<'_> {
    fn default() -> Self {
        Self {
            input: QueryField::new("Search commands, clients, projects…"),
            phase: SearchPhase::Idle,
            results: RankedResults::default(),
            selected_index: 0,
            generation: 0,
            debounce_ticket: 0,
        }
    }
}

impl PaletteSession<'_> {
    /// The trimmed query as sent to the server.
    pub fn query(&self) -> String {
        self.input.text().trim().to_string()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    pub fn selected(&self) -> Option<&SearchResultItem> {
        self.results.get(self.selected_index)
    }

    /// Wraps around both ends; a no-op on an empty list.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.results.len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index as isize + delta).rem_euclid(len as isize) as usize;
    }

    pub fn begin_search(&mut self, generation: u64) {
        self.generation = generation;
        self.phase = SearchPhase::Loading;
    }

    pub fn show_results(&mut self, results: RankedResults) {
        self.results = results;
        self.selected_index = 0;
        self.phase = SearchPhase::Rendered;
    }

    pub fn show_unavailable(&mut self) {
        self.results = unavailable_results();
        self.selected_index = 0;
        self.phase = SearchPhase::Failed;
    }
}

/// The single, non-navigable entry shown when a search fails.
pub fn unavailable_results() -> RankedResults {
    RankedResults {
        flat: vec![SearchResultItem {
            category: Category::Command,
            title: UNAVAILABLE_TITLE.to_string(),
            subtitle: UNAVAILABLE_HINT.to_string(),
            url: None,
            score: 0,
        }],
        ..RankedResults::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CommandHit, SearchPayload};
    use crate::search::rank;

    fn results(n: usize) -> RankedResults {
        let payload = SearchPayload {
            commands: Some(
                (0..n)
                    .map(|i| CommandHit {
                        title: Some(format!("Command {i}")),
                        url: Some(format!("/c/{i}")),
                    })
                    .collect(),
            ),
            clients: Some(vec![]),
            projects: None,
        };
        rank(&payload, "")
    }

    #[test]
    fn test_selection_wraps() {
        let mut session = PaletteSession::default();
        session.show_results(results(3));
        session.move_selection(-1);
        assert_eq!(session.selected_index, 2);
        session.move_selection(1);
        assert_eq!(session.selected_index, 0);
        session.move_selection(1);
        session.move_selection(1);
        session.move_selection(1);
        assert_eq!(session.selected_index, 0);
    }

    #[test]
    fn test_selection_noop_when_empty() {
        let mut session = PaletteSession::default();
        session.move_selection(1);
        session.move_selection(-1);
        assert_eq!(session.selected_index, 0);
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_new_results_reset_selection() {
        let mut session = PaletteSession::default();
        session.show_results(results(4));
        session.move_selection(2);
        session.show_results(results(2));
        assert_eq!(session.selected_index, 0);
        assert_eq!(session.phase, SearchPhase::Rendered);
    }

    #[test]
    fn test_loading_keeps_previous_commit_target() {
        let mut session = PaletteSession::default();
        session.show_results(results(2));
        session.move_selection(1);
        session.begin_search(5);
        assert!(session.is_loading());
        assert_eq!(session.selected().unwrap().title, "Command 1");
    }

    #[test]
    fn test_unavailable_is_single_non_navigable_entry() {
        let mut session = PaletteSession::default();
        session.show_unavailable();
        assert_eq!(session.phase, SearchPhase::Failed);
        assert_eq!(session.results.len(), 1);
        let item = session.selected().unwrap();
        assert_eq!(item.title, UNAVAILABLE_TITLE);
        assert!(item.target().is_none());
        assert!(session.results.rows().is_empty());
    }

    #[test]
    fn test_query_is_trimmed() {
        let mut session = PaletteSession::default();
        session.input.set_text("  acme ");
        assert_eq!(session.query(), "acme");
    }
}
