use crate::app::persistence::Preferences;
use crate::domain::models::LaneMoveRequest;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// (Re)arm the search debounce timer.
    ScheduleSearch(u64),
    Search { generation: u64, query: String },
    LoadPage(String),
    /// Navigate once the delay has passed.
    NavigateAfter(String, Duration),
    MoveCard(LaneMoveRequest),
    LoadQuickView(String),
    SavePreferences(Preferences),
}
