use std::fmt;

/// Immutable description of one drag-and-drop board.
///
/// The same engine drives every board; only this value differs between the
/// tasks board and the service scheduler.
#[derive(Clone)]
pub struct BoardConfig {
    pub name: &'static str,
    pub board_selector: &'static str,
    pub lane_selector: &'static str,
    pub card_selector: &'static str,
    /// Dataset key holding a card's id (`taskId` reads `data-task-id`).
    pub card_id_key: &'static str,
    /// Dataset key holding a lane's value.
    pub lane_key: &'static str,
    /// Form field the server expects the new lane value in.
    pub field_name: &'static str,
    pub endpoint: fn(&str) -> String,
    pub success_message: fn(&str) -> String,
}

impl fmt::Debug for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardConfig")
            .field("name", &self.name)
            .field("board_selector", &self.board_selector)
            .field("lane_selector", &self.lane_selector)
            .field("card_selector", &self.card_selector)
            .field("field_name", &self.field_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for BoardConfig {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.board_selector == other.board_selector
    }
}

/// `in_progress` -> `in progress`
pub fn humanize_lane(value: &str) -> String {
    value.replace('_', " ")
}

fn task_endpoint(id: &str) -> String {
    format!("/tasks/{id}/status")
}

fn task_moved(status: &str) -> String {
    format!("Task moved to {}.", humanize_lane(status))
}

fn service_endpoint(id: &str) -> String {
    format!("/service-jobs/{id}/stage")
}

fn service_moved(stage: &str) -> String {
    format!("Service moved to {}.", humanize_lane(stage))
}

pub fn task_board() -> BoardConfig {
    BoardConfig {
        name: "Tasks",
        board_selector: "[data-board=\"tasks\"]",
        lane_selector: "[data-task-lane]",
        card_selector: "[data-task-id]",
        card_id_key: "taskId",
        lane_key: "taskLane",
        field_name: "status",
        endpoint: task_endpoint,
        success_message: task_moved,
    }
}

pub fn scheduler_board() -> BoardConfig {
    BoardConfig {
        name: "Scheduler",
        board_selector: "[data-board=\"scheduler\"]",
        lane_selector: "[data-service-stage]",
        card_selector: "[data-service-id]",
        card_id_key: "serviceId",
        lane_key: "serviceStage",
        field_name: "stage",
        endpoint: service_endpoint,
        success_message: service_moved,
    }
}

/// Every board the console knows how to attach to.
#[must_use]
pub fn builtin_boards() -> Vec<BoardConfig> {
    vec![task_board(), scheduler_board()]
}
