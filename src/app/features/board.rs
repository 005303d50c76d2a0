use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, Toast},
};
use crate::board::DropOutcome;

pub const MOVE_FAILED: &str = "Could not update lane. Try again.";

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::BoardPress { board, card } => {
            if let Some(b) = board_mut(state, *board) {
                b.drag_start(*card);
            }
            UpdateResult::Handled(None)
        }
        Action::BoardDragMove { board, lane } => {
            if let Some(b) = board_mut(state, *board) {
                for hovered in b.hovered_lanes() {
                    if Some(hovered) != *lane {
                        b.drag_leave(hovered);
                    }
                }
                if let Some(lane) = lane {
                    b.drag_over(*lane);
                }
            }
            UpdateResult::Handled(None)
        }
        Action::BoardRelease { board, lane } => {
            let Some(b) = board_mut(state, *board) else {
                return UpdateResult::Handled(None);
            };
            let outcome = lane.map(|l| b.drop(l));
            b.drag_end();
            let board_name = b.config().name;
            match outcome {
                Some(DropOutcome::Submit(request)) => {
                    tracing::info!(
                        board = board_name,
                        endpoint = %request.endpoint,
                        value = %request.value,
                        "lane move submitted"
                    );
                    UpdateResult::Handled(Some(Command::MoveCard(request)))
                }
                Some(other) => {
                    tracing::debug!(board = board_name, outcome = ?other, "drop ignored");
                    UpdateResult::Handled(None)
                }
                None => UpdateResult::Handled(None),
            }
        }
        Action::BoardCancel { board } => {
            if let Some(b) = board_mut(state, *board) {
                tracing::debug!(board = b.config().name, "drag cancelled");
                b.drag_end();
            }
            UpdateResult::Handled(None)
        }
        Action::ScrollLane { board, lane, delta } => {
            if let Some(page) = state.page.as_mut() {
                page.scroll_lane(*board, *lane, *delta);
            }
            UpdateResult::Handled(None)
        }
        Action::LaneMoveCompleted {
            success_message,
            result,
        } => match result {
            Ok(()) => {
                state.push_toast(Toast::info(success_message.clone()));
                UpdateResult::Handled(Some(Command::LoadPage(state.location.clone())))
            }
            Err(e) => {
                tracing::warn!(error = %e, "lane move rejected");
                state.push_toast(Toast::error(MOVE_FAILED));
                UpdateResult::Handled(None)
            }
        },
        _ => UpdateResult::NotHandled,
    }
}

fn board_mut<'s>(state: &'s mut AppState, index: usize) -> Option<&'s mut crate::board::LaneBoard> {
    state.page.as_mut()?.boards.get_mut(index)
}
