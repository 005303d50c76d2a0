use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};
use std::time::Instant;

type Feature = fn(&mut AppState, &Action) -> UpdateResult;

const FEATURES: [Feature; 4] = [
    features::palette::update,
    features::board::update,
    features::navigation::update,
    features::preferences::update,
];

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    for feature in FEATURES {
        if let UpdateResult::Handled(command) = feature(state, &action) {
            return command;
        }
    }

    match action {
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            let now = Instant::now();
            state.toasts.retain(|t| !t.is_expired(now));
        }
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Resize(..) => {}
        other => {
            tracing::trace!(action = ?other, "unhandled action");
        }
    }
    None
}
