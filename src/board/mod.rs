//! Configuration-driven drag-and-drop lane boards.

pub mod config;
pub mod engine;

pub use config::{builtin_boards, humanize_lane, BoardConfig};
pub use engine::{attach_all, Card, DragSession, DropOutcome, Lane, LaneBoard};
