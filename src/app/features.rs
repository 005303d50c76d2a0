pub mod board;
pub mod console;
pub mod navigation;
pub mod palette;
pub mod preferences;
