pub mod board;
pub mod footer;
pub mod header;
pub mod modals;
pub mod sidebar;
pub mod toast;
