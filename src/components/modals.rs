pub mod helpers;
pub mod palette;
pub mod quick_view;
