pub mod console;
pub mod models;
pub mod page;
