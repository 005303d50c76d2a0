pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod search;
pub mod theme;
