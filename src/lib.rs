pub mod core;
pub mod means;
pub mod tasks;
pub mod ui;
pub mod utils;
