mod app;
mod config;
mod console;
mod effects;
mod ui;

pub use app::run_app;
