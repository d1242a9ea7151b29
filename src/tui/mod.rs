// src/tui/mod.rs — TUI dashboard module.
//
// Single-screen engines dashboard built with ratatui. Launched by
// running `outboard` with no subcommand.

pub mod app;
pub mod theme;

pub use app::run_dashboard;
