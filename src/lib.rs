// src/lib.rs — Library root for Outboard

pub mod cli;
pub mod engine;
pub mod infra;
pub mod init;
pub mod tui;
