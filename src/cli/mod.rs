// src/cli/mod.rs — CLI definition (clap derive)

pub mod auth;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "outboard",
    about = "Terminal cockpit for externally installed AI coding agents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to or out of engines (interactive menu if no subcommand)
    Auth {
        #[command(subcommand)]
        command: Option<AuthCommand>,
    },
    /// Show workspace and engine status
    Status {
        /// Include per-engine state directories
        #[arg(long)]
        verbose: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum AuthCommand {
    /// Run an engine's own interactive login
    Login {
        /// Engine id (interactive picker if omitted)
        engine: Option<String>,
    },
    /// Remove an engine's local state and credentials
    Logout {
        /// Engine id (interactive picker if omitted)
        engine: Option<String>,
    },
}
