// src/main.rs — Outboard entry point

use clap::Parser;

use outboard::cli::{Cli, Commands};
use outboard::engine::registry::EngineRegistry;
use outboard::infra::config::Config;
use outboard::infra::logger;
use outboard::infra::paths::{self, BootEnv};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG / OUTBOARD_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env = BootEnv::capture()?;
    let root = paths::resolve_root(&env.cwd);

    // Load config (falls back to defaults if no config.toml)
    let config = Config::load(&root)?;
    let registry = Arc::new(EngineRegistry::builtin(&env, &config));

    // Dispatch subcommands; none of them touch the workspace on disk
    match cli.command {
        Some(Commands::Auth { command }) => {
            return outboard::cli::auth::run(command, &registry).await;
        }
        Some(Commands::Status { verbose }) => {
            return outboard::cli::status::run(verbose, &registry, &root);
        }
        None => {}
    }

    // Default path bootstraps a workspace, so refuse to run from the
    // home directory itself.
    if let Some(ref home) = env.home {
        if paths::is_home_directory(&env.cwd, home) {
            eprintln!("Refusing to run in your home directory.");
            eprintln!("Start outboard from a project directory instead.");
            std::process::exit(1);
        }
    }

    // Workspace bootstrap and engine config sync happen off the hot
    // path; the dashboard comes up immediately.
    outboard::init::start(env.cwd.clone(), config.clone(), Arc::clone(&registry));

    outboard::tui::run_dashboard(&registry, &root, &config)
}
