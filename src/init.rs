// src/init.rs — Fire-and-forget startup work
//
// Everything here happens behind the UI: first-run workspace bootstrap
// and the instructions sweep across engines. Nothing joins the task and
// nothing in it may take the session down.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::engine::registry::EngineRegistry;
use crate::engine::sync::{ConfigSync, INSTRUCTIONS_FILE};
use crate::engine::Engine;
use crate::infra::config::Config;
use crate::infra::paths;

/// Kick off background initialization and return immediately.
pub fn start(cwd: PathBuf, config: Config, registry: Arc<EngineRegistry>) {
    tokio::spawn(async move {
        if let Err(e) = run(&cwd, &config, &registry).await {
            tracing::warn!("background init failed: {e:#}");
        }
    });
}

/// The awaitable body of the background task.
pub async fn run(cwd: &Path, config: &Config, registry: &EngineRegistry) -> anyhow::Result<()> {
    let root = paths::resolve_root(cwd);
    if !root.exists() {
        bootstrap_workspace(&root).await?;
    }

    if config.init.sync_on_start {
        sync_engines(registry, &root).await;
    }
    Ok(())
}

/// First run in this directory: lay down the workspace skeleton. Only
/// called when the root is absent, so user edits are never revisited.
async fn bootstrap_workspace(root: &Path) -> anyhow::Result<()> {
    tracing::info!(root = %root.display(), "bootstrapping workspace");
    tokio::fs::create_dir_all(root.join("state")).await?;

    let instructions = include_str!("../templates/AGENTS.md");
    tokio::fs::write(root.join(INSTRUCTIONS_FILE), instructions).await?;

    let defaults = toml::to_string_pretty(&Config::default())?;
    tokio::fs::write(root.join(Config::FILE_NAME), defaults).await?;
    Ok(())
}

/// Sequential on purpose: engines sync one at a time, in registration
/// order, and one engine's failure never blocks the ones after it.
async fn sync_engines(registry: &EngineRegistry, root: &Path) {
    for engine in registry.all() {
        let Some(sync) = engine.config_sync() else {
            continue;
        };
        if !engine.is_authenticated() {
            tracing::debug!(engine = engine.id(), "not installed, skipping config sync");
            continue;
        }
        if let Err(e) = sync.sync(root).await {
            tracing::warn!(engine = engine.id(), "config sync failed: {e:#}");
        }
    }
}
