// src/cli/status.rs — Workspace and engine status display

use std::path::Path;

use crate::engine::registry::EngineRegistry;
use crate::engine::{CredentialState, Engine};
use crate::infra::config::Config;
use crate::infra::paths;

/// Display workspace and engine status.
pub fn run(verbose: bool, registry: &EngineRegistry, root: &Path) -> anyhow::Result<()> {
    println!("outboard v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Workspace
    if root.exists() {
        let legacy = root.file_name().and_then(|n| n.to_str()) == Some(paths::LEGACY_ROOT_DIR);
        if legacy {
            println!("  Workspace:  {} (legacy layout)", root.display());
        } else {
            println!("  Workspace:  {}", root.display());
        }
    } else {
        println!("  Workspace:  {} (not initialized)", root.display());
    }

    // Config
    let config_path = root.join(Config::FILE_NAME);
    if config_path.exists() {
        println!("  Config:     {} (loaded)", config_path.display());
    } else {
        println!("  Config:     (using defaults)");
    }

    // Engines
    println!();
    println!("  Engines:");
    if registry.is_empty() {
        println!("    (all disabled)");
    }
    for engine in registry.all() {
        let state = engine.credential_state();
        let marker = match state {
            CredentialState::InstalledWithCredential => "+",
            CredentialState::InstalledNoCredential => "~",
            CredentialState::NotInstalled => "-",
        };
        println!("    [{marker}] {:<10} {state}", engine.name());
        if state == CredentialState::NotInstalled {
            println!("        install: {}", engine.install_command());
        }
        if verbose {
            println!("        config:  {}", engine.config_dir().display());
            println!("        data:    {}", engine.data_dir().display());
        }
    }

    Ok(())
}
