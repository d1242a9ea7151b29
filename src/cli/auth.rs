// src/cli/auth.rs — Engine login / logout flows
//
// Everything here ends in exit code 0: an engine that is missing, a
// cancelled picker, or a refused login are outcomes to report, not
// crashes. The login conversation itself belongs to the wrapped tool.

use crate::cli::AuthCommand;
use crate::engine::registry::EngineRegistry;
use crate::engine::{AuthMenuAction, CredentialState, Engine};
use crate::infra::errors::OutboardError;

/// Handle `outboard auth [login|logout] [engine]`.
pub async fn run(command: Option<AuthCommand>, registry: &EngineRegistry) -> anyhow::Result<()> {
    match command {
        Some(AuthCommand::Login { engine }) => run_login(engine.as_deref(), registry).await,
        Some(AuthCommand::Logout { engine }) => run_logout(engine.as_deref(), registry).await,
        None => run_menu(registry).await,
    }
}

/// Combined menu: one entry per engine, labeled with whichever action
/// fits its current state.
async fn run_menu(registry: &EngineRegistry) -> anyhow::Result<()> {
    if registry.is_empty() {
        println!("No engines enabled.");
        return Ok(());
    }

    let entries: Vec<(&dyn Engine, AuthMenuAction)> = registry
        .all()
        .map(|engine| (engine, engine.next_auth_menu_action()))
        .collect();
    let display: Vec<String> = entries
        .iter()
        .map(|(engine, action)| {
            format!(
                "{:<8} {:<10} ({})",
                action.to_string(),
                engine.name(),
                engine.credential_state()
            )
        })
        .collect();

    let Some(choice) = inquire::Select::new("Engine:", display.clone()).prompt_skippable()? else {
        println!("Cancelled.");
        return Ok(());
    };
    let idx = display.iter().position(|d| d == &choice).unwrap_or(0);
    let (engine, action) = entries[idx];

    match action {
        AuthMenuAction::Login => login_engine(engine).await,
        AuthMenuAction::Logout => logout_engine(engine).await,
    }
}

async fn run_login(id: Option<&str>, registry: &EngineRegistry) -> anyhow::Result<()> {
    match pick_engine(id, registry, "Log in to:")? {
        Some(engine) => login_engine(engine).await,
        None => Ok(()),
    }
}

async fn run_logout(id: Option<&str>, registry: &EngineRegistry) -> anyhow::Result<()> {
    match pick_engine(id, registry, "Log out of:")? {
        Some(engine) => logout_engine(engine).await,
        None => Ok(()),
    }
}

/// Resolve a positional id, or fall back to an interactive picker.
/// `Ok(None)` means "nothing to do": unknown id (already reported) or a
/// cancelled prompt.
fn pick_engine<'a>(
    id: Option<&str>,
    registry: &'a EngineRegistry,
    prompt: &str,
) -> anyhow::Result<Option<&'a dyn Engine>> {
    if registry.is_empty() {
        println!("No engines enabled.");
        return Ok(None);
    }

    if let Some(id) = id {
        if let Some(engine) = registry.get(id) {
            return Ok(Some(engine));
        }
        eprintln!("{}", OutboardError::UnknownEngine(id.to_string()));
        eprintln!();
        eprintln!("Available engines:");
        for engine in registry.all() {
            eprintln!("  {:<10} {}", engine.id(), engine.description());
        }
        return Ok(None);
    }

    let display: Vec<String> = registry
        .all()
        .map(|engine| {
            format!(
                "{:<10} {} ({})",
                engine.id(),
                engine.description(),
                engine.credential_state()
            )
        })
        .collect();
    let Some(choice) = inquire::Select::new(prompt, display.clone()).prompt_skippable()? else {
        println!("Cancelled.");
        return Ok(None);
    };
    let idx = display.iter().position(|d| d == &choice).unwrap_or(0);
    Ok(registry.all().nth(idx))
}

async fn login_engine(engine: &dyn Engine) -> anyhow::Result<()> {
    println!("Handing over to {}...", engine.name());
    println!();

    // Explicit user request: always re-run the tool's login.
    match engine.ensure_auth(true).await {
        Ok(()) => {
            println!();
            match engine.credential_state() {
                CredentialState::InstalledWithCredential => {
                    println!("{} is ready.", engine.name());
                }
                _ => {
                    println!(
                        "Login finished. {} keeps its credentials elsewhere, so outboard \
                         only recorded the attempt.",
                        engine.name()
                    );
                }
            }
        }
        Err(e) => {
            eprintln!("{e}");
        }
    }
    Ok(())
}

async fn logout_engine(engine: &dyn Engine) -> anyhow::Result<()> {
    engine.clear_auth().await?;
    println!("Logged out of {}. Local engine state removed.", engine.name());
    Ok(())
}
