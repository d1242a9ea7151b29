// src/engine/mod.rs — Engine adapters over externally installed coding agents

pub mod auth;
pub mod descriptor;
pub mod dirs;
pub mod registry;
pub mod sync;

use async_trait::async_trait;

use crate::engine::auth::AuthController;
use crate::engine::descriptor::EngineDescriptor;
use crate::engine::dirs::EngineDirs;
use crate::engine::sync::{ConfigSync, InstructionSync};
use crate::infra::errors::OutboardError;
use crate::infra::paths::{env_path, BootEnv};
use std::path::PathBuf;

/// Where an engine stands between "not even installed" and "ready".
/// Always computed on demand, never cached: the user installs and logs
/// in from other terminals while outboard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    NotInstalled,
    InstalledNoCredential,
    InstalledWithCredential,
}

impl std::fmt::Display for CredentialState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInstalled => write!(f, "not installed"),
            Self::InstalledNoCredential => write!(f, "not logged in"),
            Self::InstalledWithCredential => write!(f, "ready"),
        }
    }
}

/// What the auth menu offers for an engine in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMenuAction {
    Login,
    Logout,
}

impl std::fmt::Display for AuthMenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "Log in"),
            Self::Logout => write!(f, "Log out"),
        }
    }
}

/// One wrapped coding-agent CLI.
#[async_trait]
pub trait Engine: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn cli_binary(&self) -> &str;
    fn install_command(&self) -> &str;

    /// Installed on the search path. Not a credential check.
    fn is_authenticated(&self) -> bool;
    fn credential_state(&self) -> CredentialState;
    fn next_auth_menu_action(&self) -> AuthMenuAction;

    /// Where the engine's mirrored configuration lives.
    fn config_dir(&self) -> PathBuf;
    /// Where the tracked credential file lives.
    fn data_dir(&self) -> PathBuf;

    async fn ensure_auth(&self, force_login: bool) -> Result<(), OutboardError>;
    async fn clear_auth(&self) -> Result<(), OutboardError>;

    /// Engines without a shared-config location return `None`.
    fn config_sync(&self) -> Option<&dyn ConfigSync>;
}

/// Descriptor-driven implementation behind every builtin engine.
pub struct CliEngine {
    descriptor: &'static EngineDescriptor,
    auth: AuthController,
    sync: Option<InstructionSync>,
}

impl CliEngine {
    pub fn new(
        descriptor: &'static EngineDescriptor,
        home_override: Option<PathBuf>,
        env: &BootEnv,
    ) -> Self {
        let dirs = EngineDirs::resolve(descriptor.id, home_override, &env.base);
        let sync = descriptor
            .instructions_file
            .map(|name| InstructionSync::new(name, dirs.config.clone()));
        let auth = AuthController::new(descriptor, dirs, env.search_path.clone(), env.cwd.clone());
        Self {
            descriptor,
            auth,
            sync,
        }
    }

    /// Builtin construction path: the home override comes from the
    /// engine's `*_HOME` variable.
    pub fn from_descriptor(descriptor: &'static EngineDescriptor, env: &BootEnv) -> Self {
        Self::new(descriptor, env_path(descriptor.home_env), env)
    }

    pub fn auth(&self) -> &AuthController {
        &self.auth
    }
}

#[async_trait]
impl Engine for CliEngine {
    fn id(&self) -> &str {
        self.descriptor.id
    }

    fn name(&self) -> &str {
        self.descriptor.name
    }

    fn description(&self) -> &str {
        self.descriptor.description
    }

    fn cli_binary(&self) -> &str {
        self.descriptor.cli_binary
    }

    fn install_command(&self) -> &str {
        self.descriptor.install_command
    }

    fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    fn credential_state(&self) -> CredentialState {
        self.auth.credential_state()
    }

    fn next_auth_menu_action(&self) -> AuthMenuAction {
        self.auth.next_auth_menu_action()
    }

    fn config_dir(&self) -> PathBuf {
        self.auth.dirs().config.clone()
    }

    fn data_dir(&self) -> PathBuf {
        self.auth.dirs().data.clone()
    }

    async fn ensure_auth(&self, force_login: bool) -> Result<(), OutboardError> {
        self.auth.ensure_auth(force_login).await
    }

    async fn clear_auth(&self) -> Result<(), OutboardError> {
        self.auth.clear_auth().await;
        Ok(())
    }

    fn config_sync(&self) -> Option<&dyn ConfigSync> {
        self.sync.as_ref().map(|s| s as &dyn ConfigSync)
    }
}
