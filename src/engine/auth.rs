// src/engine/auth.rs — Per-engine credential lifecycle
//
// Login runs the wrapped CLI's own login subcommand attached to the
// user's terminal; outboard never sees the credential material, only
// whether `auth.json` exists and carries the engine's provider key.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use crate::engine::descriptor::EngineDescriptor;
use crate::engine::dirs::EngineDirs;
use crate::engine::{AuthMenuAction, CredentialState};
use crate::infra::errors::OutboardError;

pub const CREDENTIAL_FILE: &str = "auth.json";

/// Written after a login attempt that left no credential file behind, so
/// speculative callers stop re-running the login. Parses as an empty
/// credential set.
const SENTINEL: &str = "{}";

pub struct AuthController {
    descriptor: &'static EngineDescriptor,
    dirs: EngineDirs,
    /// PATH snapshot for binary lookups; `None` falls back to the
    /// process environment at call time.
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl AuthController {
    pub fn new(
        descriptor: &'static EngineDescriptor,
        dirs: EngineDirs,
        search_path: Option<OsString>,
        cwd: PathBuf,
    ) -> Self {
        Self {
            descriptor,
            dirs,
            search_path,
            cwd,
        }
    }

    pub fn dirs(&self) -> &EngineDirs {
        &self.dirs
    }

    // ─── Probes ─────────────────────────────────────────────────────────

    /// Full path of the engine binary, platform executable extensions
    /// included, or `None` when it is not installed.
    pub fn locate(&self) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => {
                which::which_in(self.descriptor.cli_binary, Some(paths), &self.cwd).ok()
            }
            None => which::which(self.descriptor.cli_binary).ok(),
        }
    }

    /// Installed means the binary resolves. Deliberately not a
    /// credential check.
    pub fn is_authenticated(&self) -> bool {
        self.locate().is_some()
    }

    pub fn credential_path(&self) -> PathBuf {
        self.dirs.data.join(CREDENTIAL_FILE)
    }

    /// Cheap probe: any credential file at all, sentinel included. This
    /// is what keeps speculative login attempts from repeating.
    pub fn credential_file_exists(&self) -> bool {
        self.credential_path().exists()
    }

    /// Strict probe: the file parses as a JSON object holding the
    /// engine's provider key. Anything else counts as no credential.
    pub fn has_credential(&self) -> bool {
        let path = self.credential_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return false,
        };
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Object(map)) => {
                map.contains_key(self.descriptor.credential_key)
            }
            _ => {
                tracing::debug!(
                    engine = self.descriptor.id,
                    path = %path.display(),
                    "credential file is not a JSON object, treating as absent"
                );
                false
            }
        }
    }

    pub fn credential_state(&self) -> CredentialState {
        if !self.is_authenticated() {
            CredentialState::NotInstalled
        } else if self.has_credential() {
            CredentialState::InstalledWithCredential
        } else {
            CredentialState::InstalledNoCredential
        }
    }

    /// What the auth menu should offer for this engine right now.
    pub fn next_auth_menu_action(&self) -> AuthMenuAction {
        match self.credential_state() {
            CredentialState::InstalledWithCredential => AuthMenuAction::Logout,
            CredentialState::NotInstalled | CredentialState::InstalledNoCredential => {
                AuthMenuAction::Login
            }
        }
    }

    // ─── Login / logout ─────────────────────────────────────────────────

    /// Make sure a login has at least been attempted. With
    /// `force_login` the wrapped tool's login always runs; without it an
    /// existing credential file (sentinel included) short-circuits, so
    /// the call is safe to make speculatively.
    pub async fn ensure_auth(&self, force_login: bool) -> Result<(), OutboardError> {
        if !force_login && self.credential_file_exists() {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.dirs.data).await?;

        let Some(binary) = self.locate() else {
            return Err(self.not_installed());
        };

        tracing::info!(engine = self.descriptor.id, "starting interactive login");
        let status = tokio::process::Command::new(&binary)
            .args(self.descriptor.login_command)
            .current_dir(&self.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(code) if !code.success() => {
                // The wrapped tool owns the conversation with the user;
                // a refused login is its outcome to report, not ours.
                tracing::debug!(engine = self.descriptor.id, ?code, "login exited non-zero");
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(self.not_installed()),
            Err(e) => {
                return Err(OutboardError::Launch {
                    binary: self.descriptor.cli_binary.to_string(),
                    source: e,
                })
            }
        }

        // Some tools store credentials elsewhere (keychain, their own
        // dotfile). Leave a sentinel so the attempt is remembered.
        if !self.credential_file_exists() {
            tokio::fs::write(self.credential_path(), SENTINEL).await?;
        }
        Ok(())
    }

    /// Forget everything outboard tracks for this engine. Missing
    /// directories are fine; anything else is logged and swallowed, the
    /// user asked to log out and gets logged out.
    pub async fn clear_auth(&self) {
        for root in self.dirs.removal_roots() {
            match tokio::fs::remove_dir_all(root).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        engine = self.descriptor.id,
                        path = %root.display(),
                        "could not remove state dir: {e}"
                    );
                }
            }
        }
    }

    fn not_installed(&self) -> OutboardError {
        OutboardError::EngineNotInstalled {
            name: self.descriptor.name.to_string(),
            binary: self.descriptor.cli_binary.to_string(),
            install: self.descriptor.install_command.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::paths::BaseDirs;
    use std::path::Path;

    static TEST_ENGINE: EngineDescriptor = EngineDescriptor {
        id: "testcli",
        name: "TestCLI",
        description: "fixture engine",
        cli_binary: "testcli",
        install_command: "cargo install testcli",
        login_command: &["login"],
        home_env: "TESTCLI_HOME",
        credential_key: "testcli",
        instructions_file: None,
    };

    fn controller(tmp: &Path, bin_dir: &Path) -> AuthController {
        let base = BaseDirs {
            config_home: tmp.join("cfg"),
            cache_home: tmp.join("cache"),
            data_home: tmp.join("data"),
        };
        let dirs = EngineDirs::resolve(TEST_ENGINE.id, None, &base);
        AuthController::new(
            &TEST_ENGINE,
            dirs,
            Some(bin_dir.as_os_str().to_os_string()),
            tmp.to_path_buf(),
        )
    }

    fn write_credential(ctrl: &AuthController, content: &str) {
        std::fs::create_dir_all(ctrl.dirs().data.as_path()).unwrap();
        std::fs::write(ctrl.credential_path(), content).unwrap();
    }

    #[cfg(unix)]
    fn install_fake_binary(bin_dir: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::create_dir_all(bin_dir).unwrap();
        let path = bin_dir.join(TEST_ENGINE.cli_binary);
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_state_without_binary_is_not_installed() {
        let tmp = tempfile::tempdir().unwrap();
        let empty = tmp.path().join("bin");
        std::fs::create_dir(&empty).unwrap();
        let ctrl = controller(tmp.path(), &empty);
        assert!(!ctrl.is_authenticated());
        assert_eq!(ctrl.credential_state(), CredentialState::NotInstalled);
        assert_eq!(ctrl.next_auth_menu_action(), AuthMenuAction::Login);
    }

    #[test]
    fn test_has_credential_requires_engine_key() {
        let tmp = tempfile::tempdir().unwrap();
        let ctrl = controller(tmp.path(), tmp.path());
        write_credential(&ctrl, r#"{"someone_else": {"token": "x"}}"#);
        assert!(!ctrl.has_credential());
        write_credential(&ctrl, r#"{"testcli": {"token": "x"}}"#);
        assert!(ctrl.has_credential());
    }

    #[test]
    fn test_malformed_credential_file_counts_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let ctrl = controller(tmp.path(), tmp.path());
        write_credential(&ctrl, "not json at all");
        assert!(ctrl.credential_file_exists());
        assert!(!ctrl.has_credential());
    }

    #[test]
    fn test_sentinel_is_not_a_credential() {
        let tmp = tempfile::tempdir().unwrap();
        let ctrl = controller(tmp.path(), tmp.path());
        write_credential(&ctrl, SENTINEL);
        assert!(ctrl.credential_file_exists());
        assert!(!ctrl.has_credential());
    }

    #[tokio::test]
    async fn test_ensure_auth_without_binary_fails_with_guidance() {
        let tmp = tempfile::tempdir().unwrap();
        let empty = tmp.path().join("bin");
        std::fs::create_dir(&empty).unwrap();
        let ctrl = controller(tmp.path(), &empty);
        let err = ctrl.ensure_auth(true).await.unwrap_err();
        assert!(err.is_not_installed());
        let msg = err.to_string();
        assert!(msg.contains("testcli"));
        assert!(msg.contains(TEST_ENGINE.install_command));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ensure_auth_fast_path_spawns_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("bin");
        let marker = tmp.path().join("ran");
        install_fake_binary(&bin, &format!("touch {}", marker.display()));
        let ctrl = controller(tmp.path(), &bin);
        write_credential(&ctrl, SENTINEL);

        ctrl.ensure_auth(false).await.unwrap();
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_ensure_auth_forced_always_runs_login() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("bin");
        let marker = tmp.path().join("ran");
        install_fake_binary(&bin, &format!("touch {}", marker.display()));
        let ctrl = controller(tmp.path(), &bin);
        write_credential(&ctrl, r#"{"testcli": {"token": "x"}}"#);

        ctrl.ensure_auth(true).await.unwrap();
        assert!(marker.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_login_writes_sentinel_when_tool_leaves_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("bin");
        install_fake_binary(&bin, "exit 0");
        let ctrl = controller(tmp.path(), &bin);

        ctrl.ensure_auth(true).await.unwrap();
        let content = std::fs::read_to_string(ctrl.credential_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({}));
        assert_eq!(
            ctrl.credential_state(),
            CredentialState::InstalledNoCredential
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_login_exit_code_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("bin");
        install_fake_binary(&bin, "exit 3");
        let ctrl = controller(tmp.path(), &bin);

        ctrl.ensure_auth(true).await.unwrap();
        assert!(ctrl.credential_file_exists());
    }

    #[tokio::test]
    async fn test_clear_auth_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let ctrl = controller(tmp.path(), tmp.path());
        write_credential(&ctrl, r#"{"testcli": {}}"#);

        ctrl.clear_auth().await;
        assert!(!ctrl.credential_file_exists());
        // Nothing left to remove, still fine.
        ctrl.clear_auth().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_full_lifecycle() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = tmp.path().join("bin");
        let ctrl = controller(tmp.path(), &bin);
        let cred = ctrl.credential_path();
        install_fake_binary(
            &bin,
            &format!(
                "mkdir -p {} && printf '{{\"testcli\":{{\"token\":\"t\"}}}}' > {}",
                cred.parent().unwrap().display(),
                cred.display()
            ),
        );

        assert_eq!(
            ctrl.credential_state(),
            CredentialState::InstalledNoCredential
        );
        ctrl.ensure_auth(true).await.unwrap();
        assert_eq!(
            ctrl.credential_state(),
            CredentialState::InstalledWithCredential
        );
        assert_eq!(ctrl.next_auth_menu_action(), AuthMenuAction::Logout);

        ctrl.clear_auth().await;
        assert_eq!(
            ctrl.credential_state(),
            CredentialState::InstalledNoCredential
        );
        assert_eq!(ctrl.next_auth_menu_action(), AuthMenuAction::Login);
    }
}
