// src/engine/sync.rs — Mirror workspace instructions into engine config dirs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Shared instructions file at the workspace root.
pub const INSTRUCTIONS_FILE: &str = "AGENTS.md";

/// First line of every file outboard writes on an engine's behalf.
/// Its absence marks a user-owned file we must not touch.
const MANAGED_BANNER: &str =
    "<!-- Managed by outboard. Edit AGENTS.md in your workspace instead. -->";

/// Engine capability: push shared workspace configuration into the
/// engine's own config location. Implementations are idempotent, so a
/// partial run heals on the next sweep.
#[async_trait]
pub trait ConfigSync: Send + Sync {
    async fn sync(&self, workspace_root: &Path) -> anyhow::Result<()>;
}

/// Mirrors `<workspace root>/AGENTS.md` to `<config dir>/<target name>`
/// under a managed banner.
pub struct InstructionSync {
    target_name: &'static str,
    config_dir: PathBuf,
}

impl InstructionSync {
    pub fn new(target_name: &'static str, config_dir: PathBuf) -> Self {
        Self {
            target_name,
            config_dir,
        }
    }

    pub fn target_path(&self) -> PathBuf {
        self.config_dir.join(self.target_name)
    }
}

#[async_trait]
impl ConfigSync for InstructionSync {
    async fn sync(&self, workspace_root: &Path) -> anyhow::Result<()> {
        let source = workspace_root.join(INSTRUCTIONS_FILE);
        let content = match tokio::fs::read_to_string(&source).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let rendered = format!("{MANAGED_BANNER}\n\n{content}");

        let target = self.target_path();
        if let Ok(existing) = tokio::fs::read_to_string(&target).await {
            if !existing.starts_with(MANAGED_BANNER) {
                tracing::warn!(
                    path = %target.display(),
                    "instructions file exists but is not managed, leaving it alone"
                );
                return Ok(());
            }
            if existing == rendered {
                return Ok(());
            }
        }

        tokio::fs::create_dir_all(&self.config_dir).await?;
        tokio::fs::write(&target, rendered).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, PathBuf, InstructionSync) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("workspace");
        std::fs::create_dir(&root).unwrap();
        let sync = InstructionSync::new("AGENTS.md", tmp.path().join("engine-config"));
        (tmp, root, sync)
    }

    #[tokio::test]
    async fn test_missing_source_is_a_noop() {
        let (_tmp, root, sync) = fixture();
        sync.sync(&root).await.unwrap();
        assert!(!sync.target_path().exists());
    }

    #[tokio::test]
    async fn test_writes_banner_and_content() {
        let (_tmp, root, sync) = fixture();
        std::fs::write(root.join(INSTRUCTIONS_FILE), "Prefer small commits.\n").unwrap();

        sync.sync(&root).await.unwrap();
        let written = std::fs::read_to_string(sync.target_path()).unwrap();
        assert!(written.starts_with(MANAGED_BANNER));
        assert!(written.contains("Prefer small commits."));
    }

    #[tokio::test]
    async fn test_updates_stale_copy() {
        let (_tmp, root, sync) = fixture();
        std::fs::write(root.join(INSTRUCTIONS_FILE), "v1\n").unwrap();
        sync.sync(&root).await.unwrap();

        std::fs::write(root.join(INSTRUCTIONS_FILE), "v2\n").unwrap();
        sync.sync(&root).await.unwrap();
        let written = std::fs::read_to_string(sync.target_path()).unwrap();
        assert!(written.contains("v2"));
        assert!(!written.contains("v1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_up_to_date_copy_is_not_rewritten() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, root, sync) = fixture();
        std::fs::write(root.join(INSTRUCTIONS_FILE), "stable\n").unwrap();
        sync.sync(&root).await.unwrap();

        // A second sweep must leave the file untouched; read-only would
        // make any rewrite fail loudly.
        let target = sync.target_path();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o444)).unwrap();
        sync.sync(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_never_clobbers_user_owned_file() {
        let (_tmp, root, sync) = fixture();
        std::fs::write(root.join(INSTRUCTIONS_FILE), "ours\n").unwrap();
        std::fs::create_dir_all(sync.target_path().parent().unwrap()).unwrap();
        std::fs::write(sync.target_path(), "hand-written notes\n").unwrap();

        sync.sync(&root).await.unwrap();
        let kept = std::fs::read_to_string(sync.target_path()).unwrap();
        assert_eq!(kept, "hand-written notes\n");
    }
}
