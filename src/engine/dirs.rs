// src/engine/dirs.rs — Per-engine state directory resolution

use std::path::{Path, PathBuf};

use crate::infra::paths::BaseDirs;

/// Resolved config/cache/data locations for one engine.
#[derive(Debug, Clone)]
pub struct EngineDirs {
    pub config: PathBuf,
    pub cache: PathBuf,
    pub data: PathBuf,
    /// Set when a home override pinned everything under one root.
    override_root: Option<PathBuf>,
}

impl EngineDirs {
    /// The engine's `*_HOME` override wins and redirects all three
    /// locations under one root, never partially. Without it, each
    /// location independently falls back to the platform base directory
    /// suffixed with the engine id.
    pub fn resolve(id: &str, home_override: Option<PathBuf>, base: &BaseDirs) -> Self {
        match home_override {
            Some(root) => Self {
                config: root.join("config"),
                cache: root.join("cache"),
                data: root.join("data"),
                override_root: Some(root),
            },
            None => Self {
                config: base.config_home.join(id),
                cache: base.cache_home.join(id),
                data: base.data_home.join(id),
                override_root: None,
            },
        }
    }

    /// Directories removed wholesale on logout: the override root alone
    /// when one is set, else each of the three locations.
    pub fn removal_roots(&self) -> Vec<&Path> {
        match &self.override_root {
            Some(root) => vec![root.as_path()],
            None => vec![&self.config, &self.cache, &self.data],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(tmp: &Path) -> BaseDirs {
        BaseDirs {
            config_home: tmp.join("cfg"),
            cache_home: tmp.join("cache"),
            data_home: tmp.join("data"),
        }
    }

    #[test]
    fn test_override_redirects_all_three() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("crush-home");
        let dirs = EngineDirs::resolve("crush", Some(root.clone()), &base(tmp.path()));
        assert_eq!(dirs.config, root.join("config"));
        assert_eq!(dirs.cache, root.join("cache"));
        assert_eq!(dirs.data, root.join("data"));
    }

    #[test]
    fn test_override_has_single_removal_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("crush-home");
        let dirs = EngineDirs::resolve("crush", Some(root.clone()), &base(tmp.path()));
        assert_eq!(dirs.removal_roots(), vec![root.as_path()]);
    }

    #[test]
    fn test_base_dirs_suffixed_with_engine_id() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = EngineDirs::resolve("opencode", None, &base(tmp.path()));
        assert_eq!(dirs.config, tmp.path().join("cfg").join("opencode"));
        assert_eq!(dirs.cache, tmp.path().join("cache").join("opencode"));
        assert_eq!(dirs.data, tmp.path().join("data").join("opencode"));
    }

    #[test]
    fn test_no_override_removes_each_location() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = EngineDirs::resolve("opencode", None, &base(tmp.path()));
        let roots = dirs.removal_roots();
        assert_eq!(roots.len(), 3);
        assert!(roots.contains(&dirs.config.as_path()));
        assert!(roots.contains(&dirs.cache.as_path()));
        assert!(roots.contains(&dirs.data.as_path()));
    }
}
