// src/infra/paths.rs — Workspace root resolution and the boot environment
//
// The workspace root is `.outboard/` under the working directory, falling
// back to a pre-rename `.skiff/` when only that exists. Resolution never
// touches the filesystem beyond existence checks; creation is the
// background initializer's job.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Workspace state directory under the working directory.
pub const ROOT_DIR: &str = ".outboard";

/// Pre-rename state directory, still honored for existing workspaces.
pub const LEGACY_ROOT_DIR: &str = ".skiff";

/// Overrides the working directory for the whole process.
pub const WORKDIR_ENV: &str = "OUTBOARD_CWD";

/// Reads an environment variable as a path. Empty values count as unset.
pub fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolves the workspace root for `cwd`: `.outboard/` if present, else
/// `.skiff/` if present, else `.outboard/` whether or not it exists yet.
pub fn resolve_root(cwd: &Path) -> PathBuf {
    let current = cwd.join(ROOT_DIR);
    if current.exists() {
        return current;
    }
    let legacy = cwd.join(LEGACY_ROOT_DIR);
    if legacy.exists() {
        return legacy;
    }
    current
}

/// True when `target` and `home` name the same directory after resolving
/// symlinks. Either path failing to canonicalize means "not home": a
/// missing target is a valid first run, not a reason to refuse.
pub fn is_home_directory(target: &Path, home: &Path) -> bool {
    match (std::fs::canonicalize(target), std::fs::canonicalize(home)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Platform base directories for per-engine state, XDG variables first.
#[derive(Debug, Clone)]
pub struct BaseDirs {
    pub config_home: PathBuf,
    pub cache_home: PathBuf,
    pub data_home: PathBuf,
}

impl BaseDirs {
    fn capture() -> anyhow::Result<Self> {
        Ok(Self {
            config_home: env_path("XDG_CONFIG_HOME")
                .or_else(dirs::config_dir)
                .context("could not determine a config directory")?,
            cache_home: env_path("XDG_CACHE_HOME")
                .or_else(dirs::cache_dir)
                .context("could not determine a cache directory")?,
            data_home: env_path("XDG_DATA_HOME")
                .or_else(dirs::data_local_dir)
                .context("could not determine a data directory")?,
        })
    }
}

/// Snapshot of the process environment, taken once at boot and threaded
/// into everything that would otherwise read globals.
#[derive(Debug, Clone)]
pub struct BootEnv {
    /// Effective working directory, honoring `OUTBOARD_CWD`.
    pub cwd: PathBuf,
    /// User home, when the platform can name one.
    pub home: Option<PathBuf>,
    pub base: BaseDirs,
    /// `PATH` as seen at boot, for engine binary lookups.
    pub search_path: Option<OsString>,
}

impl BootEnv {
    pub fn capture() -> anyhow::Result<Self> {
        let cwd = match env_path(WORKDIR_ENV) {
            Some(dir) => dir,
            None => std::env::current_dir().context("could not determine the working directory")?,
        };
        Ok(Self {
            cwd,
            home: dirs::home_dir(),
            base: BaseDirs::capture()?,
            search_path: std::env::var_os("PATH"),
        })
    }
}
