// src/infra/errors.rs — Error types for outboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutboardError {
    // User-actionable: the wrapped CLI is missing from the search path.
    #[error("{name} is not installed (no `{binary}` on PATH)\n\nTo install it:\n  {install}")]
    EngineNotInstalled {
        name: String,
        binary: String,
        install: String,
    },

    #[error("unknown engine '{0}'")]
    UnknownEngine(String),

    // The binary resolved but could not be started.
    #[error("failed to launch `{binary}`: {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OutboardError {
    pub fn is_not_installed(&self) -> bool {
        matches!(self, OutboardError::EngineNotInstalled { .. })
    }
}
