// src/engine/registry.rs — Engine registry

use crate::engine::descriptor;
use crate::engine::{CliEngine, Engine};
use crate::infra::config::Config;
use crate::infra::paths::BootEnv;

/// Registry of the engines this process knows about. Contents are fixed
/// after startup; iteration keeps registration order, which is the order
/// every menu, status line, and sync sweep uses.
pub struct EngineRegistry {
    engines: Vec<Box<dyn Engine>>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Every builtin engine except the ones disabled in config.
    pub fn builtin(env: &BootEnv, config: &Config) -> Self {
        let mut registry = Self::new();
        for desc in descriptor::BUILTIN {
            if config.engines.disabled.iter().any(|id| id == desc.id) {
                continue;
            }
            registry.register(Box::new(CliEngine::from_descriptor(desc, env)));
        }
        registry
    }

    /// Register an engine. Ids are expected to be unique.
    pub fn register(&mut self, engine: Box<dyn Engine>) {
        debug_assert!(
            self.get(engine.id()).is_none(),
            "duplicate engine id {}",
            engine.id()
        );
        self.engines.push(engine);
    }

    /// Look up an engine by id. `None` is a normal outcome surfaced to
    /// the user, never a crash.
    pub fn get(&self, id: &str) -> Option<&dyn Engine> {
        self.engines
            .iter()
            .find(|e| e.id() == id)
            .map(|b| b.as_ref())
    }

    /// All engines in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Engine> {
        self.engines.iter().map(|b| b.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }
}
