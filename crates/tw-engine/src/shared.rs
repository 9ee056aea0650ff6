//! A thread-safe handle around a [`GameEngine`].
//!
//! The engine itself is single-threaded. When several threads drive one
//! session, each `take_turn` runs under one lock so the board, roster, and
//! turn index change together.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::GameEngine;
use crate::error::EngineResult;
use crate::report::TurnReport;

/// Cloneable, lock-protected access to one game session.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<GameEngine>>,
}

impl SharedEngine {
    /// Wrap an engine for shared use.
    pub fn new(engine: GameEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Take one turn while holding the lock.
    pub fn take_turn(&self) -> EngineResult<TurnReport> {
        self.lock().take_turn()
    }

    /// Read engine state while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        f(&self.lock())
    }

    /// Mutate the engine (add players, subscribe observers) under the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut GameEngine) -> R) -> R {
        f(&mut self.lock())
    }

    // A panic inside an observer poisons the lock; the engine state is
    // still whole because turns commit before observers run.
    fn lock(&self) -> MutexGuard<'_, GameEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
