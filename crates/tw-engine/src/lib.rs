//! Turn engine for Tileway board games.
//!
//! A [`GameEngine`] drives one session: it owns the board, the players in
//! turn order, and the dice, resolves one player per
//! [`take_turn`](GameEngine::take_turn), evaluates the win condition of the
//! configured [`Ruleset`], and reports every turn to registered
//! [`TurnObserver`]s.

pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod shared;

pub use config::{DEFAULT_WINNING_BALANCE, EngineConfig, Ruleset};
pub use engine::{GameEngine, TurnState};
pub use error::{EngineError, EngineResult};
pub use report::{ChannelObserver, TurnObserver, TurnReport};
pub use shared::SharedEngine;
