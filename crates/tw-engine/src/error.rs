//! Error types for the turn engine.

use thiserror::Error;

use tw_core::CoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a game session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A turn was requested with an empty roster.
    #[error("no players in the game")]
    NoPlayers,

    /// A player with the same name is already in the game.
    #[error("player already in the game: {0}")]
    DuplicatePlayer(String),

    /// A turn was requested after the game ended.
    #[error("game is over; {winner} won")]
    GameOver {
        /// Name of the winning player.
        winner: String,
    },

    /// Board, player, or persistence error.
    #[error("{0}")]
    Core(#[from] CoreError),
}
