//! Error types for the board, tile, player, and dice model.

use crate::tile::TileId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or mutating game state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The board topology or board file is invalid.
    #[error("malformed board: {0}")]
    MalformedBoard(String),

    /// A lookup or teleport referenced a tile that is not on the board.
    #[error("unknown tile: {0}")]
    UnknownTile(TileId),

    /// A value rejected at construction time.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the rejected field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Reading or writing persisted state failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
