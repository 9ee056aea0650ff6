//! Persistence interfaces the engine depends on.
//!
//! Implementations live outside the core (see the `tw-store` crate). The
//! engine only calls them when a session is restored or explicitly saved.

use std::io::{Read, Write};

use crate::board::Board;
use crate::error::CoreResult;
use crate::player::Player;

/// Reads a board from a byte source.
pub trait BoardReader {
    /// Parse a complete board, links and actions included.
    fn read(&self, source: &mut dyn Read) -> CoreResult<Board>;
}

/// Writes a board to a byte sink.
pub trait BoardWriter {
    /// Serialize the board so that [`BoardReader::read`] reproduces it.
    fn write(&self, board: &Board, destination: &mut dyn Write) -> CoreResult<()>;
}

/// Reads saved players.
pub trait PlayerReader {
    /// Parse all well-formed records. Malformed records are skipped with a
    /// warning; only a failing source is an error.
    fn read(&self, source: &mut dyn Read) -> CoreResult<Vec<Player>>;
}

/// Writes players for a later restore.
pub trait PlayerWriter {
    /// Serialize the players in order.
    fn write(&self, players: &[Player], destination: &mut dyn Write) -> CoreResult<()>;
}
