//! Per-participant game state.

use crate::board::{Board, Walk};
use crate::error::{CoreError, CoreResult};
use crate::tile::TileId;

/// A participant in a game session.
///
/// The current tile is held as an id and looked up through the board; the
/// board, not the player, owns the tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: String,
    current_tile: TileId,
    balance: u64,
    skipped: bool,
}

impl Player {
    /// Create a player standing on `start` with a zero balance.
    ///
    /// Name and color must be non-blank, must not contain commas or line
    /// breaks, must not start with `#`, and must not have surrounding
    /// whitespace. Anything else would not survive a save file.
    pub fn new(name: impl Into<String>, color: impl Into<String>, start: TileId) -> CoreResult<Self> {
        let name = checked_text("name", name.into())?;
        let color = checked_text("color", color.into())?;
        Ok(Self {
            name,
            color,
            current_tile: start,
            balance: 0,
            skipped: false,
        })
    }

    /// Set the starting balance.
    pub fn with_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    /// Display name, also the player's identity within a session.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display color.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// The tile the player stands on.
    pub fn current_tile(&self) -> TileId {
        self.current_tile
    }

    /// Current funds.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Whether the player's next turn will be skipped.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Whether two players share an identity (case-insensitive name).
    pub fn same_identity(&self, other: &Player) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }

    /// Put the player directly on a tile.
    pub fn place(&mut self, tile: TileId) {
        self.current_tile = tile;
    }

    /// Move forward `steps` tiles along the board's forward links.
    pub fn advance(&mut self, steps: u32, board: &Board) -> Walk {
        let walk = board.walk(self.current_tile, steps);
        self.current_tile = walk.to;
        walk
    }

    /// Add funds.
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Remove up to `amount`, stopping at zero. Returns what was removed.
    pub fn debit(&mut self, amount: u64) -> u64 {
        let applied = amount.min(self.balance);
        self.balance -= applied;
        applied
    }

    /// Set or clear the skip flag.
    pub fn set_skipped(&mut self, skipped: bool) {
        self.skipped = skipped;
    }

    /// Clear the skip flag, returning whether it was set.
    pub fn take_skip(&mut self) -> bool {
        std::mem::take(&mut self.skipped)
    }
}

fn checked_text(field: &'static str, value: String) -> CoreResult<String> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "must not be blank"));
    }
    if value.contains([',', '\n', '\r']) {
        return Err(CoreError::invalid(
            field,
            format!("{value:?} contains a comma or line break"),
        ));
    }
    if value.trim() != value {
        return Err(CoreError::invalid(
            field,
            format!("{value:?} has leading or trailing whitespace"),
        ));
    }
    if value.starts_with('#') {
        return Err(CoreError::invalid(field, format!("{value:?} starts with '#'")));
    }
    Ok(value)
}
