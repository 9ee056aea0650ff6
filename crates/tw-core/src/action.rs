//! Tile actions and their dispatch.
//!
//! The set of effects is closed: every effect a tile can have is a variant
//! of [`TileAction`], and [`TileAction::perform`] matches on all of them.
//! Balance changes carry a strictly positive amount; the variant encodes
//! the sign.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{CoreError, CoreResult};
use crate::player::Player;
use crate::tile::TileId;

/// The effect triggered when a player's move ends on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TileAction {
    /// Move the player straight to another tile. Forward targets act as
    /// ladders, backward targets as snakes.
    #[serde(alias = "ladder", alias = "snake")]
    Teleport {
        /// Where the player ends up.
        #[serde(rename = "destinationTileId")]
        destination: TileId,
        /// Free text shown to players.
        #[serde(default)]
        description: String,
    },
    /// The player misses their next turn.
    LoseTurn {
        /// Free text shown to players.
        #[serde(default)]
        description: String,
    },
    /// Add funds to the player's balance.
    GainFunds {
        /// Amount credited.
        amount: NonZeroU64,
        /// Free text shown to players.
        #[serde(default)]
        description: String,
    },
    /// Remove funds from the player's balance, stopping at zero.
    LoseFunds {
        /// Amount debited before clamping.
        amount: NonZeroU64,
        /// Free text shown to players.
        #[serde(default)]
        description: String,
    },
    /// A labelled tile with no effect.
    NoOp {
        /// Free text shown to players.
        #[serde(default)]
        description: String,
    },
}

/// What an action actually did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The player was moved by a teleport.
    Moved {
        /// Tile before the teleport.
        from: TileId,
        /// Tile after the teleport.
        to: TileId,
    },
    /// The player's next turn will be skipped.
    TurnLost,
    /// Funds were added.
    Credited {
        /// Amount added.
        amount: u64,
    },
    /// Funds were removed.
    Debited {
        /// Amount the tile asked for.
        requested: u64,
        /// Amount actually removed after clamping at zero.
        applied: u64,
    },
    /// Nothing happened.
    Nothing,
}

impl TileAction {
    /// A teleport to `destination`.
    pub fn teleport(destination: TileId, description: impl Into<String>) -> Self {
        Self::Teleport {
            destination,
            description: description.into(),
        }
    }

    /// A lose-turn action.
    pub fn lose_turn(description: impl Into<String>) -> Self {
        Self::LoseTurn {
            description: description.into(),
        }
    }

    /// A credit of `amount`. Fails if `amount` is zero.
    pub fn gain_funds(amount: u64, description: impl Into<String>) -> CoreResult<Self> {
        Ok(Self::GainFunds {
            amount: positive(amount)?,
            description: description.into(),
        })
    }

    /// A debit of `amount`. Fails if `amount` is zero.
    pub fn lose_funds(amount: u64, description: impl Into<String>) -> CoreResult<Self> {
        Ok(Self::LoseFunds {
            amount: positive(amount)?,
            description: description.into(),
        })
    }

    /// A labelled tile without effect.
    pub fn no_op(description: impl Into<String>) -> Self {
        Self::NoOp {
            description: description.into(),
        }
    }

    /// The free-text description.
    pub fn description(&self) -> &str {
        match self {
            Self::Teleport { description, .. }
            | Self::LoseTurn { description }
            | Self::GainFunds { description, .. }
            | Self::LoseFunds { description, .. }
            | Self::NoOp { description } => description,
        }
    }

    /// The variant name as written in board files.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Teleport { .. } => "teleport",
            Self::LoseTurn { .. } => "loseTurn",
            Self::GainFunds { .. } => "gainFunds",
            Self::LoseFunds { .. } => "loseFunds",
            Self::NoOp { .. } => "noOp",
        }
    }

    /// Apply this action to `player` on `board`.
    ///
    /// A teleport to a tile that is not on the board fails with
    /// [`CoreError::UnknownTile`] and leaves the player where they were.
    pub fn perform(&self, player: &mut Player, board: &Board) -> CoreResult<ActionOutcome> {
        match self {
            Self::Teleport { destination, .. } => {
                if !board.contains(*destination) {
                    return Err(CoreError::UnknownTile(*destination));
                }
                let from = player.current_tile();
                player.place(*destination);
                Ok(ActionOutcome::Moved {
                    from,
                    to: *destination,
                })
            }
            Self::LoseTurn { .. } => {
                player.set_skipped(true);
                Ok(ActionOutcome::TurnLost)
            }
            Self::GainFunds { amount, .. } => {
                player.credit(amount.get());
                Ok(ActionOutcome::Credited {
                    amount: amount.get(),
                })
            }
            Self::LoseFunds { amount, .. } => {
                let applied = player.debit(amount.get());
                Ok(ActionOutcome::Debited {
                    requested: amount.get(),
                    applied,
                })
            }
            Self::NoOp { .. } => Ok(ActionOutcome::Nothing),
        }
    }
}

fn positive(amount: u64) -> CoreResult<NonZeroU64> {
    NonZeroU64::new(amount).ok_or_else(|| CoreError::invalid("amount", "must be positive"))
}

impl fmt::Display for TileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effect = match self {
            Self::Teleport { destination, .. } => format!("teleport to {destination}"),
            Self::LoseTurn { .. } => "lose a turn".to_string(),
            Self::GainFunds { amount, .. } => format!("gain {amount}"),
            Self::LoseFunds { amount, .. } => format!("lose {amount}"),
            Self::NoOp { .. } => "no effect".to_string(),
        };
        if self.description().is_empty() {
            write!(f, "{effect}")
        } else {
            write!(f, "{effect} ({})", self.description())
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { from, to } => write!(f, "teleported {from} -> {to}"),
            Self::TurnLost => write!(f, "loses next turn"),
            Self::Credited { amount } => write!(f, "+{amount}"),
            Self::Debited { applied, .. } => write!(f, "-{applied}"),
            Self::Nothing => write!(f, "nothing happens"),
        }
    }
}
