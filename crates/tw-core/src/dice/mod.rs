//! Dice: single dice, dice sets, and roll results.
//!
//! Both games default to six-sided dice; a session may pick any [`Die`]
//! kind, parsed from `d<sides>`. Randomness comes from a [`FaceSource`], so tests and replays
//! can script the faces.

pub mod roll;
pub mod set;

pub use roll::Roll;
pub use set::{DiceSet, FaceSource, ScriptedFaces};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The kind of die shared by every member of a [`DiceSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    #[default]
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// A die with a custom number of sides (at least 2).
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::Custom(n) => n.max(2),
        }
    }
}

impl FromStr for Die {
    type Err = CoreError;

    /// Parse `d6`, `D12`, or `d<N>` for any `N >= 2`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let lower = s.trim().to_lowercase();
        let sides = lower
            .strip_prefix('d')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n >= 2)
            .ok_or_else(|| CoreError::invalid("die", format!("{s:?} is not d<sides>")))?;
        Ok(match sides {
            4 => Self::D4,
            6 => Self::D6,
            8 => Self::D8,
            10 => Self::D10,
            12 => Self::D12,
            20 => Self::D20,
            n => Self::Custom(n),
        })
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
