//! The outcome of one roll of a dice set.

use serde::{Deserialize, Serialize};

/// The faces shown by every die of one roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    /// Individual faces, in die order.
    pub faces: Vec<u32>,
}

impl Roll {
    /// Sum of all faces, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.faces.iter().fold(0, |sum, face| sum.saturating_add(*face))
    }

    /// The face of the `n`th die, counting from 1. Zero if out of range.
    pub fn face(&self, n: usize) -> u32 {
        n.checked_sub(1)
            .and_then(|i| self.faces.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// True if at least two dice were rolled and all show the same face.
    pub fn is_double(&self) -> bool {
        self.faces.len() > 1 && self.faces.windows(2).all(|w| w[0] == w[1])
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.faces.iter().map(u32::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total())
    }
}
