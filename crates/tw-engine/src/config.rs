//! Configuration for a game session.

use std::num::NonZeroU64;

use tw_core::{Die, TileId, Topology};

/// Default balance an economy player must reach to win.
pub const DEFAULT_WINNING_BALANCE: u64 = 3000;

/// Which game is being played, and so which win condition applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ruleset {
    /// First player to stand on the highest tile wins.
    Race,
    /// First player whose balance reaches the threshold wins.
    Economy {
        /// Balance needed to win.
        winning_balance: u64,
    },
}

impl Ruleset {
    /// The board shape this ruleset expects.
    pub fn topology(self) -> Topology {
        match self {
            Self::Race => Topology::Race,
            Self::Economy { .. } => Topology::Circuit,
        }
    }

    /// Parse "race" or "economy" (case-insensitive).
    pub fn parse(s: &str, winning_balance: u64) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "race" => Some(Self::Race),
            "economy" => Some(Self::Economy { winning_balance }),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Race => write!(f, "race"),
            Self::Economy { winning_balance } => write!(f, "economy (goal {winning_balance})"),
        }
    }
}

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Win condition.
    pub ruleset: Ruleset,
    /// Number of dice rolled per turn (at least 1).
    pub dice: usize,
    /// Kind of every die in the set.
    pub die: Die,
    /// RNG seed for reproducible games. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Tile new players start on.
    pub starting_tile: TileId,
    /// Balance new players start with.
    pub starting_balance: u64,
    /// Credited each time a move passes onto the first tile.
    pub lap_bonus: Option<NonZeroU64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::race()
    }
}

impl EngineConfig {
    /// Race preset: one d6, no funds.
    pub fn race() -> Self {
        Self {
            ruleset: Ruleset::Race,
            dice: 1,
            die: Die::D6,
            seed: None,
            starting_tile: TileId::START,
            starting_balance: 0,
            lap_bonus: None,
        }
    }

    /// Economy preset: two d6, 1500 starting funds, 200 per lap.
    pub fn economy() -> Self {
        Self {
            ruleset: Ruleset::Economy {
                winning_balance: DEFAULT_WINNING_BALANCE,
            },
            dice: 2,
            die: Die::D6,
            seed: None,
            starting_tile: TileId::START,
            starting_balance: 1500,
            lap_bonus: NonZeroU64::new(200),
        }
    }

    /// Preset matching the ruleset.
    pub fn for_ruleset(ruleset: Ruleset) -> Self {
        let base = match ruleset {
            Ruleset::Race => Self::race(),
            Ruleset::Economy { .. } => Self::economy(),
        };
        Self { ruleset, ..base }
    }

    /// Set the number of dice (clamped to at least 1).
    pub fn with_dice(mut self, dice: usize) -> Self {
        self.dice = dice.max(1);
        self
    }

    /// Set the kind of die.
    pub fn with_die(mut self, die: Die) -> Self {
        self.die = die;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting tile for new players.
    pub fn with_starting_tile(mut self, tile: TileId) -> Self {
        self.starting_tile = tile;
        self
    }

    /// Set the starting balance for new players.
    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Set or disable (with 0) the lap bonus.
    pub fn with_lap_bonus(mut self, bonus: u64) -> Self {
        self.lap_bonus = NonZeroU64::new(bonus);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_race() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.ruleset, Ruleset::Race);
        assert_eq!(cfg.dice, 1);
        assert_eq!(cfg.starting_tile, TileId(1));
        assert!(cfg.lap_bonus.is_none());
    }

    #[test]
    fn economy_preset() {
        let cfg = EngineConfig::economy();
        assert_eq!(
            cfg.ruleset,
            Ruleset::Economy {
                winning_balance: 3000
            }
        );
        assert_eq!(cfg.dice, 2);
        assert_eq!(cfg.starting_balance, 1500);
        assert_eq!(cfg.lap_bonus.map(NonZeroU64::get), Some(200));
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::race()
            .with_dice(0)
            .with_die(Die::D20)
            .with_seed(9)
            .with_starting_tile(TileId(4))
            .with_starting_balance(50)
            .with_lap_bonus(0);
        assert_eq!(cfg.dice, 1);
        assert_eq!(cfg.die, Die::D20);
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.starting_tile, TileId(4));
        assert_eq!(cfg.starting_balance, 50);
        assert!(cfg.lap_bonus.is_none());
    }

    #[test]
    fn for_ruleset_keeps_goal() {
        let cfg = EngineConfig::for_ruleset(Ruleset::Economy {
            winning_balance: 10,
        });
        assert_eq!(cfg.dice, 2);
        assert_eq!(
            cfg.ruleset,
            Ruleset::Economy {
                winning_balance: 10
            }
        );
    }

    #[test]
    fn parse_ruleset() {
        assert_eq!(Ruleset::parse("Race", 0), Some(Ruleset::Race));
        assert_eq!(
            Ruleset::parse("economy", 500),
            Some(Ruleset::Economy {
                winning_balance: 500
            })
        );
        assert_eq!(Ruleset::parse("chess", 0), None);
        assert_eq!(Ruleset::Race.topology(), Topology::Race);
    }
}
