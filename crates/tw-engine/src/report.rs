//! Turn notifications delivered to observers.
//!
//! Each call to [`GameEngine::take_turn`](crate::GameEngine::take_turn) that
//! passes validation produces exactly one [`TurnReport`], delivered to every
//! observer on the caller's thread in registration order.

use std::sync::mpsc::Sender;

use tw_core::{ActionOutcome, Roll, TileId};

/// Everything that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// 1-based turn counter for the session.
    pub turn: u64,
    /// Name of the player who moved (or was skipped).
    pub player: String,
    /// The dice outcome. `None` when the turn was skipped.
    pub roll: Option<Roll>,
    /// Whether the player entered the turn with the skip flag set.
    pub skipped_before: bool,
    /// Whether the player leaves the turn with the skip flag set.
    pub skipped_after: bool,
    /// Race win condition after this turn (false for other rulesets).
    pub race_won: bool,
    /// Economy win condition after this turn (false for other rulesets).
    pub economy_won: bool,
    /// Tile at the start of the turn.
    pub from: TileId,
    /// Tile reached by walking, before any action.
    pub landed: TileId,
    /// Tile at the end of the turn.
    pub to: TileId,
    /// Effect of the landed tile's action, if one applied.
    pub action: Option<ActionOutcome>,
    /// Funds credited for passing the first tile.
    pub lap_bonus: u64,
    /// Balance at the end of the turn.
    pub balance: u64,
}

impl TurnReport {
    /// Whether this turn ended the game.
    pub fn won(&self) -> bool {
        self.race_won || self.economy_won
    }

    /// Sum of the dice, or 0 for a skipped turn.
    pub fn dice_total(&self) -> u32 {
        self.roll.as_ref().map_or(0, Roll::total)
    }
}

impl std::fmt::Display for TurnReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "turn {}: {}", self.turn, self.player)?;
        match &self.roll {
            None => write!(f, " skips this turn")?,
            Some(roll) => {
                write!(f, " rolled {roll}")?;
                if roll.is_double() {
                    write!(f, " (doubles)")?;
                }
                write!(f, ", {} -> {}", self.from, self.landed)?;
                if let Some(action) = &self.action {
                    write!(f, ", {action}")?;
                }
                if self.lap_bonus > 0 {
                    write!(f, ", lap bonus +{}", self.lap_bonus)?;
                }
            }
        }
        if self.skipped_after {
            write!(f, " (misses next turn)")?;
        }
        if self.won() {
            write!(f, " and wins")?;
        }
        Ok(())
    }
}

/// Receives one report per turn.
pub trait TurnObserver: Send {
    /// Called after the turn resolved.
    fn on_turn(&mut self, report: &TurnReport);
}

impl<F> TurnObserver for F
where
    F: FnMut(&TurnReport) + Send,
{
    fn on_turn(&mut self, report: &TurnReport) {
        self(report)
    }
}

/// Forwards reports into a channel, for a consumer on another thread.
///
/// A disconnected receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelObserver(pub Sender<TurnReport>);

impl TurnObserver for ChannelObserver {
    fn on_turn(&mut self, report: &TurnReport) {
        let _ = self.0.send(report.clone());
    }
}
