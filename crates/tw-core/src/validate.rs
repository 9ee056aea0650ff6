//! Structural checks on a board before play.
//!
//! Hard topology violations are already rejected while a board is built.
//! These checks catch what can only be judged on the finished board: dangling
//! teleports, cycles on a race track, and unreachable tiles.

use std::collections::{BTreeSet, HashSet};

use crate::action::TileAction;
use crate::board::Board;
use crate::tile::TileId;

/// The shape a board is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// A one-way track ending at the highest tile. Must be acyclic.
    Race,
    /// A loop of tiles travelled round and round.
    Circuit,
}

/// A warning or error found during board validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The tile the issue is about, if it concerns one tile.
    pub tile: Option<TileId>,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(tile: Option<TileId>, message: impl Into<String>) -> Self {
        Self {
            tile,
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(tile: Option<TileId>, message: impl Into<String>) -> Self {
        Self {
            tile,
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        match self.tile {
            Some(tile) => write!(f, "{level}: tile {tile}: {}", self.message),
            None => write!(f, "{level}: {}", self.message),
        }
    }
}

/// Returns true if any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|issue| issue.is_error)
}

impl Board {
    /// Check the board against the expected topology.
    pub fn validate(&self, topology: Topology) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let (Some(first), Some(last)) = (self.first_tile_id(), self.last_tile_id()) else {
            issues.push(ValidationIssue::error(None, "board has no tiles"));
            return issues;
        };

        for tile in self.tiles() {
            if let Some(TileAction::Teleport { destination, .. }) = tile.action() {
                if !self.contains(*destination) {
                    issues.push(ValidationIssue::error(
                        Some(tile.id()),
                        format!("teleport destination {destination} does not exist"),
                    ));
                } else if *destination == tile.id() {
                    issues.push(ValidationIssue::warning(
                        Some(tile.id()),
                        "teleport leads back to the same tile",
                    ));
                }
            }
        }

        match topology {
            Topology::Race => {
                for start in self.cycle_entries() {
                    issues.push(ValidationIssue::error(
                        Some(start),
                        "forward links form a cycle; the race would never end",
                    ));
                }
                for tile in self.tiles() {
                    if tile.next().is_none() && tile.id() != last {
                        issues.push(ValidationIssue::warning(
                            Some(tile.id()),
                            format!("dead end before the final tile {last}"),
                        ));
                    }
                }
            }
            Topology::Circuit => {
                if self.len() > 1 && !self.returns_to(first) {
                    issues.push(ValidationIssue::warning(
                        Some(first),
                        "forward links do not lead back to the first tile",
                    ));
                }
            }
        }

        let reachable = self.reachable_from(first);
        for tile in self.tiles() {
            if !reachable.contains(&tile.id()) {
                issues.push(ValidationIssue::warning(
                    Some(tile.id()),
                    format!("unreachable from tile {first}"),
                ));
            }
        }

        issues
    }

    /// The smallest tile id of each distinct forward-link cycle.
    fn cycle_entries(&self) -> BTreeSet<TileId> {
        let mut done: HashSet<TileId> = HashSet::new();
        let mut cycles = BTreeSet::new();
        for tile in self.tiles() {
            let mut path = Vec::new();
            let mut on_path = HashSet::new();
            let mut cursor = Some(tile.id());
            while let Some(id) = cursor {
                if done.contains(&id) {
                    break;
                }
                if !on_path.insert(id) {
                    let start = path.iter().position(|p| *p == id).unwrap_or(0);
                    if let Some(min) = path[start..].iter().min() {
                        cycles.insert(*min);
                    }
                    break;
                }
                path.push(id);
                cursor = self.next_of(id);
            }
            done.extend(path);
        }
        cycles
    }

    fn returns_to(&self, first: TileId) -> bool {
        let mut cursor = self.next_of(first);
        for _ in 0..self.len() {
            match cursor {
                Some(id) if id == first => return true,
                Some(id) => cursor = self.next_of(id),
                None => return false,
            }
        }
        false
    }

    /// Tiles reachable by forward links or teleports.
    fn reachable_from(&self, start: TileId) -> HashSet<TileId> {
        let mut seen = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(tile) = self.get_tile(id) else {
                continue;
            };
            let teleport = match tile.action() {
                Some(TileAction::Teleport { destination, .. }) => Some(*destination),
                _ => None,
            };
            for next in tile.next().into_iter().chain(teleport) {
                if self.contains(next) && seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }
}
