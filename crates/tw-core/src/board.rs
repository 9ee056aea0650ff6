//! The board graph: an arena of tiles keyed by id.
//!
//! All cross-tile references (forward links, teleport destinations, player
//! positions) are [`TileId`]s resolved through the board when used.

use std::collections::BTreeMap;

use crate::action::TileAction;
use crate::error::{CoreError, CoreResult};
use crate::tile::{Tile, TileId};

/// The result of walking a number of steps along forward links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walk {
    /// Where the walk started.
    pub from: TileId,
    /// Where the walk stopped.
    pub to: TileId,
    /// How many steps were actually taken.
    pub steps: u32,
    /// How many times the walk stepped onto the board's first tile.
    pub laps: u32,
}

/// An owned collection of tiles plus its layout dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    name: String,
    rows: u32,
    columns: u32,
    tiles: BTreeMap<TileId, Tile>,
}

impl Board {
    /// Create an empty board. Both dimensions must be positive.
    pub fn new(name: impl Into<String>, rows: u32, columns: u32) -> CoreResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(CoreError::MalformedBoard(format!(
                "dimensions must be positive, got {rows}x{columns}"
            )));
        }
        Ok(Self {
            name: name.into(),
            rows,
            columns,
            tiles: BTreeMap::new(),
        })
    }

    /// Opaque label carried through board files.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of layout rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of layout columns.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether a tile with this id exists.
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    /// Look up a tile.
    pub fn get_tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// All tiles in ascending id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// The lowest tile id, where laps are counted.
    pub fn first_tile_id(&self) -> Option<TileId> {
        self.tiles.keys().next().copied()
    }

    /// The highest tile id, the goal of a race.
    pub fn last_tile_id(&self) -> Option<TileId> {
        self.tiles.keys().next_back().copied()
    }

    /// The forward link of a tile, if the tile exists and is linked.
    pub fn next_of(&self, id: TileId) -> Option<TileId> {
        self.tiles.get(&id).and_then(Tile::next)
    }

    /// Insert a tile, replacing any tile with the same id.
    ///
    /// Returns the replaced tile. A tile whose forward link points to itself
    /// or to an id not on the board is rejected and the board is unchanged.
    pub fn add_tile(&mut self, tile: Tile) -> CoreResult<Option<Tile>> {
        if let Some(next) = tile.next() {
            self.check_link(tile.id(), next)?;
        }
        Ok(self.tiles.insert(tile.id(), tile))
    }

    /// Set the forward link of `from` to `to`.
    ///
    /// Both tiles must exist and differ; otherwise the board is unchanged.
    pub fn link(&mut self, from: TileId, to: TileId) -> CoreResult<()> {
        if !self.contains(from) {
            return Err(CoreError::MalformedBoard(format!(
                "cannot link from missing tile {from}"
            )));
        }
        self.check_link(from, to)?;
        if let Some(tile) = self.tiles.get_mut(&from) {
            tile.set_next(Some(to));
        }
        Ok(())
    }

    /// Remove the forward link of a tile.
    pub fn unlink(&mut self, id: TileId) -> CoreResult<()> {
        let tile = self.tiles.get_mut(&id).ok_or(CoreError::UnknownTile(id))?;
        tile.set_next(None);
        Ok(())
    }

    /// Attach, replace, or clear the action of a tile.
    pub fn set_action(&mut self, id: TileId, action: Option<TileAction>) -> CoreResult<()> {
        let tile = self.tiles.get_mut(&id).ok_or(CoreError::UnknownTile(id))?;
        tile.set_action(action);
        Ok(())
    }

    /// Walk up to `steps` forward links starting at `from`.
    ///
    /// Stops early at a tile without a successor; never wraps around on its
    /// own. On a circular board the links themselves lead back to the start.
    pub fn walk(&self, from: TileId, steps: u32) -> Walk {
        let first = self.first_tile_id();
        let mut walk = Walk {
            from,
            to: from,
            steps: 0,
            laps: 0,
        };
        while walk.steps < steps {
            let Some(next) = self.next_of(walk.to) else {
                break;
            };
            walk.to = next;
            walk.steps += 1;
            if Some(next) == first {
                walk.laps += 1;
            }
        }
        walk
    }

    fn check_link(&self, from: TileId, to: TileId) -> CoreResult<()> {
        if from == to {
            return Err(CoreError::MalformedBoard(format!(
                "tile {from} cannot link to itself"
            )));
        }
        if !self.contains(to) {
            return Err(CoreError::MalformedBoard(format!(
                "tile {from} links to missing tile {to}"
            )));
        }
        Ok(())
    }
}
