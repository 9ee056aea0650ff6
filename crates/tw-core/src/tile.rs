//! Tiles: the addressable positions of the board graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::TileAction;

/// Identity of a tile, unique within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    /// The tile players start on unless configured otherwise.
    pub const START: Self = Self(1);

    /// The raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in the board graph.
///
/// The forward link is an id resolved through the owning [`Board`](crate::Board),
/// never a direct reference. It can only be attached through
/// [`Board::add_tile`](crate::Board::add_tile) or [`Board::link`](crate::Board::link),
/// both of which reject links to tiles that do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    x: u32,
    y: u32,
    next: Option<TileId>,
    action: Option<TileAction>,
}

impl Tile {
    /// Create an unlinked tile with no action at the given layout position.
    pub fn new(id: TileId, x: u32, y: u32) -> Self {
        Self {
            id,
            x,
            y,
            next: None,
            action: None,
        }
    }

    /// Attach an action triggered when a move ends on this tile.
    pub fn with_action(mut self, action: TileAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Pre-set the forward link. Checked when the tile is added to a board.
    pub fn with_next(mut self, next: TileId) -> Self {
        self.next = Some(next);
        self
    }

    /// The tile's identity.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Layout column (presentation hint only).
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Layout row (presentation hint only).
    pub fn y(&self) -> u32 {
        self.y
    }

    /// The forward link, if any.
    pub fn next(&self) -> Option<TileId> {
        self.next
    }

    /// The attached action, if any.
    pub fn action(&self) -> Option<&TileAction> {
        self.action.as_ref()
    }

    pub(crate) fn set_next(&mut self, next: Option<TileId>) {
        self.next = next;
    }

    pub(crate) fn set_action(&mut self, action: Option<TileAction>) {
        self.action = action;
    }
}
