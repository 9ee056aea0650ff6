//! Core model for Tileway board games.
//!
//! Provides the board graph (an arena of [`Tile`]s keyed by [`TileId`]), the
//! closed set of [`TileAction`] effects, [`Player`] state, dice, standard
//! board layouts, board validation, and the persistence interfaces consumed
//! by the turn engine.

pub mod action;
pub mod board;
pub mod dice;
pub mod error;
pub mod gateway;
pub mod layout;
pub mod player;
pub mod tile;
pub mod validate;

pub use action::{ActionOutcome, TileAction};
pub use board::{Board, Walk};
pub use dice::{DiceSet, Die, FaceSource, Roll, ScriptedFaces};
pub use error::{CoreError, CoreResult};
pub use gateway::{BoardReader, BoardWriter, PlayerReader, PlayerWriter};
pub use layout::{economy_board, race_board};
pub use player::Player;
pub use tile::{Tile, TileId};
pub use validate::{Topology, ValidationIssue, has_errors};
