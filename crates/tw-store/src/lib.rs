//! Save file formats for Tileway.
//!
//! Implements the persistence interfaces of `tw-core`: boards as JSON
//! ([`JsonBoardFormat`]) and players as one comma-separated record per line
//! ([`PlayerLineFormat`]), plus helpers that work on file paths.

pub mod board_file;
pub mod files;
pub mod player_file;

pub use board_file::JsonBoardFormat;
pub use files::{load_board, load_players, load_session, save_board, save_players};
pub use player_file::PlayerLineFormat;
