//! Convenience helpers for reading and writing save files on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use tw_core::{Board, BoardReader, BoardWriter, CoreResult, Player, PlayerReader, PlayerWriter};

use crate::board_file::JsonBoardFormat;
use crate::player_file::PlayerLineFormat;

/// Read a JSON board file.
pub fn load_board(path: &Path) -> CoreResult<Board> {
    let mut file = File::open(path)?;
    JsonBoardFormat::default().read(&mut file)
}

/// Write a board as pretty-printed JSON, replacing the file.
pub fn save_board(board: &Board, path: &Path) -> CoreResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    JsonBoardFormat::pretty().write(board, &mut out)?;
    out.flush()?;
    info!("wrote board '{}' to {}", board.name(), path.display());
    Ok(())
}

/// Read a player save file.
pub fn load_players(path: &Path) -> CoreResult<Vec<Player>> {
    let mut file = File::open(path)?;
    PlayerLineFormat.read(&mut file)
}

/// Write a player save file, replacing it.
pub fn save_players(players: &[Player], path: &Path) -> CoreResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    PlayerLineFormat.write(players, &mut out)?;
    info!("saved {} players to {}", players.len(), path.display());
    Ok(())
}

/// Read a board and, if given, the players saved alongside it.
pub fn load_session(board: &Path, players: Option<&Path>) -> CoreResult<(Board, Vec<Player>)> {
    let board = load_board(board)?;
    let players = match players {
        Some(path) => load_players(path)?,
        None => Vec::new(),
    };
    Ok((board, players))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tw_core::{CoreError, TileAction, TileId, race_board};

    #[test]
    fn board_and_players_round_trip_on_disk() {
        let dir = TempDir::new().unwrap();
        let board_path = dir.path().join("board.json");
        let players_path = dir.path().join("players.csv");

        let mut board = race_board("Disk", 3, 3).unwrap();
        board
            .set_action(TileId(2), Some(TileAction::teleport(TileId(8), "Ladder")))
            .unwrap();
        let players = vec![Player::new("Ada", "red", TileId(5)).unwrap().with_balance(40)];

        save_board(&board, &board_path).unwrap();
        save_players(&players, &players_path).unwrap();

        let (loaded_board, loaded_players) =
            load_session(&board_path, Some(&players_path)).unwrap();
        assert_eq!(loaded_board, board);
        assert_eq!(loaded_players, players);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_board(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn session_without_players() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.json");
        save_board(&race_board("b", 1, 3).unwrap(), &path).unwrap();
        let (_, players) = load_session(&path, None).unwrap();
        assert!(players.is_empty());
    }
}
