//! JSON board files.
//!
//! ```json
//! {
//!   "name": "Classic",
//!   "rows": 10,
//!   "columns": 10,
//!   "tiles": [
//!     { "id": 1, "x": 0, "y": 9, "nextTile": 2 },
//!     { "id": 4, "x": 3, "y": 9, "nextTile": 5,
//!       "action": { "type": "teleport", "description": "Ladder", "destinationTileId": 14 } }
//!   ]
//! }
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use tw_core::{Board, BoardReader, BoardWriter, CoreError, CoreResult, Tile, TileAction, TileId};

/// Reads and writes boards as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBoardFormat {
    /// Pretty-print on write.
    pub pretty: bool,
}

impl JsonBoardFormat {
    /// A format that writes indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardFile {
    #[serde(default)]
    name: String,
    rows: u32,
    columns: u32,
    tiles: Vec<TileRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileRecord {
    id: TileId,
    x: u32,
    y: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_tile: Option<TileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<TileAction>,
}

impl From<&Board> for BoardFile {
    fn from(board: &Board) -> Self {
        Self {
            name: board.name().to_string(),
            rows: board.rows(),
            columns: board.columns(),
            tiles: board
                .tiles()
                .map(|tile| TileRecord {
                    id: tile.id(),
                    x: tile.x(),
                    y: tile.y(),
                    next_tile: tile.next(),
                    action: tile.action().cloned(),
                })
                .collect(),
        }
    }
}

impl BoardFile {
    /// Assemble the board: all tiles first, then links, so tiles may appear
    /// in any order. A repeated id replaces the earlier record.
    fn into_board(self) -> CoreResult<Board> {
        let mut board = Board::new(self.name, self.rows, self.columns)?;
        let mut links = Vec::new();
        for record in self.tiles {
            let mut tile = Tile::new(record.id, record.x, record.y);
            if let Some(action) = record.action {
                tile = tile.with_action(action);
            }
            board.add_tile(tile)?;
            links.retain(|(from, _)| *from != record.id);
            if let Some(next) = record.next_tile {
                links.push((record.id, next));
            }
        }
        for (from, to) in links {
            board.link(from, to)?;
        }
        Ok(board)
    }
}

fn json_error(e: serde_json::Error) -> CoreError {
    if e.is_io() {
        CoreError::Io(e.into())
    } else {
        CoreError::MalformedBoard(e.to_string())
    }
}

impl BoardReader for JsonBoardFormat {
    fn read(&self, source: &mut dyn Read) -> CoreResult<Board> {
        let file: BoardFile = serde_json::from_reader(source).map_err(json_error)?;
        file.into_board()
    }
}

impl BoardWriter for JsonBoardFormat {
    fn write(&self, board: &Board, destination: &mut dyn Write) -> CoreResult<()> {
        let file = BoardFile::from(board);
        if self.pretty {
            serde_json::to_writer_pretty(&mut *destination, &file).map_err(json_error)?;
        } else {
            serde_json::to_writer(&mut *destination, &file).map_err(json_error)?;
        }
        destination.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{economy_board, race_board};

    fn read(json: &str) -> CoreResult<Board> {
        JsonBoardFormat::default().read(&mut json.as_bytes())
    }

    fn round_trip(board: &Board) -> Board {
        let mut buf = Vec::new();
        JsonBoardFormat::pretty().write(board, &mut buf).unwrap();
        JsonBoardFormat::default().read(&mut buf.as_slice()).unwrap()
    }

    #[test]
    fn race_board_round_trips() {
        let mut board = race_board("Classic", 4, 4).unwrap();
        board
            .set_action(TileId(3), Some(TileAction::teleport(TileId(11), "Ladder up")))
            .unwrap();
        board
            .set_action(TileId(14), Some(TileAction::teleport(TileId(2), "Snake")))
            .unwrap();
        board
            .set_action(TileId(7), Some(TileAction::lose_turn("Stuck in mud")))
            .unwrap();
        assert_eq!(round_trip(&board), board);
    }

    #[test]
    fn economy_board_round_trips() {
        let mut board = economy_board("Estates", 6, 6).unwrap();
        board
            .set_action(TileId(5), Some(TileAction::gain_funds(150, "Rent due to you").unwrap()))
            .unwrap();
        board
            .set_action(TileId(9), Some(TileAction::lose_funds(75, "Income tax").unwrap()))
            .unwrap();
        board
            .set_action(TileId(11), Some(TileAction::no_op("Free parking")))
            .unwrap();
        let restored = round_trip(&board);
        assert_eq!(restored, board);
        assert_eq!(restored.next_of(TileId(20)), Some(TileId(1)));
    }

    #[test]
    fn tiles_may_appear_in_any_order() {
        let board = read(
            r#"{"name":"x","rows":1,"columns":3,"tiles":[
                {"id":3,"x":2,"y":0},
                {"id":1,"x":0,"y":0,"nextTile":2},
                {"id":2,"x":1,"y":0,"nextTile":3}
            ]}"#,
        )
        .unwrap();
        assert_eq!(board.walk(TileId(1), 5).to, TileId(3));
    }

    #[test]
    fn repeated_id_last_write_wins() {
        let board = read(
            r#"{"rows":1,"columns":2,"tiles":[
                {"id":1,"x":0,"y":0,"nextTile":2},
                {"id":2,"x":1,"y":0},
                {"id":1,"x":9,"y":9}
            ]}"#,
        )
        .unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board.get_tile(TileId(1)).map(Tile::x), Some(9));
        assert_eq!(board.next_of(TileId(1)), None);
    }

    #[test]
    fn ladder_and_snake_aliases() {
        let board = read(
            r#"{"rows":1,"columns":3,"tiles":[
                {"id":1,"x":0,"y":0,"action":{"type":"ladder","destinationTileId":3}},
                {"id":2,"x":1,"y":0,"action":{"type":"snake","description":"ouch","destinationTileId":1}},
                {"id":3,"x":2,"y":0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            board.get_tile(TileId(2)).and_then(Tile::action),
            Some(&TileAction::teleport(TileId(1), "ouch"))
        );
        assert_eq!(
            board.get_tile(TileId(1)).and_then(Tile::action).map(TileAction::kind),
            Some("teleport")
        );
    }

    #[test]
    fn dangling_link_is_malformed() {
        let err = read(r#"{"rows":1,"columns":1,"tiles":[{"id":1,"x":0,"y":0,"nextTile":7}]}"#)
            .unwrap_err();
        assert!(matches!(err, CoreError::MalformedBoard(_)));
    }

    #[test]
    fn zero_amount_is_malformed() {
        let err = read(
            r#"{"rows":1,"columns":1,"tiles":[
                {"id":1,"x":0,"y":0,"action":{"type":"gainFunds","amount":0}}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::MalformedBoard(_)));
    }

    #[test]
    fn invalid_json_and_dimensions_are_malformed() {
        assert!(matches!(read("{not json"), Err(CoreError::MalformedBoard(_))));
        assert!(matches!(
            read(r#"{"rows":0,"columns":3,"tiles":[]}"#),
            Err(CoreError::MalformedBoard(_))
        ));
        assert!(matches!(
            read(r#"{"rows":2,"columns":3,"tiles":[{"id":-1,"x":0,"y":0}]}"#),
            Err(CoreError::MalformedBoard(_))
        ));
    }

    #[test]
    fn writer_uses_file_field_names() {
        let mut board = race_board("n", 1, 2).unwrap();
        board
            .set_action(TileId(1), Some(TileAction::teleport(TileId(2), "up")))
            .unwrap();
        let mut buf = Vec::new();
        JsonBoardFormat::default().write(&board, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(r#""nextTile":2"#));
        assert!(text.contains(r#""type":"teleport""#));
        assert!(text.contains(r#""destinationTileId":2"#));
        assert!(text.ends_with('\n'));
    }
}
