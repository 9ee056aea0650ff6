//! Standard board layouts for the two rulesets.

use std::collections::HashSet;

use crate::board::Board;
use crate::error::{CoreError, CoreResult};
use crate::tile::{Tile, TileId};

/// Build a race board filling every cell of a `rows x columns` grid.
///
/// Tiles are numbered from 1 in a serpentine path starting at the
/// bottom-left cell, and each tile links to the next id. `y = 0` is the
/// top row.
pub fn race_board(name: impl Into<String>, rows: u32, columns: u32) -> CoreResult<Board> {
    let mut board = Board::new(name, rows, columns)?;
    let count = rows.checked_mul(columns).ok_or_else(|| {
        CoreError::MalformedBoard(format!("{rows}x{columns} has more tiles than ids"))
    })?;
    for index in 0..count {
        let row_from_bottom = index / columns;
        let offset = index % columns;
        let x = if row_from_bottom % 2 == 0 {
            offset
        } else {
            columns - 1 - offset
        };
        let y = rows - 1 - row_from_bottom;
        board.add_tile(Tile::new(TileId(index + 1), x, y))?;
    }
    for id in 1..count {
        board.link(TileId(id), TileId(id + 1))?;
    }
    Ok(board)
}

/// Build a circular economy board from the boundary cells of the grid.
///
/// Tiles are numbered from 1 clockwise starting at the bottom-left corner,
/// and the last tile links back to tile 1.
pub fn economy_board(name: impl Into<String>, rows: u32, columns: u32) -> CoreResult<Board> {
    let mut board = Board::new(name, rows, columns)?;
    if 2 * (u64::from(rows) + u64::from(columns)) > u64::from(u32::MAX) {
        return Err(CoreError::MalformedBoard(format!(
            "{rows}x{columns} has more tiles than ids"
        )));
    }
    let cells = perimeter(rows, columns);
    for (id, (x, y)) in (1u32..).zip(cells.iter().copied()) {
        board.add_tile(Tile::new(TileId(id), x, y))?;
    }
    let count = cells.len() as u32;
    for id in 1..count {
        board.link(TileId(id), TileId(id + 1))?;
    }
    if count > 1 {
        board.link(TileId(count), TileId::START)?;
    }
    Ok(board)
}

/// Boundary cells in clockwise order from the bottom-left corner.
fn perimeter(rows: u32, columns: u32) -> Vec<(u32, u32)> {
    let bottom = rows - 1;
    let right = columns - 1;
    let left_side = (0..=bottom).rev().map(|y| (0, y));
    let top_side = (1..=right).map(|x| (x, 0));
    let right_side = (1..=bottom).map(|y| (right, y));
    let bottom_side = (1..right).rev().map(|x| (x, bottom));

    // Thin grids revisit cells; keep the first visit only.
    let mut seen = HashSet::new();
    left_side
        .chain(top_side)
        .chain(right_side)
        .chain(bottom_side)
        .filter(|cell| seen.insert(*cell))
        .collect()
}
