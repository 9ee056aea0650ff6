use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use tw_core::{Board, CoreResult, TileAction, TileId, economy_board, race_board};

pub fn run(
    kind: &str,
    output: &Path,
    rows: u32,
    columns: u32,
    name: Option<&str>,
    actions: usize,
    seed: u64,
) -> Result<(), String> {
    if output.exists() {
        return Err(format!("'{}' already exists", output.display()));
    }

    let name = name.unwrap_or(kind);
    let mut rng = StdRng::seed_from_u64(seed);
    let board = match kind {
        "race" => race_board(name, rows, columns).and_then(|mut board| {
            place_race_actions(&mut board, actions, &mut rng)?;
            Ok(board)
        }),
        "economy" => economy_board(name, rows, columns).and_then(|mut board| {
            place_economy_actions(&mut board, actions, &mut rng)?;
            Ok(board)
        }),
        _ => {
            return Err(format!(
                "unknown board kind: \"{kind}\". Use: race, economy"
            ));
        }
    }
    .map_err(|e| format!("cannot build board: {e}"))?;

    tw_store::save_board(&board, output)
        .map_err(|e| format!("cannot write {}: {e}", output.display()))?;

    println!(
        "Created {kind} board '{name}' with {} tiles in {}",
        board.len(),
        output.display()
    );
    println!();
    println!("Get started:");
    println!("  tw show {}", output.display());
    println!("  tw play {} -p Ada:red -p Bob:blue", output.display());

    Ok(())
}

/// Tiles that may carry an action: every tile except the first and, on a
/// race board, the last.
fn candidates(board: &Board, keep_last: bool) -> Vec<TileId> {
    let first = board.first_tile_id();
    let last = board.last_tile_id();
    board
        .tiles()
        .map(|tile| tile.id())
        .filter(|id| Some(*id) != first && (keep_last || Some(*id) != last))
        .collect()
}

/// Scatter ladders and snakes; neither starts on the first or last tile.
fn place_race_actions(board: &mut Board, count: usize, rng: &mut StdRng) -> CoreResult<()> {
    let Some(last) = board.last_tile_id() else {
        return Ok(());
    };
    let mut tiles = candidates(board, false);
    tiles.shuffle(rng);
    for tile in tiles.into_iter().take(count) {
        let can_climb = tile.get() + 1 < last.get();
        let action = if can_climb && rng.random_bool(0.5) {
            let target = rng.random_range(tile.get() + 1..last.get());
            TileAction::teleport(TileId(target), "Ladder")
        } else {
            let target = rng.random_range(1..tile.get());
            TileAction::teleport(TileId(target), "Snake")
        };
        board.set_action(tile, Some(action))?;
    }
    Ok(())
}

/// Scatter income, expenses, and lost turns.
fn place_economy_actions(board: &mut Board, count: usize, rng: &mut StdRng) -> CoreResult<()> {
    let mut tiles = candidates(board, true);
    tiles.shuffle(rng);
    for tile in tiles.into_iter().take(count) {
        let amount = 25 * rng.random_range(2..=12);
        let action = match rng.random_range(0..3) {
            0 => TileAction::gain_funds(amount, "Dividend")?,
            1 => TileAction::lose_funds(amount, "Tax")?,
            _ => TileAction::lose_turn("Jail"),
        };
        board.set_action(tile, Some(action))?;
    }
    Ok(())
}
