use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let board = super::load_board(path)?;

    println!("  {} ({}x{})", board.name(), board.rows(), board.columns());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tile", "Position", "Next", "Action"]);

    for tile in board.tiles() {
        let next = tile
            .next()
            .map_or_else(|| "—".to_string(), |id| id.to_string());
        let action = tile
            .action()
            .map_or_else(|| "—".to_string(), ToString::to_string);
        table.add_row(vec![
            tile.id().to_string(),
            format!("{},{}", tile.x(), tile.y()),
            next,
            action,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} tiles", board.len());

    Ok(())
}
