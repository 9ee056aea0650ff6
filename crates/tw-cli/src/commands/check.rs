use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path, ruleset: &str) -> Result<(), String> {
    let board = super::load_board(path)?;
    let ruleset = super::parse_ruleset(ruleset, tw_engine::DEFAULT_WINNING_BALANCE)?;
    let issues = board.validate(ruleset.topology());

    for issue in &issues {
        if issue.is_error {
            eprintln!("  {}", issue.to_string().red());
        } else {
            eprintln!("  {}", issue.to_string().yellow());
        }
    }

    if tw_core::has_errors(&issues) {
        return Err(format!("'{}' is not a valid {ruleset} board", board.name()));
    }

    println!("  All checks passed for '{}'.", board.name());
    println!(
        "  {} tiles on a {}x{} grid, {} actions",
        board.len(),
        board.rows(),
        board.columns(),
        board.tiles().filter(|t| t.action().is_some()).count()
    );
    Ok(())
}
