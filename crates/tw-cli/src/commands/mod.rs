pub mod check;
pub mod new;
pub mod play;
pub mod show;

use std::path::Path;

use tw_core::Board;
use tw_engine::Ruleset;

/// Load a board file, describing failures for the terminal.
fn load_board(path: &Path) -> Result<Board, String> {
    tw_store::load_board(path).map_err(|e| format!("cannot load {}: {e}", path.display()))
}

/// Parse a ruleset name from the command line.
fn parse_ruleset(name: &str, goal: u64) -> Result<Ruleset, String> {
    Ruleset::parse(name, goal)
        .ok_or_else(|| format!("unknown ruleset: \"{name}\". Use: race, economy"))
}
