use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use tw_core::Die;
use tw_engine::{EngineConfig, GameEngine, Ruleset, TurnReport};

/// Options for `tw play`.
pub struct PlayOptions {
    pub board: PathBuf,
    pub players: Vec<String>,
    pub restore: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub ruleset: String,
    pub goal: u64,
    pub dice: Option<usize>,
    pub die: Die,
    pub seed: Option<u64>,
    pub start_balance: Option<u64>,
    pub max_turns: u64,
}

pub fn run(opts: &PlayOptions) -> Result<(), String> {
    let ruleset = super::parse_ruleset(&opts.ruleset, opts.goal)?;
    let board = super::load_board(&opts.board)?;

    let issues = board.validate(ruleset.topology());
    if tw_core::has_errors(&issues) {
        for issue in issues.iter().filter(|i| i.is_error) {
            eprintln!("  {}", issue.to_string().red());
        }
        return Err(format!("'{}' cannot be played as a {ruleset} board", board.name()));
    }

    let mut config = EngineConfig::for_ruleset(ruleset).with_die(opts.die);
    if let Some(dice) = opts.dice {
        config = config.with_dice(dice);
    }
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if let Some(balance) = opts.start_balance {
        config = config.with_starting_balance(balance);
    }

    let restored = match &opts.restore {
        Some(path) => tw_store::load_players(path)
            .map_err(|e| format!("cannot restore {}: {e}", path.display()))?,
        None => Vec::new(),
    };
    let mut engine = GameEngine::restore(board, restored, config).map_err(|e| e.to_string())?;
    for entry in &opts.players {
        let (name, color) = parse_player(entry)?;
        engine.add_player(name, color).map_err(|e| e.to_string())?;
    }
    if engine.players().is_empty() {
        return Err("no players; add some with --player NAME:COLOR or --restore FILE".into());
    }

    println!(
        "  {} '{}' {}",
        "Playing".bold(),
        engine.board().name(),
        format!(
            "({ruleset}, {} players, {}{})",
            engine.players().len(),
            engine.dice().len(),
            engine.dice().die()
        )
        .dimmed()
    );
    println!();

    engine.subscribe(|report: &TurnReport| println!("  {}", describe(report)));

    while !engine.is_over() && engine.turn_number() < opts.max_turns {
        engine.take_turn().map_err(|e| e.to_string())?;
    }

    println!();
    match engine.winner() {
        Some(winner) => println!(
            "  {} wins after {} turns!",
            winner.name().bold().green(),
            engine.turn_number()
        ),
        None => println!(
            "  {}",
            format!("No winner after {} turns.", engine.turn_number()).yellow()
        ),
    }
    println!();
    print_standings(&engine);

    if let Some(path) = &opts.save {
        tw_store::save_players(engine.players(), path)
            .map_err(|e| format!("cannot save to {}: {e}", path.display()))?;
        log::info!("saved players after turn {}", engine.turn_number());
        println!();
        println!("  Saved players to {}", path.display());
    }

    Ok(())
}

/// Split `NAME:COLOR`; the color defaults to white.
fn parse_player(entry: &str) -> Result<(&str, &str), String> {
    match entry.split_once(':') {
        Some((name, color)) if !name.trim().is_empty() => Ok((name.trim(), color.trim())),
        Some(_) => Err(format!("invalid player \"{entry}\": missing name")),
        None => Ok((entry.trim(), "white")),
    }
}

fn describe(report: &TurnReport) -> String {
    let line = report.to_string();
    if report.won() {
        line.bold().green().to_string()
    } else if report.skipped_before || report.skipped_after {
        line.yellow().to_string()
    } else if report.action.is_some() {
        line.cyan().to_string()
    } else {
        line
    }
}

fn print_standings(engine: &GameEngine) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Player", "Color", "Tile", "Balance"]);
    for (rank, player) in engine.standings().into_iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            player.name().to_string(),
            player.color().to_string(),
            player.current_tile().to_string(),
            player.balance().to_string(),
        ]);
    }
    println!("{table}");

    if let Ruleset::Economy { winning_balance } = engine.config().ruleset {
        println!();
        println!("  Goal: {winning_balance}");
    }
}
