//! CLI frontend for the Tileway board game engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Tileway: race and economy board games on one engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new board file
    New {
        /// Board kind: race or economy
        kind: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of layout rows
        #[arg(long, default_value = "10")]
        rows: u32,

        /// Number of layout columns
        #[arg(long, default_value = "10")]
        columns: u32,

        /// Board name (default: the kind)
        #[arg(long)]
        name: Option<String>,

        /// Number of random tile actions to place
        #[arg(short, long, default_value = "0")]
        actions: usize,

        /// RNG seed for action placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Validate a board file
    Check {
        /// Board file
        board: PathBuf,

        /// Ruleset the board is meant for: race or economy
        #[arg(short, long, default_value = "race")]
        ruleset: String,
    },

    /// List the tiles of a board file
    Show {
        /// Board file
        board: PathBuf,
    },

    /// Play a game on a board
    Play {
        /// Board file
        board: PathBuf,

        /// A player as NAME:COLOR (repeatable)
        #[arg(short, long = "player")]
        players: Vec<String>,

        /// Restore players from a save file
        #[arg(long)]
        restore: Option<PathBuf>,

        /// Save players to this file when the game stops
        #[arg(long)]
        save: Option<PathBuf>,

        /// Ruleset: race or economy
        #[arg(short, long, default_value = "race")]
        ruleset: String,

        /// Balance needed to win the economy game
        #[arg(long, default_value_t = tw_engine::DEFAULT_WINNING_BALANCE)]
        goal: u64,

        /// Number of dice (default: 1 for race, 2 for economy)
        #[arg(long)]
        dice: Option<usize>,

        /// Kind of die: d4, d6, d8, d10, d12, d20, or d<sides>
        #[arg(long, default_value = "d6")]
        die: tw_core::Die,

        /// RNG seed for reproducible games
        #[arg(short, long)]
        seed: Option<u64>,

        /// Starting balance for new players
        #[arg(long)]
        start_balance: Option<u64>,

        /// Stop after this many turns
        #[arg(long, default_value = "500")]
        max_turns: u64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New {
            kind,
            output,
            rows,
            columns,
            name,
            actions,
            seed,
        } => commands::new::run(&kind, &output, rows, columns, name.as_deref(), actions, seed),
        Commands::Check { board, ruleset } => commands::check::run(&board, &ruleset),
        Commands::Show { board } => commands::show::run(&board),
        Commands::Play {
            board,
            players,
            restore,
            save,
            ruleset,
            goal,
            dice,
            die,
            seed,
            start_balance,
            max_turns,
        } => commands::play::run(&commands::play::PlayOptions {
            board,
            players,
            restore,
            save,
            ruleset,
            goal,
            dice,
            die,
            seed,
            start_balance,
            max_turns,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
