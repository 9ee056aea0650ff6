//! The turn state machine.
//!
//! `GameEngine` owns the active board, the ordered roster, and the dice.
//! Each [`take_turn`](GameEngine::take_turn) resolves exactly one player:
//! a skipped player only has their flag cleared, everyone else rolls, walks
//! the forward links, and triggers the action of the tile they land on.

use std::io::{Read, Write};

use log::{debug, info, warn};

use tw_core::{
    Board, BoardReader, BoardWriter, CoreError, DiceSet, Player, PlayerReader, PlayerWriter, Tile,
};

use crate::config::{EngineConfig, Ruleset};
use crate::error::{EngineError, EngineResult};
use crate::report::{TurnObserver, TurnReport};

/// Where the engine is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for the player at this index to take their turn.
    AwaitingRoll(usize),
    /// The player at this index is being resolved.
    Resolving(usize),
    /// The player at this index won; no further turns are accepted.
    GameOver {
        /// Index of the winner in the roster.
        winner: usize,
    },
}

/// A running game session.
pub struct GameEngine {
    board: Board,
    players: Vec<Player>,
    dice: DiceSet,
    config: EngineConfig,
    state: TurnState,
    turn: u64,
    observers: Vec<Box<dyn TurnObserver>>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board.name())
            .field("players", &self.players.len())
            .field("state", &self.state)
            .field("turn", &self.turn)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl GameEngine {
    /// Start a session on `board` with no players yet.
    pub fn new(board: Board, config: EngineConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => DiceSet::seeded_with_die(config.dice, config.die, seed),
            None => DiceSet::with_die(config.dice, config.die),
        };
        Self::with_dice(board, config, dice)
    }

    /// Start a session with an explicit dice set.
    pub fn with_dice(board: Board, config: EngineConfig, dice: DiceSet) -> Self {
        Self {
            board,
            players: Vec::new(),
            dice,
            config,
            state: TurnState::AwaitingRoll(0),
            turn: 0,
            observers: Vec::new(),
        }
    }

    /// Resume a session from a board and previously saved players.
    pub fn restore(board: Board, players: Vec<Player>, config: EngineConfig) -> EngineResult<Self> {
        let mut engine = Self::new(board, config);
        for player in players {
            engine.join(player)?;
        }
        info!(
            "restored session on '{}' with {} players",
            engine.board.name(),
            engine.players.len()
        );
        Ok(engine)
    }

    /// Resume a session by reading the board and players through the
    /// persistence gateway.
    pub fn restore_from(
        board_reader: &dyn BoardReader,
        board_source: &mut dyn Read,
        player_reader: &dyn PlayerReader,
        player_source: &mut dyn Read,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let board = board_reader.read(board_source)?;
        let players = player_reader.read(player_source)?;
        Self::restore(board, players, config)
    }

    /// Write the board and players through the persistence gateway.
    pub fn save(
        &self,
        board_writer: &dyn BoardWriter,
        board_destination: &mut dyn Write,
        player_writer: &dyn PlayerWriter,
        player_destination: &mut dyn Write,
    ) -> EngineResult<()> {
        board_writer.write(&self.board, board_destination)?;
        player_writer.write(&self.players, player_destination)?;
        info!("saved session with {} players", self.players.len());
        Ok(())
    }

    /// Add a new player on the configured starting tile and balance.
    pub fn add_player(&mut self, name: &str, color: &str) -> EngineResult<()> {
        let player = Player::new(name, color, self.config.starting_tile)?
            .with_balance(self.config.starting_balance);
        self.join(player)
    }

    /// Add an existing player at the end of the turn order.
    ///
    /// Rejects a duplicate name or a tile that is not on the board.
    pub fn join(&mut self, player: Player) -> EngineResult<()> {
        if self.players.iter().any(|p| p.same_identity(&player)) {
            return Err(EngineError::DuplicatePlayer(player.name().to_string()));
        }
        if !self.board.contains(player.current_tile()) {
            return Err(CoreError::UnknownTile(player.current_tile()).into());
        }
        self.players.push(player);
        Ok(())
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: impl TurnObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Resolve one turn for the current player.
    ///
    /// Fails with [`EngineError::NoPlayers`] on an empty roster and with
    /// [`EngineError::GameOver`] once someone has won; neither changes any
    /// state or notifies observers.
    pub fn take_turn(&mut self) -> EngineResult<TurnReport> {
        if self.players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        if let TurnState::GameOver { winner } = self.state {
            return Err(EngineError::GameOver {
                winner: self.players[winner].name().to_string(),
            });
        }

        let index = self.current_index();
        self.state = TurnState::Resolving(index);
        self.turn += 1;

        let report = if self.players[index].is_skipped() {
            self.resolve_skip(index)
        } else {
            self.resolve_roll(index)
        };

        self.state = if report.won() {
            info!("{} wins on turn {}", report.player, report.turn);
            TurnState::GameOver { winner: index }
        } else {
            TurnState::AwaitingRoll((index + 1) % self.players.len())
        };

        for observer in &mut self.observers {
            observer.on_turn(&report);
        }
        Ok(report)
    }

    fn resolve_skip(&mut self, index: usize) -> TurnReport {
        let player = &mut self.players[index];
        player.take_skip();
        debug!("{} is skipped", player.name());
        TurnReport {
            turn: self.turn,
            player: player.name().to_string(),
            roll: None,
            skipped_before: true,
            skipped_after: player.is_skipped(),
            race_won: false,
            economy_won: false,
            from: player.current_tile(),
            landed: player.current_tile(),
            to: player.current_tile(),
            action: None,
            lap_bonus: 0,
            balance: player.balance(),
        }
    }

    fn resolve_roll(&mut self, index: usize) -> TurnReport {
        let total = self.dice.roll();
        let roll = self.dice.last_roll();
        let player = &mut self.players[index];

        let walk = player.advance(total, &self.board);
        let lap_bonus = match self.config.lap_bonus {
            Some(bonus) if walk.laps > 0 => bonus.get().saturating_mul(u64::from(walk.laps)),
            _ => 0,
        };
        player.credit(lap_bonus);

        let action = match self.board.get_tile(walk.to).and_then(Tile::action) {
            Some(action) => match action.perform(player, &self.board) {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    warn!("{} on tile {}: {action} failed: {e}", player.name(), walk.to);
                    None
                }
            },
            None => None,
        };

        debug!(
            "{} rolled {roll}: {} -> {} -> {}",
            player.name(),
            walk.from,
            walk.to,
            player.current_tile()
        );

        let (race_won, economy_won) = won(self.config.ruleset, player, &self.board);
        TurnReport {
            turn: self.turn,
            player: player.name().to_string(),
            roll: Some(roll),
            skipped_before: false,
            skipped_after: player.is_skipped(),
            race_won,
            economy_won,
            from: walk.from,
            landed: walk.to,
            to: player.current_tile(),
            action,
            lap_bonus,
            balance: player.balance(),
        }
    }

    /// The active board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by name (case-insensitive).
    pub fn player(&self, name: &str) -> Option<&Player> {
        let lower = name.to_lowercase();
        self.players.iter().find(|p| p.name().to_lowercase() == lower)
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The dice, including the faces of the last roll.
    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Current state of the turn cycle.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Number of turns taken so far.
    pub fn turn_number(&self) -> u64 {
        self.turn
    }

    /// Index of the player whose turn is next (or who won).
    pub fn current_index(&self) -> usize {
        match self.state {
            TurnState::AwaitingRoll(i) | TurnState::Resolving(i) => i,
            TurnState::GameOver { winner } => winner,
        }
    }

    /// The player whose turn is next, if any.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_index())
    }

    /// The winner, once the game is over.
    pub fn winner(&self) -> Option<&Player> {
        match self.state {
            TurnState::GameOver { winner } => self.players.get(winner),
            _ => None,
        }
    }

    /// Whether someone has won.
    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::GameOver { .. })
    }

    /// Players ranked for the ruleset: furthest tile for a race, highest
    /// balance for the economy game. Ties keep turn order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        match self.config.ruleset {
            Ruleset::Race => ranked.sort_by_key(|p| std::cmp::Reverse(p.current_tile())),
            Ruleset::Economy { .. } => ranked.sort_by_key(|p| std::cmp::Reverse(p.balance())),
        }
        ranked
    }
}

/// Evaluate `(race_won, economy_won)`; only the ruleset's own condition can
/// be true.
fn won(ruleset: Ruleset, player: &Player, board: &Board) -> (bool, bool) {
    match ruleset {
        Ruleset::Race => (board.last_tile_id() == Some(player.current_tile()), false),
        Ruleset::Economy { winning_balance } => (false, player.balance() >= winning_balance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ChannelObserver;
    use proptest::prelude::*;
    use std::sync::mpsc;
    use tw_core::{ActionOutcome, Die, ScriptedFaces, TileAction, TileId, economy_board, race_board};

    fn scripted(faces: &[u32]) -> DiceSet {
        DiceSet::with_source(1, Die::D6, ScriptedFaces::new(faces.to_vec()))
    }

    fn race_engine(tiles: u32, faces: &[u32]) -> GameEngine {
        let board = race_board("race", 1, tiles).unwrap();
        let mut engine = GameEngine::with_dice(board, EngineConfig::race(), scripted(faces));
        engine.add_player("Ada", "red").unwrap();
        engine.add_player("Bob", "blue").unwrap();
        engine
    }

    #[test]
    fn first_turn_moves_and_advances() {
        let mut engine = race_engine(4, &[2]);
        let report = engine.take_turn().unwrap();
        assert_eq!(engine.players()[0].current_tile(), TileId(3));
        assert_eq!(engine.current_index(), 1);
        assert!(!report.race_won);
        assert!(!report.economy_won);
        assert_eq!(report.dice_total(), 2);
        assert_eq!(engine.state(), TurnState::AwaitingRoll(1));
    }

    #[test]
    fn no_players_is_an_error_without_side_effects() {
        let board = race_board("race", 1, 4).unwrap();
        let mut engine = GameEngine::with_dice(board, EngineConfig::race(), scripted(&[3]));
        let (tx, rx) = mpsc::channel();
        engine.subscribe(ChannelObserver(tx));
        assert!(matches!(engine.take_turn(), Err(EngineError::NoPlayers)));
        assert_eq!(engine.turn_number(), 0);
        assert_eq!(engine.state(), TurnState::AwaitingRoll(0));
        assert_eq!(engine.dice().faces(), &[0]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn teleport_to_last_tile_wins() {
        let mut board = race_board("race", 1, 6).unwrap();
        board
            .set_action(TileId(3), Some(TileAction::teleport(TileId(6), "ladder")))
            .unwrap();
        let mut engine = GameEngine::with_dice(board, EngineConfig::race(), scripted(&[2]));
        engine.add_player("Ada", "red").unwrap();
        engine.add_player("Bob", "blue").unwrap();

        let report = engine.take_turn().unwrap();
        assert_eq!(report.landed, TileId(3));
        assert_eq!(report.to, TileId(6));
        assert!(report.race_won);
        assert!(engine.is_over());
        assert_eq!(engine.winner().map(Player::name), Some("Ada"));
        assert_eq!(engine.current_index(), 0);

        let err = engine.take_turn().unwrap_err();
        assert!(matches!(err, EngineError::GameOver { ref winner } if winner == "Ada"));
        assert_eq!(engine.turn_number(), 1);
    }

    #[test]
    fn failed_teleport_keeps_position_and_turn_order() {
        let mut board = race_board("race", 1, 6).unwrap();
        board
            .set_action(TileId(3), Some(TileAction::teleport(TileId(60), "broken")))
            .unwrap();
        let mut engine = GameEngine::with_dice(board, EngineConfig::race(), scripted(&[2]));
        engine.add_player("Ada", "red").unwrap();
        engine.add_player("Bob", "blue").unwrap();

        let report = engine.take_turn().unwrap();
        assert_eq!(report.to, TileId(3));
        assert_eq!(report.action, None);
        assert_eq!(engine.players()[0].current_tile(), TileId(3));
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn skipped_player_loses_exactly_one_turn() {
        let mut board = race_board("race", 1, 10).unwrap();
        board
            .set_action(TileId(3), Some(TileAction::lose_turn("Jail")))
            .unwrap();
        let mut engine = GameEngine::with_dice(board, EngineConfig::race(), scripted(&[2, 1, 1]));
        engine.add_player("Ada", "red").unwrap();
        engine.add_player("Bob", "blue").unwrap();

        let first = engine.take_turn().unwrap();
        assert!(first.skipped_after);
        assert_eq!(first.action, Some(ActionOutcome::TurnLost));
        engine.take_turn().unwrap();

        let faces_before = engine.dice().faces().to_vec();
        let skipped = engine.take_turn().unwrap();
        assert!(skipped.skipped_before);
        assert!(!skipped.skipped_after);
        assert!(skipped.roll.is_none());
        assert_eq!(skipped.to, TileId(3));
        assert_eq!(engine.dice().faces(), faces_before.as_slice());
        assert!(!engine.players()[0].is_skipped());

        engine.take_turn().unwrap();
        let again = engine.take_turn().unwrap();
        assert_eq!(again.player, "Ada");
        assert!(again.roll.is_some());
        assert_eq!(again.from, TileId(3));
    }

    #[test]
    fn movement_stops_at_last_tile() {
        let mut engine = race_engine(4, &[6]);
        let report = engine.take_turn().unwrap();
        assert_eq!(report.to, TileId(4));
        assert!(report.race_won);
    }

    #[test]
    fn lap_bonus_on_circuit() {
        let mut board = economy_board("eco", 3, 3).unwrap();
        board
            .set_action(
                TileId(3),
                Some(TileAction::gain_funds(500, "Dividend").unwrap()),
            )
            .unwrap();
        let config = EngineConfig::economy()
            .with_starting_balance(300)
            .with_lap_bonus(100)
            .with_dice(1);
        let config = EngineConfig {
            ruleset: Ruleset::Economy {
                winning_balance: 900,
            },
            ..config
        };
        let mut engine = GameEngine::with_dice(board, config, scripted(&[2, 6]));
        engine.add_player("Ada", "red").unwrap();
        engine.add_player("Bob", "blue").unwrap();

        let first = engine.take_turn().unwrap();
        assert_eq!(first.balance, 800);
        assert!(!first.economy_won);
        assert!(!first.race_won);

        // Bob: 1 -> 7, no bonus.
        engine.take_turn().unwrap();

        let third = engine.take_turn().unwrap();
        assert_eq!(third.to, TileId(5));
        assert_eq!(third.lap_bonus, 0);

        // Bob: 7 + 6 steps on an 8-tile loop passes tile 1 once.
        let fourth = engine.take_turn().unwrap();
        assert_eq!(fourth.to, TileId(5));
        assert_eq!(fourth.lap_bonus, 100);
        assert_eq!(fourth.balance, 400);
    }

    #[test]
    fn economy_threshold_wins() {
        let mut board = economy_board("eco", 3, 3).unwrap();
        board
            .set_action(
                TileId(3),
                Some(TileAction::gain_funds(500, "Dividend").unwrap()),
            )
            .unwrap();
        let config = EngineConfig::for_ruleset(Ruleset::Economy {
            winning_balance: 2000,
        })
        .with_dice(1);
        let mut engine = GameEngine::with_dice(board, config, scripted(&[2]));
        engine.add_player("Ada", "red").unwrap();
        engine.add_player("Bob", "blue").unwrap();

        let report = engine.take_turn().unwrap();
        assert_eq!(report.balance, 2000);
        assert!(report.economy_won);
        assert!(!report.race_won);
        assert_eq!(engine.winner().map(Player::name), Some("Ada"));
    }

    #[test]
    fn race_ruleset_ignores_balance() {
        let board = race_board("race", 1, 20).unwrap();
        let config = EngineConfig::race().with_starting_balance(1_000_000);
        let mut engine = GameEngine::with_dice(board, config, scripted(&[1]));
        engine.add_player("Ada", "red").unwrap();
        let report = engine.take_turn().unwrap();
        assert!(!report.economy_won);
        assert!(!engine.is_over());
    }

    #[test]
    fn gain_then_lose_scenario_clamps() {
        let mut board = race_board("race", 1, 10).unwrap();
        board
            .set_action(TileId(2), Some(TileAction::gain_funds(500, "").unwrap()))
            .unwrap();
        board
            .set_action(TileId(3), Some(TileAction::lose_funds(800, "").unwrap()))
            .unwrap();
        let config = EngineConfig::race().with_starting_balance(300);
        let mut engine = GameEngine::with_dice(board, config, scripted(&[1]));
        engine.add_player("Ada", "red").unwrap();
        engine.take_turn().unwrap();
        assert_eq!(engine.players()[0].balance(), 800);
        engine.take_turn().unwrap();
        assert_eq!(engine.players()[0].balance(), 0);
    }

    #[test]
    fn observers_notified_once_in_order() {
        let mut engine = race_engine(10, &[1]);
        let (tx, rx) = mpsc::channel();
        let first = tx.clone();
        engine.subscribe(move |r: &TurnReport| {
            let _ = first.send(format!("a{}", r.turn));
        });
        engine.subscribe(move |r: &TurnReport| {
            let _ = tx.send(format!("b{}", r.turn));
        });
        engine.take_turn().unwrap();
        engine.take_turn().unwrap();
        let seen: Vec<String> = rx.try_iter().collect();
        assert_eq!(seen, vec!["a1", "b1", "a2", "b2"]);
    }

    #[test]
    fn duplicate_players_rejected() {
        let mut engine = race_engine(4, &[1]);
        assert!(matches!(
            engine.add_player("ada", "green"),
            Err(EngineError::DuplicatePlayer(_))
        ));
        assert_eq!(engine.players().len(), 2);
    }

    #[test]
    fn restored_player_on_missing_tile_rejected() {
        let board = race_board("race", 1, 4).unwrap();
        let players = vec![Player::new("Ada", "red", TileId(9)).unwrap()];
        let err = GameEngine::restore(board, players, EngineConfig::race()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::UnknownTile(TileId(9)))
        ));
    }

    #[test]
    fn standings_follow_ruleset() {
        let board = race_board("race", 1, 10).unwrap();
        let players = vec![
            Player::new("Ada", "red", TileId(2)).unwrap().with_balance(900),
            Player::new("Bob", "blue", TileId(7)).unwrap().with_balance(100),
        ];
        let engine = GameEngine::restore(board.clone(), players.clone(), EngineConfig::race()).unwrap();
        assert_eq!(engine.standings()[0].name(), "Bob");
        let engine = GameEngine::restore(board, players, EngineConfig::economy()).unwrap();
        assert_eq!(engine.standings()[0].name(), "Ada");
        assert_eq!(engine.player("BOB").map(Player::balance), Some(100));
    }

    #[test]
    fn seeded_games_replay_identically() {
        let run = || {
            let board = race_board("race", 5, 5).unwrap();
            let mut engine = GameEngine::new(board, EngineConfig::race().with_seed(11));
            engine.add_player("Ada", "red").unwrap();
            engine.add_player("Bob", "blue").unwrap();
            (0..10)
                .map(|_| engine.take_turn().ok().map(|r| r.to))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn configured_die_kind_is_rolled() {
        let board = race_board("race", 10, 10).unwrap();
        let config = EngineConfig::race().with_dice(3).with_die(Die::D20).with_seed(4);
        let mut engine = GameEngine::new(board, config);
        engine.add_player("Ada", "red").unwrap();
        assert_eq!(engine.dice().die(), Die::D20);
        assert_eq!(engine.dice().len(), 3);
        let report = engine.take_turn().unwrap();
        let roll = report.roll.unwrap();
        assert_eq!(roll.faces.len(), 3);
        assert!(roll.faces.iter().all(|f| (1..=20).contains(f)));
    }

    proptest! {
        #[test]
        fn turn_index_wraps_until_game_over(
            faces in proptest::collection::vec(1u32..=6, 1..8),
            players in 1usize..5,
            turns in 1usize..30,
        ) {
            let board = race_board("race", 10, 10).unwrap();
            let dice = DiceSet::with_source(1, Die::D6, ScriptedFaces::new(faces));
            let mut engine = GameEngine::with_dice(board, EngineConfig::race(), dice);
            for i in 0..players {
                engine.add_player(&format!("P{i}"), "grey").unwrap();
            }
            for t in 0..turns {
                if engine.is_over() {
                    break;
                }
                prop_assert_eq!(engine.current_index(), t % players);
                let report = engine.take_turn().unwrap();
                prop_assert_eq!(&report.player, &format!("P{}", t % players));
            }
        }
    }
}
