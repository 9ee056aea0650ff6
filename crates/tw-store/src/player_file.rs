//! Line-based player save files.
//!
//! One player per line: `name,color,balance,currentTileId`. Blank lines and
//! lines starting with `#` are ignored. Malformed lines are skipped with a
//! warning so that one bad record never loses the whole roster.

use std::io::{BufRead, BufReader, Read, Write};

use log::warn;

use tw_core::{CoreResult, Player, PlayerReader, PlayerWriter, TileId};

/// Reads and writes the player save format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerLineFormat;

impl PlayerReader for PlayerLineFormat {
    fn read(&self, source: &mut dyn Read) -> CoreResult<Vec<Player>> {
        let mut players = Vec::new();
        for (index, bytes) in BufReader::new(source).split(b'\n').enumerate() {
            let Ok(line) = String::from_utf8(bytes?) else {
                warn!("skipping player record on line {}: not valid UTF-8", index + 1);
                continue;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match parse_line(trimmed) {
                Ok(player) => players.push(player),
                Err(reason) => warn!("skipping player record on line {}: {reason}", index + 1),
            }
        }
        Ok(players)
    }
}

impl PlayerWriter for PlayerLineFormat {
    fn write(&self, players: &[Player], destination: &mut dyn Write) -> CoreResult<()> {
        for player in players {
            writeln!(
                destination,
                "{},{},{},{}",
                player.name(),
                player.color(),
                player.balance(),
                player.current_tile()
            )?;
        }
        destination.flush()?;
        Ok(())
    }
}

fn parse_line(line: &str) -> Result<Player, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, color, balance, tile] = fields.as_slice() else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };
    let balance: u64 = balance
        .parse()
        .map_err(|_| format!("balance {balance:?} is not a non-negative integer"))?;
    let tile: u32 = tile
        .parse()
        .map_err(|_| format!("tile id {tile:?} is not a non-negative integer"))?;
    let player = Player::new(*name, *color, TileId(tile)).map_err(|e| e.to_string())?;
    Ok(player.with_balance(balance))
}
