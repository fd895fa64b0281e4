//! `ListPlayers` dump.
//!
//! ```text
//! 3. Ghost
//! Steam: Ghosty (76561198000000003)
//! Fame: 120
//! Account balance: -50
//! Gold balance: 0
//! Location: X=100.5 Y=200.25 Z=10.0
//! ```

use once_cell::sync::Lazy;
use regex::Captures;

use crate::grammar::{compile, group, int_or_zero, parse_location, FieldRule, RecordGrammar};
use crate::models::{Player, SteamId};

static PLAYER_GRAMMAR: Lazy<RecordGrammar<Player>> = Lazy::new(|| RecordGrammar {
    record: "player",
    anchor: compile(r"^(\d+)\.\s*(.+)$"),
    start: start_player,
    fields: vec![
        FieldRule::new("steam", r"^Steam:\s*(.+?)\s*\((\d+)\)$", set_steam),
        FieldRule::new("fame", r"^Fame:\s*(.*)$", set_fame),
        FieldRule::new("account balance", r"^Account balance:\s*(.*)$", set_account_balance),
        FieldRule::new("gold balance", r"^Gold balance:\s*(.*)$", set_gold_balance),
        FieldRule::new("location", r"^Location:\s*(.*)$", set_location),
    ],
});

fn start_player(caps: &Captures<'_>) -> Player {
    Player::new(int_or_zero(group(caps, 1)), group(caps, 2).trim())
}

fn set_steam(player: &mut Player, caps: &Captures<'_>) {
    player.account_name = group(caps, 1).to_string();
    player.steam_id = SteamId::new(group(caps, 2));
}

fn set_fame(player: &mut Player, caps: &Captures<'_>) {
    player.fame = int_or_zero(group(caps, 1));
}

fn set_account_balance(player: &mut Player, caps: &Captures<'_>) {
    player.account_balance = int_or_zero(group(caps, 1));
}

fn set_gold_balance(player: &mut Player, caps: &Captures<'_>) {
    player.gold_balance = int_or_zero(group(caps, 1));
}

/// Unreadable clauses leave the player at the origin
fn set_location(player: &mut Player, caps: &Captures<'_>) {
    player.location = parse_location(group(caps, 1)).unwrap_or_default();
}

/// Parse a `ListPlayers` dump into players, in dump order
pub fn parse_players(text: &str) -> Vec<Player> {
    PLAYER_GRAMMAR.parse(text)
}
