//! Parsers for SCUM admin console dumps
//!
//! Each of the four admin listings gets its own line parser:
//! - `ListPlayers` - multi-line player blocks
//! - `DumpAllSquadsInfoList` - squad headers followed by member lines
//! - `ListFlags` - one flag per line
//! - `ListSpawnedVehicles` - one vehicle per line
//!
//! Parsing is best effort and never fails: unmatched lines are skipped and
//! unreadable numbers become zero. An empty record list for non-empty text
//! is the only hint that the wrong dump was pasted.
//!
//! # Examples
//!
//! ```rust
//! use parser_dump::{parse_players, parse_squads};
//!
//! let players = parse_players("3. Ghost\nSteam: Ghosty (76561198000000003)\nFame: 120");
//! assert_eq!(players[0].steam_id.as_str(), "76561198000000003");
//! assert_eq!(players[0].fame, 120);
//!
//! let squads = parse_squads("[SquadId: 7 SquadName: Reapers]\n\
//!     SteamId: 111 SteamName: A CharacterName: Al MemberRank: 4");
//! assert_eq!(squads[0].leader.as_ref().map(|id| id.as_str()), Some("111"));
//! ```
//!
//! # Feature Flags
//!
//! - `serde` - Serialize/Deserialize for every record (enabled by default)

pub mod flags;
pub mod grammar;
pub mod models;
pub mod players;
pub mod squads;
pub mod tokenizer;
pub mod vehicles;

pub use flags::{parse_flag_line, parse_flags};
pub use grammar::parse_location;
pub use models::{
    looks_like_steam_id, DumpKind, Flag, Location, Member, Player, Squad, SteamId, UnknownDumpKind,
    Vehicle, LEADER_RANK,
};
pub use players::parse_players;
pub use squads::parse_squads;
pub use tokenizer::tokenize;
pub use vehicles::{owner_from_info, parse_vehicle_line, parse_vehicles};

/// Records parsed from one dump, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedDump {
    Players(Vec<Player>),
    Squads(Vec<Squad>),
    Flags(Vec<Flag>),
    Vehicles(Vec<Vehicle>),
}

impl ParsedDump {
    pub fn kind(&self) -> DumpKind {
        match self {
            ParsedDump::Players(_) => DumpKind::Players,
            ParsedDump::Squads(_) => DumpKind::Squads,
            ParsedDump::Flags(_) => DumpKind::Flags,
            ParsedDump::Vehicles(_) => DumpKind::Vehicles,
        }
    }

    /// Number of records produced
    pub fn len(&self) -> usize {
        match self {
            ParsedDump::Players(records) => records.len(),
            ParsedDump::Squads(records) => records.len(),
            ParsedDump::Flags(records) => records.len(),
            ParsedDump::Vehicles(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a dump with the parser for `kind`
pub fn parse_dump(kind: DumpKind, text: &str) -> ParsedDump {
    match kind {
        DumpKind::Players => ParsedDump::Players(parse_players(text)),
        DumpKind::Squads => ParsedDump::Squads(parse_squads(text)),
        DumpKind::Flags => ParsedDump::Flags(parse_flags(text)),
        DumpKind::Vehicles => ParsedDump::Vehicles(parse_vehicles(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_dispatches_by_kind() {
        let parsed = parse_dump(DumpKind::Squads, "[SquadId: 1 SquadName: A]\n[SquadId: 2 SquadName: B]");
        assert_eq!(parsed.kind(), DumpKind::Squads);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_wrong_dump_yields_no_records() {
        let players = "1. Bob\nSteam: bob (76561198000000001)";
        for kind in [DumpKind::Squads, DumpKind::Flags, DumpKind::Vehicles] {
            assert!(parse_dump(kind, players).is_empty(), "{kind} parser accepted a player dump");
        }
    }

    #[test]
    fn test_empty_input_for_every_kind() {
        for kind in DumpKind::ALL {
            let parsed = parse_dump(kind, "");
            assert_eq!(parsed.kind(), kind);
            assert!(parsed.is_empty());
        }
    }
}
