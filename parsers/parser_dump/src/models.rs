//! Records produced by the dump parsers.
//!
//! Every record is built fresh from one complete dump and never mutated
//! once the parser hands it back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a SteamID64 in decimal digits
pub const STEAM_ID_LEN: usize = 17;

/// Every individual-account SteamID64 starts with these digits
pub const STEAM_ID_PREFIX: &str = "7656119";

/// Account identity shared by all four dumps.
///
/// The value is kept as text: SteamID64 values do not fit in the integer
/// range some consumers use, and nothing ever does arithmetic on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct SteamId(String);

impl SteamId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SteamId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SteamId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SteamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check whether a token looks like a SteamID64.
///
/// Only a fixed-length, all-digit token carrying the individual-account
/// prefix qualifies, so vehicle ids and coordinates never pass.
pub fn looks_like_steam_id(token: &str) -> bool {
    token.len() == STEAM_ID_LEN
        && token.bytes().all(|b| b.is_ascii_digit())
        && token.starts_with(STEAM_ID_PREFIX)
}

/// World position in game units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X={:.0} Y={:.0} Z={:.0}", self.x, self.y, self.z)
    }
}

/// One entry of the `ListPlayers` dump
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    /// Position of the player in the dump, as printed by the server
    pub ordinal: u32,
    /// Character name shown in game
    pub name: String,
    /// Steam profile name
    pub account_name: String,
    pub steam_id: SteamId,
    pub fame: u64,
    /// Bank balance, may go negative
    pub account_balance: i64,
    pub gold_balance: u64,
    pub location: Location,
}

impl Player {
    /// Start a record from an anchor line, every other field at its default
    pub fn new(ordinal: u32, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Squad member rank that marks the leader
pub const LEADER_RANK: u8 = 4;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    pub steam_id: SteamId,
    pub steam_name: String,
    pub character_name: String,
    /// 1 to 4, where 4 is the leader
    pub rank: u8,
}

impl Member {
    pub fn is_leader(&self) -> bool {
        self.rank == LEADER_RANK
    }
}

/// One block of the `DumpAllSquadsInfoList` dump
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Squad {
    pub id: u64,
    pub name: String,
    /// Key of the rank-4 member, if the squad has one
    pub leader: Option<SteamId>,
    pub members: Vec<Member>,
}

impl Squad {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            leader: None,
            members: Vec::new(),
        }
    }

    /// Append a member, promoting it to leader when it carries the leader rank
    pub fn push_member(&mut self, member: Member) {
        if member.is_leader() {
            self.leader = Some(member.steam_id.clone());
        }
        self.members.push(member);
    }

    pub fn leader_member(&self) -> Option<&Member> {
        let leader = self.leader.as_ref()?;
        self.members.iter().find(|m| &m.steam_id == leader)
    }
}

/// One line of the `ListFlags` dump
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flag {
    pub id: u64,
    pub owner_steam_id: SteamId,
    /// Owner name as printed in the flag dump
    pub owner_name: String,
    /// Owner's in-game ordinal as printed in the flag dump
    pub owner_ordinal: u32,
    pub location: Location,
}

/// One line of the `ListSpawnedVehicles` dump
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vehicle {
    pub id: u64,
    /// Blueprint name, free text
    pub kind: String,
    /// ISO-8601 spawn time exactly as printed
    pub spawn_time: String,
    pub location: Location,
    /// Numeric column printed before the owner info
    pub owner_field: String,
    /// Trailing owner text, verbatim
    pub owner_info: String,
    pub owner_steam_id: Option<SteamId>,
}

impl Vehicle {
    pub fn spawned_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.spawn_time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Admin console command that produces each dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DumpKind {
    Players,
    Squads,
    Flags,
    Vehicles,
}

impl DumpKind {
    pub const ALL: [DumpKind; 4] = [
        DumpKind::Players,
        DumpKind::Squads,
        DumpKind::Flags,
        DumpKind::Vehicles,
    ];

    pub fn command(&self) -> &'static str {
        match self {
            DumpKind::Players => "ListPlayers",
            DumpKind::Squads => "DumpAllSquadsInfoList",
            DumpKind::Flags => "ListFlags",
            DumpKind::Vehicles => "ListSpawnedVehicles",
        }
    }

    /// Short lowercase label, also accepted by `from_str`
    pub fn label(&self) -> &'static str {
        match self {
            DumpKind::Players => "players",
            DumpKind::Squads => "squads",
            DumpKind::Flags => "flags",
            DumpKind::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for DumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dump kind: {0}")]
pub struct UnknownDumpKind(pub String);

impl FromStr for DumpKind {
    type Err = UnknownDumpKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DumpKind::ALL
            .into_iter()
            .find(|kind| {
                lower == kind.label()
                    || lower == kind.label().trim_end_matches('s')
                    || lower == kind.command().to_lowercase()
            })
            .ok_or_else(|| UnknownDumpKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("76561198000000003", true; "individual account")]
    #[test_case("7656119800000000", false; "one digit short")]
    #[test_case("765611980000000031", false; "one digit long")]
    #[test_case("12345678901234567", false; "wrong prefix")]
    #[test_case("7656119800000000a", false; "non digit")]
    #[test_case("", false; "empty")]
    fn test_looks_like_steam_id(token: &str, expected: bool) {
        assert_eq!(looks_like_steam_id(token), expected);
    }

    #[test]
    fn test_squad_leader_tracking() {
        let mut squad = Squad::new(7, "Reapers");
        squad.push_member(Member {
            steam_id: "222".into(),
            rank: 1,
            ..Default::default()
        });
        assert!(squad.leader.is_none());
        assert!(squad.leader_member().is_none());

        squad.push_member(Member {
            steam_id: "111".into(),
            rank: 4,
            ..Default::default()
        });
        assert_eq!(squad.leader, Some(SteamId::from("111")));
        assert_eq!(squad.leader_member().map(|m| m.rank), Some(4));
    }

    #[test]
    fn test_vehicle_spawned_at() {
        let vehicle = Vehicle {
            spawn_time: "2024-05-01T12:30:00.000Z".to_string(),
            ..Default::default()
        };
        let at = vehicle.spawned_at().expect("timestamp should parse");
        assert_eq!(at.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let broken = Vehicle {
            spawn_time: "yesterday".to_string(),
            ..Default::default()
        };
        assert!(broken.spawned_at().is_none());
    }

    #[test_case("players", DumpKind::Players)]
    #[test_case("Squad", DumpKind::Squads)]
    #[test_case("ListFlags", DumpKind::Flags)]
    #[test_case("listspawnedvehicles", DumpKind::Vehicles)]
    fn test_dump_kind_from_str(input: &str, expected: DumpKind) {
        assert_eq!(input.parse::<DumpKind>(), Ok(expected));
    }

    #[test]
    fn test_dump_kind_unknown() {
        let err = "inventory".parse::<DumpKind>().unwrap_err();
        assert_eq!(err, UnknownDumpKind("inventory".to_string()));
        assert_eq!(err.to_string(), "unknown dump kind: inventory");
    }
}
