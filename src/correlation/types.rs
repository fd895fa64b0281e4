use parser_dump::{Flag, Member, Player, Squad, SteamId, Vehicle};
use serde::Serialize;

/// Shown when an owner's Steam ID is missing from the player dump
pub const UNKNOWN_OWNER: &str = "Unknown owner";

/// Shown for vehicles nobody has claimed
pub const NO_OWNER: &str = "No owner";

/// Who a flag or vehicle belongs to, as far as the player dump can tell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ownership<'a> {
    /// The dump names no owner
    Unowned,
    /// The owner is not in the player dump
    Unknown(&'a SteamId),
    Known(&'a Player),
}

impl<'a> Ownership<'a> {
    pub fn display_name(&self) -> &'a str {
        match *self {
            Ownership::Unowned => NO_OWNER,
            Ownership::Unknown(_) => UNKNOWN_OWNER,
            Ownership::Known(player) => &player.name,
        }
    }

    pub fn steam_id(&self) -> Option<&'a SteamId> {
        match *self {
            Ownership::Unowned => None,
            Ownership::Unknown(id) => Some(id),
            Ownership::Known(player) => Some(&player.steam_id),
        }
    }

    pub fn player(&self) -> Option<&'a Player> {
        match *self {
            Ownership::Known(player) => Some(player),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Ownership::Unknown(_))
    }
}

/// A player with everything the other dumps say about them
#[derive(Debug, Clone)]
pub struct PlayerView<'a> {
    pub player: &'a Player,
    pub squad: Option<&'a Squad>,
    /// The player's entry in their squad's member list
    pub membership: Option<&'a Member>,
    pub flags: Vec<&'a Flag>,
    pub vehicles: Vec<&'a Vehicle>,
}

impl PlayerView<'_> {
    pub fn is_squad_leader(&self) -> bool {
        self.membership.is_some_and(Member::is_leader)
    }
}

/// A squad member joined with their player record, if present
#[derive(Debug, Clone)]
pub struct MemberView<'a> {
    pub member: &'a Member,
    pub player: Option<&'a Player>,
}

#[derive(Debug, Clone)]
pub struct SquadView<'a> {
    pub squad: &'a Squad,
    pub members: Vec<MemberView<'a>>,
    pub leader: Option<&'a Member>,
    /// Leader's player record; absent when the leader is not in the player dump
    pub leader_player: Option<&'a Player>,
}

#[derive(Debug, Clone)]
pub struct FlagView<'a> {
    pub flag: &'a Flag,
    pub owner: Ownership<'a>,
}

#[derive(Debug, Clone)]
pub struct VehicleView<'a> {
    pub vehicle: &'a Vehicle,
    pub owner: Ownership<'a>,
}

/// Flags and vehicles whose owner never appears in the player dump
#[derive(Debug, Clone, Default)]
pub struct Orphans<'a> {
    pub flags: Vec<&'a Flag>,
    pub vehicles: Vec<&'a Vehicle>,
}

/// Counts derived from one correlation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DumpStats {
    pub players: usize,
    pub squads: usize,
    pub flags: usize,
    pub vehicles: usize,
    pub players_without_squad: usize,
    pub squads_without_leader: usize,
    pub unresolved_flag_owners: usize,
    pub unresolved_vehicle_owners: usize,
    pub unowned_vehicles: usize,
}
