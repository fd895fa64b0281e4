//! Cross-references the four dumps by Steam ID.
//!
//! Every lookup index is built once per [`Correlation`] and borrows from the
//! parsed records, so a reload simply means resolving again.

pub mod types;

pub use types::*;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, warn};
use parser_dump::{Flag, Member, Player, Squad, SteamId, Vehicle};

use crate::types::DumpSet;

/// Join of players, squads, flags and vehicles on Steam ID
#[derive(Debug, Clone)]
pub struct Correlation<'a> {
    players: &'a [Player],
    squads: &'a [Squad],
    flags: &'a [Flag],
    vehicles: &'a [Vehicle],
    players_by_id: HashMap<&'a SteamId, &'a Player>,
    squads_by_member: HashMap<&'a SteamId, (&'a Squad, &'a Member)>,
    flags_by_owner: HashMap<&'a SteamId, Vec<&'a Flag>>,
    vehicles_by_owner: HashMap<&'a SteamId, Vec<&'a Vehicle>>,
}

impl<'a> Correlation<'a> {
    /// Correlate the current contents of a dump set
    pub fn resolve(dumps: &'a DumpSet) -> Self {
        Self::from_parts(&dumps.players, &dumps.squads, &dumps.flags, &dumps.vehicles)
    }

    /// Correlate four record lists. The inputs are only borrowed.
    pub fn from_parts(
        players: &'a [Player],
        squads: &'a [Squad],
        flags: &'a [Flag],
        vehicles: &'a [Vehicle],
    ) -> Self {
        // Duplicate Steam IDs are not expected; the later record wins
        let mut players_by_id = HashMap::with_capacity(players.len());
        for player in players {
            if players_by_id.insert(&player.steam_id, player).is_some() {
                warn!("Duplicate Steam ID {} in player dump", player.steam_id);
            }
        }

        // A member listed in several squads belongs to the lowest squad id,
        // which is the first one in a dump sorted by id
        let mut squads_by_member: HashMap<&SteamId, (&Squad, &Member)> = HashMap::new();
        for squad in squads {
            for member in &squad.members {
                match squads_by_member.entry(&member.steam_id) {
                    Entry::Vacant(slot) => {
                        slot.insert((squad, member));
                    }
                    Entry::Occupied(mut slot) => {
                        debug!("{} is listed in squads {} and {}", member.steam_id, slot.get().0.id, squad.id);
                        if squad.id < slot.get().0.id {
                            slot.insert((squad, member));
                        }
                    }
                }
            }
        }

        let mut flags_by_owner: HashMap<&SteamId, Vec<&Flag>> = HashMap::new();
        for flag in flags {
            flags_by_owner.entry(&flag.owner_steam_id).or_default().push(flag);
        }

        let mut vehicles_by_owner: HashMap<&SteamId, Vec<&Vehicle>> = HashMap::new();
        for vehicle in vehicles {
            if let Some(owner) = &vehicle.owner_steam_id {
                vehicles_by_owner.entry(owner).or_default().push(vehicle);
            }
        }

        debug!(
            "Correlated {} players, {} squads, {} flag owners, {} vehicle owners",
            players_by_id.len(),
            squads.len(),
            flags_by_owner.len(),
            vehicles_by_owner.len()
        );

        Self {
            players,
            squads,
            flags,
            vehicles,
            players_by_id,
            squads_by_member,
            flags_by_owner,
            vehicles_by_owner,
        }
    }

    pub fn player(&self, steam_id: &SteamId) -> Option<&'a Player> {
        self.players_by_id.get(steam_id).copied()
    }

    /// Squad the Steam ID belongs to, with its member entry
    pub fn membership(&self, steam_id: &SteamId) -> Option<(&'a Squad, &'a Member)> {
        self.squads_by_member.get(steam_id).copied()
    }

    pub fn squad_of(&self, steam_id: &SteamId) -> Option<&'a Squad> {
        self.membership(steam_id).map(|(squad, _)| squad)
    }

    pub fn flags_of(&self, steam_id: &SteamId) -> &[&'a Flag] {
        self.flags_by_owner.get(steam_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vehicles_of(&self, steam_id: &SteamId) -> &[&'a Vehicle] {
        self.vehicles_by_owner.get(steam_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn flags_by_owner(&self) -> &HashMap<&'a SteamId, Vec<&'a Flag>> {
        &self.flags_by_owner
    }

    pub fn vehicles_by_owner(&self) -> &HashMap<&'a SteamId, Vec<&'a Vehicle>> {
        &self.vehicles_by_owner
    }

    fn owner(&self, steam_id: Option<&'a SteamId>) -> Ownership<'a> {
        match steam_id {
            None => Ownership::Unowned,
            Some(id) => self.player(id).map_or(Ownership::Unknown(id), Ownership::Known),
        }
    }

    /// Every player in dump order, with squad, flags and vehicles attached
    pub fn player_views(&self) -> Vec<PlayerView<'a>> {
        self.players
            .iter()
            .map(|player| {
                let membership = self.membership(&player.steam_id);
                PlayerView {
                    player,
                    squad: membership.map(|(squad, _)| squad),
                    membership: membership.map(|(_, member)| member),
                    flags: self.flags_of(&player.steam_id).to_vec(),
                    vehicles: self.vehicles_of(&player.steam_id).to_vec(),
                }
            })
            .collect()
    }

    pub fn squad_views(&self) -> Vec<SquadView<'a>> {
        self.squads
            .iter()
            .map(|squad| {
                let leader = squad.leader_member();
                SquadView {
                    squad,
                    members: squad
                        .members
                        .iter()
                        .map(|member| MemberView {
                            member,
                            player: self.player(&member.steam_id),
                        })
                        .collect(),
                    leader,
                    leader_player: leader.and_then(|m| self.player(&m.steam_id)),
                }
            })
            .collect()
    }

    pub fn flag_views(&self) -> Vec<FlagView<'a>> {
        self.flags
            .iter()
            .map(|flag| FlagView {
                flag,
                owner: self.owner(Some(&flag.owner_steam_id)),
            })
            .collect()
    }

    pub fn vehicle_views(&self) -> Vec<VehicleView<'a>> {
        self.vehicles
            .iter()
            .map(|vehicle| VehicleView {
                vehicle,
                owner: self.owner(vehicle.owner_steam_id.as_ref()),
            })
            .collect()
    }

    pub fn orphans(&self) -> Orphans<'a> {
        Orphans {
            flags: self
                .flags
                .iter()
                .filter(|flag| self.player(&flag.owner_steam_id).is_none())
                .collect(),
            vehicles: self
                .vehicles
                .iter()
                .filter(|vehicle| {
                    vehicle
                        .owner_steam_id
                        .as_ref()
                        .is_some_and(|id| self.player(id).is_none())
                })
                .collect(),
        }
    }

    pub fn stats(&self) -> DumpStats {
        let orphans = self.orphans();
        DumpStats {
            players: self.players.len(),
            squads: self.squads.len(),
            flags: self.flags.len(),
            vehicles: self.vehicles.len(),
            players_without_squad: self
                .players
                .iter()
                .filter(|p| self.membership(&p.steam_id).is_none())
                .count(),
            squads_without_leader: self.squads.iter().filter(|s| s.leader.is_none()).count(),
            unresolved_flag_owners: orphans.flags.len(),
            unresolved_vehicle_owners: orphans.vehicles.len(),
            unowned_vehicles: self.vehicles.iter().filter(|v| v.owner_steam_id.is_none()).count(),
        }
    }
}
