//! Renders a correlated dump set for the terminal or as JSON.

use std::fmt::{self, Write};

use parser_dump::{DumpKind, Flag, Member, Player, SteamId, Vehicle};
use serde::Serialize;

use crate::correlation::{Correlation, DumpStats, PlayerView, SquadView};
use crate::error::Result;
use crate::query::{matches_player, page_count, paginate};
use crate::types::{DumpSet, OutputFormat, ScannerConfig};

#[derive(Debug, Serialize)]
pub struct PlayerEntry<'a> {
    #[serde(flatten)]
    pub player: &'a Player,
    pub squad_id: Option<u64>,
    pub squad_name: Option<&'a str>,
    pub squad_rank: Option<u8>,
    pub flag_ids: Vec<u64>,
    pub vehicle_ids: Vec<u64>,
}

impl<'a> From<&PlayerView<'a>> for PlayerEntry<'a> {
    fn from(view: &PlayerView<'a>) -> Self {
        Self {
            player: view.player,
            squad_id: view.squad.map(|s| s.id),
            squad_name: view.squad.map(|s| s.name.as_str()),
            squad_rank: view.membership.map(|m| m.rank),
            flag_ids: view.flags.iter().map(|f| f.id).collect(),
            vehicle_ids: view.vehicles.iter().map(|v| v.id).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberEntry<'a> {
    #[serde(flatten)]
    pub member: &'a Member,
    /// Whether the member shows up in the player dump
    pub in_player_dump: bool,
}

#[derive(Debug, Serialize)]
pub struct SquadEntry<'a> {
    pub id: u64,
    pub name: &'a str,
    pub leader: Option<&'a SteamId>,
    pub leader_name: Option<&'a str>,
    pub members: Vec<MemberEntry<'a>>,
}

impl<'a> From<&SquadView<'a>> for SquadEntry<'a> {
    fn from(view: &SquadView<'a>) -> Self {
        Self {
            id: view.squad.id,
            name: &view.squad.name,
            leader: view.squad.leader.as_ref(),
            leader_name: view
                .leader_player
                .map(|p| p.name.as_str())
                .or(view.leader.map(|m| m.character_name.as_str())),
            members: view
                .members
                .iter()
                .map(|m| MemberEntry {
                    member: m.member,
                    in_player_dump: m.player.is_some(),
                })
                .collect(),
        }
    }
}

/// Document written by `--format json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub loaded: Vec<DumpKind>,
    pub stats: DumpStats,
    pub page: usize,
    pub pages: usize,
    pub players: Vec<PlayerEntry<'a>>,
    pub squads: Vec<SquadEntry<'a>>,
    pub flags: &'a [Flag],
    pub vehicles: &'a [Vehicle],
}

/// Player views passing the configured search, then paged
fn listed_players<'a>(views: &[PlayerView<'a>], config: &ScannerConfig) -> (Vec<PlayerView<'a>>, usize) {
    let term = config.search.as_deref().unwrap_or("");
    let filtered: Vec<PlayerView<'a>> = views
        .iter()
        .filter(|view| matches_player(view.player, term))
        .cloned()
        .collect();
    let pages = page_count(filtered.len(), config.per_page);
    let page = paginate(&filtered, config.page, config.per_page).to_vec();
    (page, pages)
}

pub fn render_json(dumps: &DumpSet, config: &ScannerConfig) -> Result<String> {
    let correlation = Correlation::resolve(dumps);
    let (players, pages) = listed_players(&correlation.player_views(), config);

    let report = JsonReport {
        loaded: dumps.loaded().collect(),
        stats: correlation.stats(),
        page: config.page,
        pages,
        players: players.iter().map(PlayerEntry::from).collect(),
        squads: correlation.squad_views().iter().map(SquadEntry::from).collect(),
        flags: &dumps.flags,
        vehicles: &dumps.vehicles,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_summary(dumps: &DumpSet, config: &ScannerConfig) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_summary(&mut out, dumps, config);
    out
}

fn write_summary(out: &mut String, dumps: &DumpSet, config: &ScannerConfig) -> fmt::Result {
    let correlation = Correlation::resolve(dumps);
    let stats = correlation.stats();

    writeln!(out, "Dumps loaded: {}/{}", dumps.loaded_count(), DumpKind::ALL.len())?;
    for kind in DumpKind::ALL {
        let status = if dumps.is_loaded(kind) { "" } else { " (not loaded)" };
        writeln!(out, "  {:<9} {:>5}{}", kind.label(), dumps.count(kind), status)?;
    }

    let (players, pages) = listed_players(&correlation.player_views(), config);
    if !players.is_empty() {
        writeln!(out, "\nPlayers (page {} of {}):", config.page + 1, pages)?;
        writeln!(
            out,
            "  {:>4}  {:<20} {:<20} {:>6} {:>10} {:>6}  {:<16} {:>5} {:>8}",
            "#", "Name", "Steam", "Fame", "Balance", "Gold", "Squad", "Flags", "Vehicles"
        )?;
        for view in &players {
            let p = view.player;
            let squad = match (view.squad, view.is_squad_leader()) {
                (Some(s), true) => format!("{} *", s.name),
                (Some(s), false) => s.name.clone(),
                (None, _) => "-".to_string(),
            };
            writeln!(
                out,
                "  {:>4}  {:<20} {:<20} {:>6} {:>10} {:>6}  {:<16} {:>5} {:>8}",
                p.ordinal,
                p.name,
                p.account_name,
                p.fame,
                p.account_balance,
                p.gold_balance,
                squad,
                view.flags.len(),
                view.vehicles.len()
            )?;
        }
    } else if config.search.is_some() && !dumps.players.is_empty() {
        writeln!(out, "\nNo players match the search")?;
    }

    let squads = correlation.squad_views();
    if !squads.is_empty() {
        writeln!(out, "\nSquads:")?;
        for view in &squads {
            let leader = match (view.leader_player, view.leader) {
                (Some(player), _) => player.name.clone(),
                (None, Some(member)) => format!("{} (not online)", member.character_name),
                (None, None) => "no leader".to_string(),
            };
            writeln!(
                out,
                "  [{}] {}: {} members, leader {}",
                view.squad.id,
                view.squad.name,
                view.members.len(),
                leader
            )?;
        }
    }

    let orphans = correlation.orphans();
    if !orphans.flags.is_empty() || !orphans.vehicles.is_empty() {
        writeln!(out, "\nOwners missing from the player dump:")?;
        for flag in &orphans.flags {
            writeln!(out, "  flag #{} -> {} [{}]", flag.id, flag.owner_name, flag.owner_steam_id)?;
        }
        for vehicle in &orphans.vehicles {
            let owner = vehicle.owner_steam_id.as_ref().map_or("", SteamId::as_str);
            writeln!(out, "  vehicle #{} {} -> [{}]", vehicle.id, vehicle.kind, owner)?;
        }
    }

    writeln!(
        out,
        "\n{} players without squad, {} unowned vehicles",
        stats.players_without_squad, stats.unowned_vehicles
    )?;

    Ok(())
}

/// Render in the configured output format
pub fn render(dumps: &DumpSet, config: &ScannerConfig) -> Result<String> {
    match config.format {
        OutputFormat::Summary => Ok(render_summary(dumps, config)),
        OutputFormat::Json => render_json(dumps, config),
    }
}
