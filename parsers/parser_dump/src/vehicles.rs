//! `ListSpawnedVehicles` dump, one vehicle per line.
//!
//! ```text
//! #1042: BPC_Laika 2024-05-01T12:30:00.000Z X=100.0 Y=200.0 Z=10.0 1 76561198000000003 Ghost
//! #1043: BPC_Rager 2024-05-01T12:31:00.000Z X=5.0 Y=6.0 Z=7.0 0 No owner
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::grammar::{compile, float_or_zero, group, int_or_zero, parse_each_line};
use crate::models::{looks_like_steam_id, Location, SteamId, Vehicle};

/// Owner text the server prints for unclaimed vehicles
pub const NO_OWNER_MARKER: &str = "no owner";

static VEHICLE_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(concat!(
        r"^#(\d+):\s*(.+?)\s+",
        r"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)\s+",
        r"X=(\S*?)\s*Y=(\S*?)\s*Z=(\S*)\s+",
        r"(\d+)(?:\s+(.*))?$",
    ))
});

/// Find the owner's Steam ID in the trailing owner text.
///
/// Text mentioning the no-owner marker never yields an owner, whatever else
/// it contains.
pub fn owner_from_info(owner_info: &str) -> Option<SteamId> {
    if owner_info.to_lowercase().contains(NO_OWNER_MARKER) {
        return None;
    }

    owner_info
        .split(|c: char| !c.is_ascii_digit())
        .find(|token| looks_like_steam_id(token))
        .map(SteamId::new)
}

/// Parse one vehicle line
pub fn parse_vehicle_line(line: &str) -> Option<Vehicle> {
    let caps = VEHICLE_LINE.captures(line)?;
    let owner_info = group(&caps, 8).trim();

    Some(Vehicle {
        id: int_or_zero(group(&caps, 1)),
        kind: group(&caps, 2).to_string(),
        spawn_time: group(&caps, 3).to_string(),
        location: Location::new(
            float_or_zero(group(&caps, 4)),
            float_or_zero(group(&caps, 5)),
            float_or_zero(group(&caps, 6)),
        ),
        owner_field: group(&caps, 7).to_string(),
        owner_info: owner_info.to_string(),
        owner_steam_id: owner_from_info(owner_info),
    })
}

/// Parse a `ListSpawnedVehicles` dump into vehicles, in dump order
pub fn parse_vehicles(text: &str) -> Vec<Vehicle> {
    parse_each_line("vehicle", text, parse_vehicle_line)
}
