//! `ListFlags` dump, one flag per line.
//!
//! ```text
//! Flag ID: 17 | Owner: [76561198000000003] Ghost (3) | Location: X=100 Y=200 Z=10
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::grammar::{compile, group, int_or_zero, parse_each_line, parse_location};
use crate::models::{Flag, SteamId};
use crate::tokenizer::PAGINATION_MARKER;

static FLAG_LINE: Lazy<Regex> = Lazy::new(|| {
    compile(r"^Flag ID:\s*(\d+)\s*\|\s*Owner:\s*\[(\d+)\]\s*(.*?)\s*\((\d+)\)\s*\|\s*Location:\s*(.*)$")
});

/// Parse one flag line. Lines carrying a pagination banner never match.
pub fn parse_flag_line(line: &str) -> Option<Flag> {
    if line.contains(PAGINATION_MARKER) {
        return None;
    }

    let caps = FLAG_LINE.captures(line)?;
    Some(Flag {
        id: int_or_zero(group(&caps, 1)),
        owner_steam_id: SteamId::new(group(&caps, 2)),
        owner_name: group(&caps, 3).to_string(),
        owner_ordinal: int_or_zero(group(&caps, 4)),
        location: parse_location(group(&caps, 5)).unwrap_or_default(),
    })
}

/// Parse a `ListFlags` dump into flags, in dump order
pub fn parse_flags(text: &str) -> Vec<Flag> {
    parse_each_line("flag", text, parse_flag_line)
}
