//! Filtering and paging over parsed records.

use parser_dump::Player;

/// Check if a player matches a search term.
///
/// Names are compared case-insensitively; the Steam ID by plain substring.
/// An empty term matches everyone.
pub fn matches_player(player: &Player, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    player.name.to_lowercase().contains(&needle)
        || player.account_name.to_lowercase().contains(&needle)
        || player.steam_id.as_str().contains(term)
}

/// Players matching `term`, in dump order
pub fn search_players<'a>(players: &'a [Player], term: &str) -> Vec<&'a Player> {
    players.iter().filter(|p| matches_player(p, term)).collect()
}

/// Slice out page `page` (zero-based) of `per_page` items.
///
/// Pages past the end are empty. A zero page size yields nothing.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `total` items
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}
