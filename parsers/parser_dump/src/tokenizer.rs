//! Line splitting shared by every dump parser.

/// Banner the server prints between pages of long listings, e.g. `Page 2/5`
pub const PAGINATION_MARKER: &str = "Page ";

/// Check if a trimmed line is a pagination banner
pub fn is_pagination_line(line: &str) -> bool {
    line.starts_with(PAGINATION_MARKER)
}

/// Check if a trimmed line is a horizontal rule such as `-----` or `=====`
fn is_separator_line(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-' || c == '=')
}

/// Check if a trimmed line carries no record data at all
pub fn is_noise_line(line: &str) -> bool {
    line.is_empty() || is_pagination_line(line) || is_separator_line(line)
}

/// Split a dump into trimmed, non-blank lines without pagination noise.
///
/// The iterator borrows `text`, so calling this again on the same text
/// yields the same sequence.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !is_noise_line(line))
}
