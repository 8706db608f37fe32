//! Line-level helpers for `key = value` configuration files.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character and trims both sides
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.trim().split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// What: Drop a trailing `#` or `//` comment from a value.
///
/// Inputs:
/// - `s`: Raw value
///
/// Output:
/// - Trimmed value without the comment
///
/// Details:
/// - A marker only starts a comment at the start of the value or after whitespace, so
///   paths such as `/srv/games#2.json` survive intact.
pub fn strip_inline_comment(s: &str) -> &str {
    let cut = s
        .char_indices()
        .find(|&(i, c)| {
            let marker = c == '#' || (c == '/' && s[i..].starts_with("//"));
            marker && (i == 0 || s[..i].ends_with(char::is_whitespace))
        })
        .map_or(s.len(), |(i, _)| i);
    s[..cut].trim()
}
