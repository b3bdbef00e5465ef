//! Display names, ids and name affinity derived from directory names.

use chrono::{DateTime, Utc};

/// Turns a directory name into a display name.
///
/// `My_Cool-Game` becomes `My Cool Game`: separators become spaces, runs of
/// whitespace collapse, and every word starts upper-case. The rest of each
/// word is kept as written (`XCOM_2` stays `XCOM 2`).
pub fn format_game_name(dir_name: &str) -> String {
    dir_name
        .replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases and collapses every non-alphanumeric run to a single `-`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() {
        out.push_str("game");
    }
    out
}

/// Builds a record id: `slug(dir_name)-<build timestamp in ms>`.
pub fn game_id(dir_name: &str, build_time: DateTime<Utc>) -> String {
    format!("{}-{}", slug(dir_name), build_time.timestamp_millis())
}

/// Returns true if an executable stem "belongs" to a directory.
///
/// Both sides are compared case-insensitively with separators removed; a
/// match is either one containing the other. Empty sides never match.
pub fn has_name_affinity(stem: &str, dir_name: &str) -> bool {
    let stem = normalize(stem);
    let dir = normalize(dir_name);
    if stem.is_empty() || dir.is_empty() {
        return false;
    }
    stem.contains(&dir) || dir.contains(&stem)
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
