//! Record model and the fixed header/category reference tables.
//!
//! The tables are ordered const slices; menu indices, reverse lookups and
//! the rendered reference block all rely on this ordering, so entries must
//! not be reordered without auditing those call sites.

use serde::{Deserialize, Serialize};

/// Header letters and their domain names, in menu order.
pub const HEADERS: &[(&str, &str)] = &[
    ("P", "Powertrain"),
    ("B", "Body"),
    ("C", "Chassis"),
    ("U", "Network"),
];

/// Category prefixes and their subsystem names, in menu order.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("x40xx", "Communication Systems"),
    ("x41xx", "Sensor Networks"),
    ("x42xx", "Body Control Modules"),
    ("x43xx", "Power Distribution"),
    ("x44xx", "Hybrid/EV Systems"),
    ("x45xx", "Safety & Chassis Systems"),
    ("x46xx", "Custom Computer Nodes"),
    ("x47xx", "Miscellaneous Custom Functions"),
];

/// A single user-defined diagnostic trouble code.
///
/// Field names match the on-disk JSON written by every version of this
/// tool; `possible_fixes` and `pinpoint_test` tolerate absence so older
/// hand-edited catalogs still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtcRecord {
    pub code: String,
    pub header: String,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub possible_fixes: Vec<String>,
    #[serde(default)]
    pub pinpoint_test: String,
}

/// Domain name for a header letter (`"U"` -> `"Network"`).
pub fn header_display(letter: &str) -> Option<&'static str> {
    HEADERS.iter().find(|(k, _)| *k == letter).map(|(_, v)| *v)
}

/// Subsystem name for a category prefix (`"x40xx"` -> `"Communication Systems"`).
pub fn category_display(prefix: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|(k, _)| *k == prefix).map(|(_, v)| *v)
}

/// Reverse lookup: header letter for a stored domain name.
///
/// Matches on display-name equality; the table currently has unique names,
/// so the first match is the only match.
pub fn header_key_for_display(display: &str) -> Option<&'static str> {
    HEADERS.iter().find(|(_, v)| *v == display).map(|(k, _)| *k)
}

/// Reverse lookup: category prefix for a stored subsystem name.
pub fn category_key_for_display(display: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|(_, v)| *v == display).map(|(k, _)| *k)
}

/// Left-pad a user-supplied suffix with zeros to width 2.
///
/// Longer input passes through untouched, so codes built from a 3+ digit
/// suffix are wider than the nominal 5 characters. Non-numeric input is
/// accepted as-is.
pub fn pad_suffix(suffix: &str) -> String {
    format!("{:0>2}", suffix)
}

/// Build the canonical code string from a header letter, a category prefix
/// and a raw suffix: `<header>"4"<prefix digit><padded suffix>`.
///
/// The prefix digit is the character at index 2 of the 5-character prefix
/// (`x40xx` -> `'0'`). Pure; performs no validation beyond padding.
pub fn assign_code(header_letter: &str, category_prefix: &str, suffix: &str) -> String {
    let digit = category_prefix.chars().nth(2).unwrap_or('0');
    format!("{}4{}{}", header_letter, digit, pad_suffix(suffix))
}

/// Last two characters of an existing code, used when an edit keeps the
/// current suffix. Codes shorter than two characters come back whole.
pub fn code_suffix(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    let start = chars.len().saturating_sub(2);
    chars[start..].iter().collect()
}

/// Sort records for export: header priority `B, C, P, U` (anything else
/// last), then the numeric value of the code after the first character
/// (non-numeric remainders last). Stable, so equal keys keep catalog order.
pub fn sort_for_export(records: &mut [DtcRecord]) {
    const HEADER_ORDER: [char; 4] = ['B', 'C', 'P', 'U'];
    records.sort_by_key(|r| {
        let mut chars = r.code.chars();
        let first = chars.next().unwrap_or('\0');
        let priority = HEADER_ORDER
            .iter()
            .position(|&c| c == first)
            .unwrap_or(99);
        let rest: String = chars.collect();
        let numeric: u64 = rest.parse().unwrap_or(99_999);
        (priority, numeric)
    });
}
