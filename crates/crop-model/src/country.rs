//! Country alias table.
//!
//! Source datasets spell some countries differently (UN long forms,
//! abbreviations, one mis-decoded UTF-8 name). Matching is exact and
//! case-sensitive; anything not listed passes through untouched.

/// Alias to canonical country name.
pub const COUNTRY_ALIASES: [(&str, &str); 16] = [
    ("United States of America", "United States"),
    ("USA", "United States"),
    ("UK", "United Kingdom"),
    (
        "United Kingdom of Great Britain and Northern Ireland",
        "United Kingdom",
    ),
    ("Russian Federation", "Russia"),
    ("Republic of Korea", "South Korea"),
    ("Korea, Republic of", "South Korea"),
    ("Viet Nam", "Vietnam"),
    ("Iran (Islamic Republic of)", "Iran"),
    ("Syrian Arab Republic", "Syria"),
    ("Venezuela (Bolivarian Republic of)", "Venezuela"),
    ("Bolivia (Plurinational State of)", "Bolivia"),
    ("United Republic of Tanzania", "Tanzania"),
    ("Côte d'Ivoire", "Ivory Coast"),
    // Latin-1 decoding of the UTF-8 spelling, as found in the FAO exports.
    ("CÃ´te d'Ivoire", "Ivory Coast"),
    ("Czechia", "Czech Republic"),
];

/// Returns the canonical spelling for `name` after trimming whitespace.
///
/// ```
/// use crop_model::canonical_country;
///
/// assert_eq!(canonical_country(" Viet Nam "), "Vietnam");
/// assert_eq!(canonical_country("India"), "India");
/// assert_eq!(canonical_country("viet nam"), "viet nam");
/// ```
pub fn canonical_country(name: &str) -> &str {
    let trimmed = name.trim();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == trimmed)
        .map_or(trimmed, |(_, canonical)| *canonical)
}
