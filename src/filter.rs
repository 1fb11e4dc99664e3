//! Unit list filtering
//!
//! A total, stateless function from `(units, query)` to a filtered view.
//! The TUI recomputes it on every keystroke, so it must be referentially
//! transparent: same inputs, same output, no caching.

use crate::registry::UnitRecord;

/// Filter `units` by case-insensitive substring match of `query` against the
/// unit name, preserving relative order. An empty query is the identity.
///
/// Matching is name-only: descriptions are free text and matching against
/// them makes narrow queries like "ssh" pull in unrelated units.
#[must_use]
pub fn filter_units<'a>(units: &'a [UnitRecord], query: &str) -> Vec<&'a UnitRecord> {
    if query.is_empty() {
        return units.iter().collect();
    }
    let needle = query.to_lowercase();
    units
        .iter()
        .filter(|u| u.name.to_lowercase().contains(&needle))
        .collect()
}
