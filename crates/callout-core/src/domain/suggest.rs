//! Suggestion filter behind the picker list.
//!
//! A catalog entry is suggested when it is enabled in the [`Configuration`]
//! and its identifier contains the query, ignoring case.  Results keep
//! catalog order: there is no ranking and no fuzzy matching.

use super::catalog::{CalloutType, Catalog};
use super::configuration::Configuration;

/// Returns the enabled catalog entries whose identifier contains `query`.
///
/// An empty query matches every enabled entry.  A query that matches nothing
/// yields an empty vector; the picker renders that as "no results".
pub fn suggest(catalog: &Catalog, configuration: &Configuration, query: &str) -> Vec<CalloutType> {
    // Catalog identifiers are lowercase, so only the query needs folding.
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|c| configuration.is_enabled(&c.identifier))
        .filter(|c| c.identifier.contains(needle.as_str()))
        .cloned()
        .collect()
}
