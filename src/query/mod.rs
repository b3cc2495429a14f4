//! Catalog queries.
//!
//! Two read-only search modes over a [`Catalog`]:
//!
//! - [`search_by_category`]: records containing at least one detection with a
//!   given category.
//! - [`search_by_dimension_and_flags`]: records whose dimensions fall in an
//!   inclusive range and whose difficult/truncated flags satisfy two
//!   [`TriState`] filters.
//!
//! Both return keys in catalog insertion order.

mod filter;

pub use filter::{parse_bound, DimensionQuery, ResolvedBounds, TriState};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::record::Record;
use crate::stats::StatsAccumulator;

/// Keys of records matching a query, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub keys: Vec<String>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} record(s)", self.keys.len())?;
        if self.keys.is_empty() {
            return writeln!(f);
        }
        writeln!(f, ":")?;
        for key in &self.keys {
            writeln!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Keys of records with at least one detection labeled `category`.
///
/// Matching is exact and case-sensitive. Each record appears at most once.
pub fn search_by_category(catalog: &Catalog, category: &str) -> SearchResults {
    let keys: Vec<String> = catalog
        .iter()
        .filter(|record| record.has_category(category))
        .map(|record| record.key().to_owned())
        .collect();

    debug!(category, matches = keys.len(), "category search");
    SearchResults { keys }
}

/// Fill the unset bounds of `query` from the current statistics.
pub fn resolve_bounds(query: &DimensionQuery, stats: &StatsAccumulator) -> ResolvedBounds {
    ResolvedBounds {
        min_width: query.min_width.unwrap_or(0),
        max_width: query.max_width.unwrap_or_else(|| stats.max_width_or_zero()),
        min_height: query.min_height.unwrap_or(0),
        max_height: query
            .max_height
            .unwrap_or_else(|| stats.max_height_or_zero()),
    }
}

/// Keys of records passing both the dimension range and the flag filters.
pub fn search_by_dimension_and_flags(
    catalog: &Catalog,
    stats: &StatsAccumulator,
    query: &DimensionQuery,
) -> SearchResults {
    let bounds = resolve_bounds(query, stats);

    let keys: Vec<String> = catalog
        .iter()
        .filter(|record| bounds.contains(record.width(), record.height()))
        .filter(|record| passes_flag_filters(record, query.difficult, query.truncated))
        .map(|record| record.key().to_owned())
        .collect();

    debug!(
        ?bounds,
        difficult = %query.difficult,
        truncated = %query.truncated,
        matches = keys.len(),
        "dimension search"
    );
    SearchResults { keys }
}

/// Evaluate the difficult/truncated filter pair against a record.
pub fn passes_flag_filters(record: &Record, difficult: TriState, truncated: TriState) -> bool {
    let has_difficult = record.has_difficult();
    let has_truncated = record.has_truncated();

    match (difficult, truncated) {
        (TriState::Any, TriState::Any) => true,
        (TriState::Any, TriState::Yes) => has_truncated,
        (TriState::Any, TriState::No) => !has_truncated,
        (TriState::Yes, TriState::Any) => has_difficult,
        (TriState::No, TriState::Any) => !has_difficult,
        (TriState::Yes, TriState::Yes) => has_difficult && has_truncated,
        (TriState::Yes, TriState::No) => has_difficult && !has_truncated,
        (TriState::No, TriState::Yes) => !has_difficult && has_truncated,
        (TriState::No, TriState::No) => !has_difficult && !has_truncated,
    }
}
