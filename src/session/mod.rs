//! Session context.
//!
//! A [`Session`] owns the catalog, the running statistics and the session
//! options, and exposes every operation the menu (or any other front end)
//! needs: listing and loading files, fetching records, both searches and the
//! statistics snapshot.

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{Catalog, InsertOutcome};
use crate::config::{SessionConfig, StatsPolicy};
use crate::error::AnnocatError;
use crate::loader;
use crate::query::{self, DimensionQuery, SearchResults};
use crate::record::Record;
use crate::stats::{StatsAccumulator, StatsSnapshot};

/// Outcome of a successful [`Session::load_file`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub key: String,
    pub outcome: InsertOutcome,
}

/// Catalog, statistics and options for one interactive session.
#[derive(Debug, Default)]
pub struct Session {
    config: SessionConfig,
    catalog: Catalog,
    stats: StatsAccumulator,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            catalog: Catalog::new(),
            stats: StatsAccumulator::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stats(&self) -> &StatsAccumulator {
        &self.stats
    }

    /// Well-formed XML files in the session folder.
    pub fn list_files(&self) -> Result<Vec<String>, AnnocatError> {
        loader::list_xml_files(&self.config.root)
    }

    /// Read `file` from the session folder and add it to the catalog.
    ///
    /// On a read or parse failure nothing is inserted and nothing is observed.
    pub fn load_file(&mut self, file: &str) -> Result<LoadOutcome, AnnocatError> {
        let record = match loader::load_record(&self.config.root, file) {
            Ok(record) => record,
            Err(err) => {
                warn!(file, error = %err, "failed to load record");
                return Err(err);
            }
        };

        let key = record.key().to_owned();
        let outcome = self.insert_record(record);
        match outcome {
            InsertOutcome::Inserted => info!(key = %key, "record loaded"),
            InsertOutcome::AlreadyPresent => info!(key = %key, "record already loaded"),
        }

        Ok(LoadOutcome { key, outcome })
    }

    /// Observe and insert an already constructed record.
    ///
    /// With [`StatsPolicy::EveryAttempt`] the record is observed before the
    /// duplicate check, so a rejected duplicate still counts. With
    /// [`StatsPolicy::AcceptedOnly`] only inserted records are observed.
    pub fn insert_record(&mut self, record: Record) -> InsertOutcome {
        match self.config.stats_policy {
            StatsPolicy::EveryAttempt => {
                self.stats.observe(&record);
                self.catalog.insert(record)
            }
            StatsPolicy::AcceptedOnly => {
                if self.catalog.contains_key(record.key()) {
                    return InsertOutcome::AlreadyPresent;
                }
                self.stats.observe(&record);
                self.catalog.insert(record)
            }
        }
    }

    pub fn get_record(&self, key: &str) -> Option<&Record> {
        self.catalog.get(key)
    }

    /// Like [`get_record`](Self::get_record) but reports a missing key as an error.
    pub fn require_record(&self, key: &str) -> Result<&Record, AnnocatError> {
        self.catalog
            .get(key)
            .ok_or_else(|| AnnocatError::RecordNotFound {
                key: key.to_owned(),
            })
    }

    /// Catalog keys in insertion order.
    pub fn list_keys(&self) -> Vec<String> {
        self.catalog.keys().map(ToOwned::to_owned).collect()
    }

    pub fn search_by_category(&self, category: &str) -> SearchResults {
        query::search_by_category(&self.catalog, category)
    }

    pub fn search_by_dimension_and_flags(&self, query: &DimensionQuery) -> SearchResults {
        query::search_by_dimension_and_flags(&self.catalog, &self.stats, query)
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot(self.catalog.len())
    }
}
