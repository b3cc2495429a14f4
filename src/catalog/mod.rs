//! Insert-once, order-preserving record store.
//!
//! Records are kept in insertion order, which is the order every query
//! reports its results in. A key can be inserted only once; a second insert
//! keeps the original record and reports [`InsertOutcome::AlreadyPresent`].

use std::collections::HashMap;

use serde::Serialize;

use crate::record::Record;

/// Result of [`Catalog::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    /// The record was stored under a new key.
    Inserted,
    /// The key was already present; the catalog is unchanged.
    AlreadyPresent,
}

/// Keyed store of records for one session.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under its key unless the key is already taken.
    pub fn insert(&mut self, record: Record) -> InsertOutcome {
        if self.index.contains_key(record.key()) {
            return InsertOutcome::AlreadyPresent;
        }

        self.index.insert(record.key().to_owned(), self.records.len());
        self.records.push(record);
        InsertOutcome::Inserted
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.index.get(key).map(|&idx| &self.records[idx])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(Record::key)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
