//! The genome pool: a flat, opaque name → record store.
//!
//! Records are arbitrary JSON values; the pool never inspects them. Insertion
//! order is preserved so a pool round-trips through a snapshot verbatim.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat key-value store of opaque genome records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenomePool {
    records: IndexMap<String, Value>,
}

impl GenomePool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under `name`, replacing any existing record.
    pub fn add(&mut self, name: impl Into<String>, record: Value) {
        self.records.insert(name.into(), record);
    }

    /// Fetch the record stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.records.get(name)
    }

    /// Remove the record stored under `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.records.shift_remove(name)
    }

    /// All record names in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    /// Whether a record exists under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
