//! In-memory URL registry
//!
//! Append-only, insertion-ordered collection of [`UrlRecord`]s with an
//! index on shortcode. Expiry is evaluated at query time against the `now`
//! supplied by the caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::models::UrlRecord;

#[derive(Debug, Clone, Default)]
pub struct UrlRegistry {
    records: Vec<UrlRecord>,
    by_code: HashMap<String, usize>,
}

impl UrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Shortcode uniqueness is enforced before this call.
    pub fn add(&mut self, record: UrlRecord) {
        debug_assert!(
            !self.by_code.contains_key(&record.shortcode),
            "duplicate shortcode reached the registry"
        );
        debug!(
            "Registry: added '{}' -> '{}' (expires {})",
            record.shortcode,
            record.original,
            record.expires_at.to_rfc3339()
        );
        self.by_code
            .insert(record.shortcode.clone(), self.records.len());
        self.records.push(record);
    }

    /// All records, live and expired, oldest first.
    pub fn all(&self) -> &[UrlRecord] {
        &self.records
    }

    /// The record for `shortcode` if it has not expired at `now`.
    pub fn find_active(&self, shortcode: &str, now: DateTime<Utc>) -> Option<&UrlRecord> {
        self.get(shortcode).filter(|record| record.is_active(now))
    }

    /// Lookup regardless of expiry.
    pub fn get(&self, shortcode: &str) -> Option<&UrlRecord> {
        self.by_code.get(shortcode).map(|&idx| &self.records[idx])
    }

    pub fn contains(&self, shortcode: &str) -> bool {
        self.by_code.contains_key(shortcode)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn active_count(&self, now: DateTime<Utc>) -> usize {
        self.records.iter().filter(|r| r.is_active(now)).count()
    }
}
