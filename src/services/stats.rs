//! Statistics view model

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::{LinkStatus, UrlRecord, UrlRegistry};

/// One row of the statistics view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsEntry {
    pub original: String,
    pub shortcode: String,
    pub short_link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Rounded; zero or negative once expired.
    pub remaining_minutes: i64,
    pub status: LinkStatus,
}

impl StatsEntry {
    pub fn from_record(record: &UrlRecord, base_url: &str, now: DateTime<Utc>) -> Self {
        Self {
            original: record.original.clone(),
            shortcode: record.shortcode.clone(),
            short_link: short_link(base_url, &record.shortcode),
            created_at: record.created_at,
            expires_at: record.expires_at,
            remaining_minutes: record.remaining_minutes(now),
            status: record.status(now),
        }
    }
}

pub fn short_link(base_url: &str, shortcode: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), shortcode)
}

/// Every record, live and expired, in insertion order.
pub fn collect_stats(registry: &UrlRegistry, base_url: &str, now: DateTime<Utc>) -> Vec<StatsEntry> {
    registry
        .all()
        .iter()
        .map(|record| StatsEntry::from_record(record, base_url, now))
        .collect()
}
