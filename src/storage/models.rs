use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A shortened URL. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub original: String,
    pub shortcode: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Status derived from the current time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Expired,
}

impl UrlRecord {
    /// `validity_minutes` must be positive so that `expires_at > created_at`.
    pub fn new(
        original: impl Into<String>,
        shortcode: impl Into<String>,
        created_at: DateTime<Utc>,
        validity_minutes: i64,
    ) -> Self {
        debug_assert!(validity_minutes > 0);
        Self {
            original: original.into(),
            shortcode: shortcode.into(),
            created_at,
            expires_at: created_at + Duration::minutes(validity_minutes),
        }
    }

    #[inline]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn status(&self, now: DateTime<Utc>) -> LinkStatus {
        if self.is_active(now) {
            LinkStatus::Active
        } else {
            LinkStatus::Expired
        }
    }

    /// Minutes until expiry, rounded half up. Zero or negative once expired.
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> i64 {
        let millis = (self.expires_at - now).num_milliseconds();
        (millis as f64 / 60_000.0 + 0.5).floor() as i64
    }

    pub fn validity_minutes(&self) -> i64 {
        (self.expires_at - self.created_at).num_minutes()
    }
}

/// One submitted form row, before validation.
///
/// Empty `validity` or `shortcode` strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CandidateInput {
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub validity: Option<String>,
    #[serde(default)]
    pub shortcode: Option<String>,
}

impl CandidateInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_validity(mut self, validity: impl Into<String>) -> Self {
        self.validity = Some(validity.into());
        self
    }

    pub fn with_shortcode(mut self, shortcode: impl Into<String>) -> Self {
        self.shortcode = Some(shortcode.into());
        self
    }

    pub fn validity_value(&self) -> Option<&str> {
        self.validity.as_deref().filter(|v| !v.is_empty())
    }

    pub fn shortcode_value(&self) -> Option<&str> {
        self.shortcode.as_deref().filter(|c| !c.is_empty())
    }
}

/// JSON clients may send the validity as `"10"` or `10`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
