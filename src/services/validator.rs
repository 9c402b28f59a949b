//! Candidate validation
//!
//! Pure checks over a batch of [`CandidateInput`] rows. Every rule runs for
//! every row and every violation is reported; nothing short-circuits.

use std::collections::HashSet;

use serde::Serialize;
use strum::AsRefStr;

use crate::services::log_sink::{LogEvent, LogPackage, LogSink};
use crate::storage::{CandidateInput, UrlRecord};
use crate::utils::is_valid_short_code;
use crate::utils::url_validator::validate_url;

/// Upper bound on validity (ten years), keeps expiry arithmetic in range.
pub const MAX_VALIDITY_MINUTES: i64 = 10 * 365 * 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValidationErrorKind {
    InvalidUrl,
    InvalidValidity,
    InvalidShortcode,
    DuplicateShortcode,
}

/// One rule violation on one row. `row` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub row: usize,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    fn new(row: usize, kind: ValidationErrorKind) -> Self {
        let detail = match kind {
            ValidationErrorKind::InvalidUrl => "Invalid URL",
            ValidationErrorKind::InvalidValidity => "Validity must be integer",
            ValidationErrorKind::InvalidShortcode => "Shortcode must be alphanumeric",
            ValidationErrorKind::DuplicateShortcode => "Shortcode already exists",
        };
        Self {
            row,
            kind,
            message: format!("Row {}: {}", row, detail),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Parse a validity string into minutes.
///
/// Accepts a base-10 integer, optionally surrounded by whitespace, in
/// `1..=MAX_VALIDITY_MINUTES`.
pub fn parse_validity(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|minutes| (1..=MAX_VALIDITY_MINUTES).contains(minutes))
}

/// Validate a batch against the records already in the registry.
///
/// A shortcode also counts as taken when an earlier row of the same batch
/// claims it.
pub fn validate(
    candidates: &[CandidateInput],
    existing: &[UrlRecord],
    sink: &dyn LogSink,
) -> Vec<ValidationError> {
    let taken: HashSet<&str> = existing.iter().map(|r| r.shortcode.as_str()).collect();
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut errors = Vec::new();

    for (idx, candidate) in candidates.iter().enumerate() {
        let row = idx + 1;

        if validate_url(&candidate.url).is_err() {
            errors.push(ValidationError::new(row, ValidationErrorKind::InvalidUrl));
            sink.log(LogEvent::error(
                LogPackage::Handler,
                format!("Row {}: Invalid URL entered", row),
            ));
        }

        if let Some(validity) = candidate.validity_value()
            && parse_validity(validity).is_none()
        {
            errors.push(ValidationError::new(row, ValidationErrorKind::InvalidValidity));
            sink.log(LogEvent::warn(
                LogPackage::Handler,
                format!("Row {}: Validity not an integer", row),
            ));
        }

        if let Some(code) = candidate.shortcode_value() {
            if !is_valid_short_code(code) {
                errors.push(ValidationError::new(row, ValidationErrorKind::InvalidShortcode));
                sink.log(LogEvent::warn(
                    LogPackage::Handler,
                    format!("Row {}: Invalid shortcode", row),
                ));
            }

            if taken.contains(code) || !claimed.insert(code) {
                errors.push(ValidationError::new(
                    row,
                    ValidationErrorKind::DuplicateShortcode,
                ));
                sink.log(LogEvent::error(
                    LogPackage::Handler,
                    format!("Row {}: Shortcode already exists", row),
                ));
            }
        }
    }

    errors
}
