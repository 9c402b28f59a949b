//! Batch shortening
//!
//! A submitted batch is validated as a whole against the registry. Any
//! violation rejects the entire batch and leaves the registry untouched;
//! otherwise every row becomes a record, appended in submission order.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::config::ShortenerConfig;
use crate::services::log_sink::{LogEvent, LogPackage, LogSink};
use crate::services::validator::{self, ValidationError, parse_validity};
use crate::storage::{CandidateInput, UrlRecord, UrlRegistry};
use crate::utils::generate_random_code;

#[derive(Debug, Clone, Copy)]
pub struct ShortenSettings {
    pub default_validity_minutes: i64,
    pub code_length: usize,
    pub max_generate_attempts: usize,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            default_validity_minutes: 30,
            code_length: 5,
            max_generate_attempts: 8,
        }
    }
}

impl From<&ShortenerConfig> for ShortenSettings {
    fn from(config: &ShortenerConfig) -> Self {
        Self {
            default_validity_minutes: config
                .default_validity_minutes
                .clamp(1, validator::MAX_VALIDITY_MINUTES),
            code_length: config.code_length.max(1),
            max_generate_attempts: config.max_generate_attempts.max(1),
        }
    }
}

pub struct ShortenFlow {
    settings: ShortenSettings,
    sink: Arc<dyn LogSink>,
}

impl ShortenFlow {
    pub fn new(settings: ShortenSettings, sink: Arc<dyn LogSink>) -> Self {
        Self { settings, sink }
    }

    /// Validate and create a batch of records at the current time.
    pub fn submit(
        &self,
        candidates: &[CandidateInput],
        registry: &mut UrlRegistry,
    ) -> Result<Vec<UrlRecord>, Vec<ValidationError>> {
        self.submit_at(candidates, registry, Utc::now())
    }

    /// [`ShortenFlow::submit`] with an explicit creation time.
    pub fn submit_at(
        &self,
        candidates: &[CandidateInput],
        registry: &mut UrlRegistry,
        now: DateTime<Utc>,
    ) -> Result<Vec<UrlRecord>, Vec<ValidationError>> {
        let errors = validator::validate(candidates, registry.all(), self.sink.as_ref());
        if !errors.is_empty() {
            return Err(errors);
        }

        // user-chosen codes later in the batch must not be handed out
        let reserved: HashSet<String> = candidates
            .iter()
            .filter_map(|c| c.shortcode_value())
            .map(String::from)
            .collect();

        let mut created = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let shortcode = match candidate.shortcode_value() {
                Some(code) => code.to_string(),
                None => self.generate_code(registry, &reserved),
            };
            let validity_minutes = candidate
                .validity_value()
                .and_then(parse_validity)
                .unwrap_or(self.settings.default_validity_minutes);

            let record = UrlRecord::new(candidate.url.clone(), shortcode, now, validity_minutes);
            registry.add(record.clone());

            self.sink.log(LogEvent::info(
                LogPackage::Service,
                format!(
                    "Shortened URL created with shortcode {}, valid {} mins",
                    record.shortcode, validity_minutes
                ),
            ));
            created.push(record);
        }

        Ok(created)
    }

    /// Draw random codes until one is free, growing the length after
    /// `max_generate_attempts` misses at the current length.
    fn generate_code(&self, registry: &UrlRegistry, reserved: &HashSet<String>) -> String {
        let mut length = self.settings.code_length;
        loop {
            for _ in 0..self.settings.max_generate_attempts {
                let code = generate_random_code(length);
                if !registry.contains(&code) && !reserved.contains(&code) {
                    return code;
                }
            }
            warn!(
                "Shortcode space at length {} looks crowded, trying length {}",
                length,
                length + 1
            );
            length += 1;
        }
    }
}
