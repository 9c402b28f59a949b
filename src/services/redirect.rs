//! Redirect resolution
//!
//! Decides whether a shortcode forwards to its original URL. Performing the
//! navigation is left to the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::services::log_sink::{LogEvent, LogPackage, LogSink};
use crate::storage::UrlRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Forward(String),
    NotFound,
}

pub struct RedirectResolver {
    sink: Arc<dyn LogSink>,
}

impl RedirectResolver {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Unknown and expired codes both resolve to [`RedirectOutcome::NotFound`].
    pub fn resolve(
        &self,
        shortcode: &str,
        registry: &UrlRegistry,
        now: DateTime<Utc>,
    ) -> RedirectOutcome {
        match registry.find_active(shortcode, now) {
            Some(record) => {
                self.sink.log(LogEvent::info(
                    LogPackage::Route,
                    format!("Redirecting shortcode {} to {}", shortcode, record.original),
                ));
                RedirectOutcome::Forward(record.original.clone())
            }
            None => {
                self.sink.log(LogEvent::error(
                    LogPackage::Route,
                    format!("Attempted to access invalid/expired shortcode: {}", shortcode),
                ));
                RedirectOutcome::NotFound
            }
        }
    }
}
