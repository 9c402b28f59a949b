//! Diagnostic log delivery
//!
//! Core services report events through the [`LogSink`] trait. Sinks are
//! fire-and-forget: `log` returns immediately and delivery failures never
//! reach the caller.
//!
//! - [`HttpLogSink`]: queues each event for a delivery thread that POSTs it
//!   to a remote endpoint, and mirrors it to `tracing`
//! - [`TracingLogSink`]: local `tracing` output only
//! - [`MemoryLogSink`]: records events, for assertions in tests
//! - [`NoopLogSink`]: discards everything

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use parking_lot::Mutex;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::{debug, error, info, trace, warn};
use ureq::Agent;

use crate::config::LogSinkConfig;
use crate::errors::{MinilinkerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogStack {
    Backend,
    Frontend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogPackage {
    Handler,
    Service,
    Component,
    Route,
    Middleware,
    Config,
    Utils,
}

/// One diagnostic event, serialized as the endpoint's request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    pub stack: LogStack,
    pub level: LogLevel,
    pub package: LogPackage,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: LogLevel, package: LogPackage, message: impl Into<String>) -> Self {
        Self {
            stack: LogStack::Backend,
            level,
            package,
            message: message.into(),
        }
    }

    pub fn info(package: LogPackage, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, package, message)
    }

    pub fn warn(package: LogPackage, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, package, message)
    }

    pub fn error(package: LogPackage, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, package, message)
    }
}

/// Fire-and-forget event delivery.
pub trait LogSink: Send + Sync {
    fn log(&self, event: LogEvent);
}

/// Echo an event through `tracing` at the matching level.
fn mirror(event: &LogEvent) {
    match event.level {
        LogLevel::Debug => debug!(
            "[{}-{}] {}: {}",
            event.stack, event.level, event.package, event.message
        ),
        LogLevel::Info => info!(
            "[{}-{}] {}: {}",
            event.stack, event.level, event.package, event.message
        ),
        LogLevel::Warn => warn!(
            "[{}-{}] {}: {}",
            event.stack, event.level, event.package, event.message
        ),
        LogLevel::Error | LogLevel::Fatal => error!(
            "[{}-{}] {}: {}",
            event.stack, event.level, event.package, event.message
        ),
    }
}

pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn log(&self, _event: LogEvent) {}
}

pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, event: LogEvent) {
        mirror(&event);
    }
}

#[derive(Default)]
pub struct MemoryLogSink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn count_level(&self, level: LogLevel) -> usize {
        self.events.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl LogSink for MemoryLogSink {
    fn log(&self, event: LogEvent) {
        self.events.lock().push(event);
    }
}

/// Events waiting for delivery before new ones are dropped.
pub const DELIVERY_QUEUE_CAPACITY: usize = 256;

/// Remote endpoint sink.
///
/// `log` only enqueues. A single worker thread drains a bounded queue and
/// POSTs each event with ureq, so a burst of events costs one thread at
/// most. When the queue is full the event is dropped and reported locally.
pub struct HttpLogSink {
    queue: Sender<LogEvent>,
}

impl HttpLogSink {
    pub fn new(endpoint: &str, auth_token: Option<&str>, timeout: Duration) -> Result<Self> {
        Self::with_capacity(endpoint, auth_token, timeout, DELIVERY_QUEUE_CAPACITY)
    }

    pub fn with_capacity(
        endpoint: &str,
        auth_token: Option<&str>,
        timeout: Duration,
        capacity: usize,
    ) -> Result<Self> {
        let agent = Self::agent(timeout);
        let endpoint = endpoint.to_string();
        let auth_token = auth_token.and_then(Self::authorization);
        let (queue, events) = crossbeam_channel::bounded::<LogEvent>(capacity.max(1));

        std::thread::Builder::new()
            .name("log-sink".to_string())
            .spawn(move || {
                // ends once the sink and every sender clone are dropped
                for event in events {
                    match Self::deliver(&agent, &endpoint, auth_token.as_deref(), &event) {
                        Ok(Some(log_id)) => trace!("Log delivered (logID: {})", log_id),
                        Ok(None) => trace!("Log delivered without logID"),
                        Err(e) => warn!("Logging failed: {}", e.message()),
                    }
                }
            })
            .map_err(|e| {
                MinilinkerError::log_delivery(format!("failed to start delivery thread: {}", e))
            })?;

        Ok(Self { queue })
    }

    pub fn from_config(config: &LogSinkConfig) -> Result<Self> {
        Self::new(
            &config.endpoint,
            config.auth_token.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn agent(timeout: Duration) -> Agent {
        Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into()
    }

    /// `Authorization` header value for a configured token. Bare tokens get
    /// the `Bearer` scheme; blank tokens mean no header.
    fn authorization(token: &str) -> Option<String> {
        let token = token.trim();
        if token.is_empty() {
            None
        } else if token
            .get(..7)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer "))
        {
            Some(token.to_string())
        } else {
            Some(format!("Bearer {}", token))
        }
    }

    /// POST one event; returns the `logID` from the response body, if any.
    ///
    /// Non-2xx statuses and non-JSON bodies are errors.
    fn deliver(
        agent: &Agent,
        endpoint: &str,
        authorization: Option<&str>,
        event: &LogEvent,
    ) -> Result<Option<String>> {
        let mut request = agent.post(endpoint);
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }

        let response = request.send_json(event)?;
        let body: serde_json::Value = response
            .into_body()
            .read_json()
            .map_err(|e| MinilinkerError::log_delivery(format!("invalid response body: {}", e)))?;

        Ok(body
            .get("logID")
            .and_then(|id| id.as_str())
            .map(String::from))
    }
}

impl LogSink for HttpLogSink {
    fn log(&self, event: LogEvent) {
        mirror(&event);

        match self.queue.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Logging failed: delivery queue full, dropped \"{}\"", event.message)
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("Logging failed: delivery thread has stopped")
            }
        }
    }
}

/// Build the sink the configuration asks for.
///
/// Falls back to local logging when the remote sink cannot start.
pub fn sink_from_config(config: &LogSinkConfig) -> Arc<dyn LogSink> {
    if !config.enabled {
        debug!("Remote log delivery disabled, logging locally only");
        return Arc::new(TracingLogSink);
    }

    match HttpLogSink::from_config(config) {
        Ok(sink) => {
            info!("Remote log delivery enabled: {}", config.endpoint);
            Arc::new(sink)
        }
        Err(e) => {
            error!("{}, logging locally only", e);
            Arc::new(TracingLogSink)
        }
    }
}
