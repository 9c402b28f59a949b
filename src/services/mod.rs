pub mod log_sink;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod validator;

pub use log_sink::{
    HttpLogSink, LogEvent, LogLevel, LogPackage, LogSink, LogStack, MemoryLogSink, NoopLogSink,
    TracingLogSink, sink_from_config,
};
pub use redirect::{RedirectOutcome, RedirectResolver};
pub use shorten::{ShortenFlow, ShortenSettings};
pub use stats::{StatsEntry, collect_stats};
pub use validator::{ValidationError, ValidationErrorKind, validate};
