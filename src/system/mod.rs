//! System utilities
//!
//! Process-level concerns that sit outside the shortening domain.

pub mod logging;

pub use logging::init_logging;
