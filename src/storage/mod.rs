//! In-memory storage
//!
//! Records live only for the lifetime of the process.

use std::sync::Arc;

use parking_lot::RwLock;

pub mod models;
pub mod registry;

pub use models::{CandidateInput, LinkStatus, UrlRecord};
pub use registry::UrlRegistry;

/// Registry handle shared between HTTP workers.
pub type SharedRegistry = Arc<RwLock<UrlRegistry>>;

pub fn shared_registry() -> SharedRegistry {
    Arc::new(RwLock::new(UrlRegistry::new()))
}
