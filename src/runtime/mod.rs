//! Application runtime

pub mod server;

pub use server::{build_state, run_server};
