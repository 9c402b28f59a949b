//! Minilinker - an in-memory URL shortener
//!
//! Users submit batches of long URLs and receive alphanumeric short codes
//! that expire after a validity window. Records live only in process
//! memory; expiry is evaluated lazily against the current time.
//!
//! # Architecture
//! - `storage`: `UrlRecord` and the append-only `UrlRegistry`
//! - `services`: validation, batch shortening, redirect resolution,
//!   statistics and fire-and-forget log delivery
//! - `api`: HTTP routes (submit, stats, health, redirect)
//! - `config`: TOML + environment configuration
//! - `runtime`: server assembly
//! - `system`: logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
