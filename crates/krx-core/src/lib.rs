//! # krx-core
//!
//! Core crate for the KRX market-data capture/analysis system, providing:
//!
//! - **Types** (`types`) — capture envelope, wire payload parsing, snapshot,
//!   MM slot/timeline, logical stream identity
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `KrxError` via thiserror
//! - **Statistics** (`stats`) — thread-safe per-channel ingest counters
//! - **Time utilities** (`time_util`) — wall-clock helpers, wire time parsing
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod stats;
pub mod time_util;
pub mod types;

pub use error::KrxError;
