//! Typed error definitions for the KRX capture/analysis system.
//!
//! Provides [`KrxError`] for domain-specific errors that are more informative
//! than plain `anyhow::Error` strings. All variants implement `std::error::Error`
//! via `thiserror`, so they integrate seamlessly with `anyhow::Result`.

use thiserror::Error;

/// Domain-specific errors for the KRX capture/analysis system.
#[derive(Debug, Error)]
pub enum KrxError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// Symbol-catalog load error (falls back to empty sets at the call site).
    #[error("catalog error: {0}")]
    Catalog(String),

    /// UDP socket bind/join/receive error.
    #[error("udp error: {0}")]
    Udp(String),

    /// Archive directory/file error.
    #[error("archive error: {0}")]
    Archive(String),

    /// Wire payload or envelope parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// MM analysis error (missing Q, master entry, etc.).
    #[error("analysis error: {0}")]
    Analysis(String),
}
