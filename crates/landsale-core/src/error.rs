//! Error types for the landsale-core library.
//!
//! Extraction itself never fails: a pattern miss or an unparseable literal
//! becomes an absent field. These errors cover the surfaces around the
//! engine (configuration files and the extraction database).

use thiserror::Error;

/// Main error type for the landsale library.
#[derive(Error, Debug)]
pub enum LandsaleError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the landsale library.
pub type Result<T> = std::result::Result<T, LandsaleError>;
