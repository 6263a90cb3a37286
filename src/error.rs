//! Error types for pressfeed
//!
//! The pipeline distinguishes error categories internally (config, fetch,
//! render, store write, store sync) but collapses all of them into the
//! opaque [`Error::BuildFailed`] signal at the run boundary. Only the log
//! stream carries the original category.

use thiserror::Error;

/// Result type alias for pressfeed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pressfeed
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "catalog_path")
        key: Option<String>,
    },

    /// A single feed could not be fetched or parsed. Recovered locally by
    /// the pipeline and never fatal to a run.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Template rendering failed for an edition
    #[error("render error: {0}")]
    Render(String),

    /// Writing one rendered artifact to the distribution store failed
    #[error("store write error for '{key}': {reason}")]
    StoreWrite {
        /// The edition key whose artifact could not be written
        key: String,
        /// The reason the write failed
        reason: String,
    },

    /// Synchronizing the distribution store to its target failed
    #[error("store sync error: {0}")]
    StoreSync(String),

    /// Opaque run-level failure reported at the pipeline boundary.
    ///
    /// Every fatal error category maps to this value before it reaches the
    /// caller; the original detail is only logged.
    #[error("Build failed")]
    BuildFailed,
}

impl Error {
    /// Machine-readable category label, used in log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config",
            Error::Fetch(_) => "fetch",
            Error::Render(_) => "render",
            Error::StoreWrite { .. } => "store_write",
            Error::StoreSync(_) => "store_sync",
            Error::BuildFailed => "build_failed",
        }
    }
}
