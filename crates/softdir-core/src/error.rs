//! Error types and handling for softdir-core operations.
//!
//! Catalog generation is deliberately forgiving on the read side: missing
//! directories, empty metadata files and undecodable text all degrade to
//! "field absent" or lossy text instead of surfacing as errors. What remains
//! here are the failures that should stop a build:
//!
//! - **I/O Errors**: reading a directory listing that exists but cannot be opened
//! - **Serialization Errors**: encoding or parsing the catalog document
//! - **Configuration Errors**: unreadable or malformed `softdir.toml`
//! - **Storage Errors**: creating the output directory or committing the catalog
//! - **Not Found**: a requested resource is absent from a catalog
//! - **Invalid URL**: a download path could not be encoded
//!
//! ```rust
//! use softdir_core::{Error, Result};
//!
//! fn publish() -> Result<()> {
//!     Err(Error::Storage("disk full".into()))
//! }
//!
//! match publish() {
//!     Err(e) => assert_eq!(e.category(), "storage"),
//!     Ok(()) => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// The main error type for softdir-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// The underlying `std::io::Error` is preserved so callers can inspect
    /// the [`std::io::ErrorKind`].
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    ///
    /// Raised when the catalog cannot be encoded as JSON, or when a
    /// previously generated document does not match the catalog schema.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in `softdir.toml`
    /// - An explicitly requested config file that does not exist
    /// - Environment overrides with unparsable values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing generated output failed.
    ///
    /// Covers output directory creation and the temp-file-then-rename commit
    /// of the catalog. These failures are fatal for a build.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A download URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Short, stable label for the error category.
    ///
    /// Useful for log fields and for tests that assert on the kind of
    /// failure without matching the full message.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
