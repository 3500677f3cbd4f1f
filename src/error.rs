//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`NormalizeError`]: the failure kinds of a single payload normalization
//! - [`CatalogError`](crate::catalog::CatalogError): failures of the external catalog client
//! - [`Error`]: top-level enum aggregating everything for unified handling
//!
//! # Example
//!
//! ```ignore
//! use hook_normalizer::error::{Error, Result, ResultExt};
//!
//! fn read_payload(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_context("reading webhook payload")
//! }
//! ```

use std::path::PathBuf;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure kinds of normalizing one webhook payload.
///
/// `MissingRequiredField` and `UnsupportedInputShape` abort the whole record.
/// The transport and parse kinds only ever reach a caller from the catalog
/// commands; inside the resolver they degrade to "no identifier".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: String },

    #[error("Unsupported input shape: {0}")]
    UnsupportedInputShape(String),

    #[error("Catalog transport failure: {0}")]
    TransportFailure(String),

    #[error("Failed to parse catalog response: {0}")]
    ResponseParseFailure(String),
}

impl NormalizeError {
    /// Create a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Name of the offending field, if this is a missing-field error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field } => Some(field),
            _ => None,
        }
    }
}

impl From<CatalogError> for NormalizeError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Parse(msg) => Self::ResponseParseFailure(msg),
            other => Self::TransportFailure(other.to_string()),
        }
    }
}

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload normalization error
    #[error("Normalization failed for {source_name}: {inner}")]
    Normalize {
        source_name: String,
        #[source]
        inner: NormalizeError,
    },

    /// No processor registered for a payload source
    #[error("No processor registered for source: {0}")]
    UnknownSource(String),

    /// Persistence hand-off failed
    #[error("Failed to hand off record: {0}")]
    Sink(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Config file not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap a normalization failure with the name of the source it came from.
    pub fn normalize(source_name: impl Into<String>, inner: NormalizeError) -> Self {
        Self::Normalize {
            source_name: source_name.into(),
            inner,
        }
    }

    /// Create a sink error.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// The underlying normalization failure, looking through any context layers.
    pub fn as_normalize(&self) -> Option<&NormalizeError> {
        match self {
            Self::Normalize { inner, .. } => Some(inner),
            Self::WithContext { source, .. } => source.as_normalize(),
            _ => None,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
