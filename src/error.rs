//! Unified error types for stockdeck.
//!
//! All fallible library operations return [`Result`]. Binary entry points
//! convert these into `anyhow` context at the boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for stockdeck operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StockdeckError {
    /// Errors while reading or decoding a company listing
    #[error("Failed to load listing: {context}")]
    Listing {
        context: String,
        #[source]
        source: ListingErrorKind,
    },

    /// Errors while reading or validating an industry catalog
    #[error("Failed to load catalog: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Export failures (watchlist, group dumps)
    #[error("Export failed: {0}")]
    Export(String),

    /// Terminal setup or rendering failures
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Specific listing decode error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ListingErrorKind {
    #[error("Unknown listing format - expected a JSON array or CSV with headers")]
    UnknownFormat,

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid CSV record: {0}")]
    InvalidCsv(String),

    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),

    #[error("Catalog has no industry groups")]
    Empty,

    #[error("Group '{key}' has an empty sector list")]
    EmptySectors { key: String },
}

/// Convenience result type
pub type Result<T> = std::result::Result<T, StockdeckError>;

impl StockdeckError {
    /// Wrap an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        Self::Io {
            message: source.to_string(),
            path: Some(path),
            source,
        }
    }

    /// Build a listing error with context.
    pub fn listing(context: impl Into<String>, source: ListingErrorKind) -> Self {
        Self::Listing {
            context: context.into(),
            source,
        }
    }

    /// Build a catalog error with context.
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }
}
