//! Catalog error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while obtaining the catalog document
///
/// The store never exposes these directly; it collapses them into a
/// single `Failed(message)` state using the `Display` text below.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The HTTP request could not be sent or the body could not be read
    #[cfg(feature = "http")]
    #[error("Failed to fetch catalog from {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("Failed to fetch catalog: HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The catalog file could not be read
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid catalog
    #[error("Failed to parse catalog from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// A source kind this build cannot serve
    #[error("{0}")]
    Unsupported(String),
}

/// Errors for user-supplied filter and sort tokens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown sort key '{0}' (expected 'name' or 'popularity')")]
    SortKey(String),

    #[error("Unknown popularity level '{0}' (expected 'high', 'medium' or 'low')")]
    Popularity(String),

    #[error("Unknown orphan policy '{0}' (expected 'exclude' or 'bucket')")]
    OrphanPolicy(String),
}
