//! Pipeline error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching, decoding or writing catalog content
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client")]
    HttpClient(#[source] reqwest::Error),

    /// The catalog endpoint could not be reached
    #[error("Failed to fetch catalog from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The catalog endpoint answered with a non-success status
    #[error("Catalog request to {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A fixture file could not be read
    #[error("Failed to read catalog fixture: {path}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The fetched payload is not a JSON array of patterns
    #[error("Failed to decode catalog patterns")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read the configuration file
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pattern id or type cannot be used as a path component
    #[error("Pattern '{pattern_id}' cannot be written: {reason}")]
    InvalidPattern { pattern_id: String, reason: String },

    /// Failed to create a directory or write an output file
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the package descriptor
    #[error("Failed to serialize package descriptor for pattern '{pattern_id}'")]
    Serialize {
        pattern_id: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
