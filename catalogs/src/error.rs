//! Error types for catalogue retrieval.

use thiserror::Error;

/// Errors from remote catalogue queries and response handling.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid query URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Table(#[from] skytable::TableError),

    #[error(transparent)]
    Photometry(#[from] photometry::PhotometryError),

    #[error("malformed service response: {0}")]
    Parse(String),

    #[error("service returned no usable result")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
