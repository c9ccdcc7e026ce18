//! Error type shared by the library modules.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while identifying or scanning archives.
#[derive(Error, Debug)]
pub enum Error {
    #[error("auth token file not found at {}", .0.display())]
    TokenFileNotFound(PathBuf),

    #[error("auth token file {} has no `api` field", .0.display())]
    TokenMissingField(PathBuf),

    #[error("auth token file {} is not valid JSON: {source}", .path.display())]
    TokenMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned HTTP {status} for {url}")]
    ApiStatus {
        service: &'static str,
        status: u16,
        url: String,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("pom.xml is missing <{0}>")]
    IncompletePom(&'static str),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, Error>;
