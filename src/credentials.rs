//! Loading the scan API token from the local credential file.
//!
//! The file is the one written by `snyk auth`:
//!
//! ```json
//! { "api": "<token>" }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Returns the conventional credential path, `~/.config/configstore/snyk.json`.
pub fn default_token_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("configstore")
        .join("snyk.json")
}

/// Reads the `api` token from the JSON credential file at `path`.
///
/// # Errors
///
/// - [`Error::TokenFileNotFound`] if the file does not exist
/// - [`Error::TokenMalformed`] if it is not valid JSON
/// - [`Error::TokenMissingField`] if it has no string `api` field
///
/// A remediation hint is logged before any error is returned.
pub fn load_token(path: &Path) -> Result<String> {
    let result = read_token(path);
    if result.is_err() {
        error!("Snyk auth token not found at {}", path.display());
        error!(
            "Run `snyk auth` (see https://github.com/snyk/snyk#installation) or manually create this file with your token."
        );
    }
    result
}

fn read_token(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::TokenFileNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let json: Value = serde_json::from_str(&content).map_err(|source| Error::TokenMalformed {
        path: path.to_path_buf(),
        source,
    })?;

    let token = json
        .get("api")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::TokenMissingField(path.to_path_buf()))?;

    debug!("Loaded auth token from {}", path.display());
    Ok(token.to_string())
}

/// Value of the `Authorization` header for a token.
pub fn auth_header_value(token: &str) -> String {
    format!("token {}", token)
}
