//! Loading rankable records from a JSON file.
//!
//! Accepts either a top-level array of objects or a response envelope whose
//! `data` member is such an array.

use serde_json::Value;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors while reading an input file.
#[derive(Debug)]
pub enum InputError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    NotAnArray(PathBuf),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "Cannot read '{}': {}", path.display(), source),
            Self::Parse { path, source } => {
                write!(f, "Invalid JSON in '{}': {}", path.display(), source)
            }
            Self::NotAnArray(path) => write!(
                f,
                "Expected a JSON array (or an object with a 'data' array) in '{}'",
                path.display()
            ),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::NotAnArray(_) => None,
        }
    }
}

/// Read the records in `path`.
pub fn load_records(path: &Path) -> Result<Vec<Value>, InputError> {
    let data = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&data).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(InputError::NotAnArray(path.to_path_buf())),
        },
        _ => return Err(InputError::NotAnArray(path.to_path_buf())),
    };

    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}
