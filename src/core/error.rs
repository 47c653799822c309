//! Error types for data file loading.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur when loading or cross-checking RON data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A definition names something no other data file defines.
    #[error("{owner} references unknown {kind} '{id}'")]
    UnknownReference {
        owner: String,
        kind: &'static str,
        id: String,
    },
}

impl DataLoadError {
    pub(crate) fn read(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path.display().to_string())
        } else {
            Self::ReadError {
                path: path.display().to_string(),
                details: err.to_string(),
            }
        }
    }

    pub(crate) fn parse(path: &Path, err: ron::error::SpannedError) -> Self {
        Self::ParseError {
            path: path.display().to_string(),
            details: err.to_string(),
        }
    }
}
