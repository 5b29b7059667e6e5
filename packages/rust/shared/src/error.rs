//! Error types for handbookgen.
//!
//! Library crates use [`HandbookError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all handbookgen operations.
///
/// Every variant is fatal: generation is all-or-nothing, and errors
/// propagate straight to the caller with no retry or partial output.
#[derive(Debug, thiserror::Error)]
pub enum HandbookError {
    /// Destination path already exists and overwrite was not requested.
    #[error("target directory {path:?} exists; use explicit --overwrite")]
    Precondition { path: PathBuf },

    /// A source document or directory could not be read.
    #[error("read error at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A document could not be parsed at all while searching for a heading.
    /// A parseable document with no heading is not an error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Template compilation or rendering failure.
    #[error("render error: {0}")]
    Render(String),

    /// Two documents resolved to the same module path under strict mode.
    #[error("conflicting module path '{path}': multiple documents share this title")]
    Conflict { path: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error outside of document reads.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HandbookError>;

impl HandbookError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a render error from any displayable message.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Wrap a `std::io::Error` from a document or directory read.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = HandbookError::config("missing docs_dir");
        assert_eq!(err.to_string(), "config error: missing docs_dir");

        let err = HandbookError::parse("markdown grammar rejected input");
        assert!(err.to_string().contains("markdown grammar"));

        let err = HandbookError::Conflict {
            path: "api.Client".into(),
        };
        assert!(err.to_string().contains("api.Client"));
    }

    #[test]
    fn precondition_mentions_overwrite() {
        let err = HandbookError::Precondition {
            path: PathBuf::from("/tmp/handbook"),
        };
        assert!(err.to_string().contains("--overwrite"));
    }
}
