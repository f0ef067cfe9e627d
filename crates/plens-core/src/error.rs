//! # Error Types: I/O Tier
//!
//! Defines the load error types used throughout platform-lens. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Load failures are the I/O tier: fatal to a validation run and to the
//!   initial load of a display layer.
//! - Structural problems are never errors at this level. They are
//!   diagnostics produced by `plens-schema`.

use std::path::PathBuf;

use thiserror::Error;

/// Classification of a [`LoadError`].
///
/// Stable across releases so callers can map kinds to exit codes or
/// user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// The path does not exist or is not a regular file.
    FileNotFound,
    /// The file was read but its content is not valid JSON.
    MalformedJson,
    /// Any other I/O failure (permissions, invalid UTF-8, ...).
    UnknownIo,
}

impl LoadErrorKind {
    /// Short machine-friendly label, used in JSON reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileNotFound => "file_not_found",
            Self::MalformedJson => "malformed_json",
            Self::UnknownIo => "unknown_io",
        }
    }
}

/// Error while reading or parsing the dataset document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The dataset file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The document is not valid JSON. `detail` is the parser message
    /// verbatim, including its line and column.
    #[error("JSON syntax error: {detail}")]
    MalformedJson {
        /// Path of the document, if it came from a file.
        path: Option<PathBuf>,
        /// Parser message.
        detail: String,
        /// 1-based line reported by the parser.
        line: usize,
        /// 1-based column reported by the parser.
        column: usize,
    },

    /// Any other I/O failure.
    #[error("File read error: {}: {source}", path.display())]
    UnknownIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// The classification of this failure.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::FileNotFound { .. } => LoadErrorKind::FileNotFound,
            Self::MalformedJson { .. } => LoadErrorKind::MalformedJson,
            Self::UnknownIo { .. } => LoadErrorKind::UnknownIo,
        }
    }

    /// Build a `MalformedJson` error from a `serde_json` parse failure.
    pub(crate) fn malformed(path: Option<PathBuf>, err: &serde_json::Error) -> Self {
        Self::MalformedJson {
            path,
            detail: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let nf = LoadError::FileNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(nf.kind(), LoadErrorKind::FileNotFound);

        let io = LoadError::UnknownIo {
            path: PathBuf::from("x.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(io.kind(), LoadErrorKind::UnknownIo);
        assert_eq!(io.kind().as_str(), "unknown_io");
    }

    #[test]
    fn malformed_keeps_parser_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": ").unwrap_err();
        let load = LoadError::malformed(None, &err);
        match &load {
            LoadError::MalformedJson { line, detail, .. } => {
                assert_eq!(*line, 2);
                assert_eq!(detail, &err.to_string());
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
        assert!(load.to_string().starts_with("JSON syntax error:"));
    }
}
