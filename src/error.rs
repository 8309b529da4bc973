use std::path::{Path, PathBuf};

/// Failures while turning report files into rows.
///
/// A missing file is never an error; these are reserved for content the
/// caller has to see (and for bad discovery patterns in configuration).
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML in {}: {message}", .path.display())]
    Xml { path: PathBuf, message: String },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid source pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid environment pattern '{pattern}': {source}")]
    Naming {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;

impl IngestError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn xml(path: &Path, message: impl Into<String>) -> Self {
        IngestError::Xml {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        IngestError::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file that could not be ingested, if the failure is file-bound.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IngestError::Io { path, .. }
            | IngestError::Xml { path, .. }
            | IngestError::Json { path, .. } => Some(path),
            IngestError::Pattern { .. } | IngestError::Naming { .. } => None,
        }
    }
}
