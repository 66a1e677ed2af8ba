use std::io;
use std::path::{Path, PathBuf};

use crate::classifier::ClassifierError;

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<reader>".to_string())
}

/// Failure to load the startup artifacts. Any of these stops the process before
/// it serves a single request.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV error in {}: {source}", describe_path(path))]
    Csv {
        path: Option<PathBuf>,
        #[source]
        source: csv::Error,
    },
    #[error("Table {} has no '{column}' column", describe_path(path))]
    MissingColumn {
        column: String,
        path: Option<PathBuf>,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },
    #[error("Hash mismatch for {file}: expected {expected}, got {actual}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
    #[error("Failed to load {}: {source}", path.display())]
    Classifier {
        path: PathBuf,
        #[source]
        source: ClassifierError,
    },
    #[error("Missing artifact: {0} was not configured")]
    Unconfigured(&'static str),
}

impl From<csv::Error> for ArtifactError {
    fn from(err: csv::Error) -> Self {
        ArtifactError::Csv { path: None, source: err }
    }
}

impl ArtifactError {
    /// Attaches a file path to errors raised while reading from a bare reader
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            ArtifactError::Csv { path: None, source } => ArtifactError::Csv {
                path: Some(path.to_path_buf()),
                source,
            },
            ArtifactError::MissingColumn { column, path: None } => ArtifactError::MissingColumn {
                column,
                path: Some(path.to_path_buf()),
            },
            other => other,
        }
    }

    pub(crate) fn io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
            _ => ArtifactError::Io { path: path.to_path_buf(), source: err },
        }
    }
}
