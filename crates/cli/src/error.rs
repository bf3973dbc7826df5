//! Error types for CLI operations.

use std::path::PathBuf;

use contracts::AnalysisError;
use ingestion::IngestionError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Pose file could not be turned into a trajectory
    #[error("{}: {source}", path.display())]
    Ingestion {
        path: PathBuf,
        #[source]
        source: IngestionError,
    },

    /// Analysis rejected the swing
    #[error("{}: {source}", path.display())]
    Analysis {
        path: PathBuf,
        #[source]
        source: AnalysisError,
    },

    /// Analysis worker panicked or was cancelled
    #[error("Analysis worker failed: {message}")]
    Worker { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// Stable label for failure counts
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "config_not_found",
            Self::Ingestion { source, .. } => match source {
                IngestionError::Read { .. } => "io",
                IngestionError::Decode { .. } => "pose_parse",
                IngestionError::NonMonotonicTimestamps { .. } => "non_monotonic_timestamps",
            },
            Self::Analysis { source, .. } => source.kind(),
            Self::Worker { .. } => "worker",
            Self::Io(_) => "io",
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
