//! Ingestion error types

use std::path::PathBuf;

use contracts::AnalysisError;
use thiserror::Error;

/// Ingestion error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Pose file could not be read
    #[error("failed to read pose file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pose document is not valid JSON of the expected shape
    #[error("failed to decode pose sequence: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// A frame timestamp is earlier than its predecessor
    #[error("timestamps must be non-decreasing: frame {frame} at {timestamp} ms follows {previous} ms")]
    NonMonotonicTimestamps {
        frame: usize,
        previous: f64,
        timestamp: f64,
    },
}

impl From<IngestionError> for AnalysisError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::Read { source, .. } => AnalysisError::Io(source),
            IngestionError::Decode { source } => AnalysisError::PoseParse {
                message: source.to_string(),
                source: Some(Box::new(source)),
            },
            IngestionError::NonMonotonicTimestamps { frame, .. } => {
                AnalysisError::NonMonotonicTimestamps { frame }
            }
        }
    }
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
