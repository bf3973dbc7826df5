//! Layered error definitions
//!
//! Categorized by source: input / config / io.
//!
//! Only `InsufficientData` escapes the engine during analysis. Missing landmarks
//! and degenerate geometry are recovered where they occur and surface as
//! [`AnalysisDiagnostics`](crate::AnalysisDiagnostics) counters instead.

use thiserror::Error;

/// Minimum number of frames a swing must contain to be segmented.
pub const MIN_SWING_FRAMES: usize = 10;

/// Unified error type
#[derive(Debug, Error)]
pub enum AnalysisError {
    // ===== Input Errors =====
    /// Too few frames to segment a swing
    #[error("insufficient data: need at least {required} frames, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Pose sequence could not be decoded
    #[error("pose parse error: {message}")]
    PoseParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Frame timestamps went backwards
    #[error("timestamps must be non-decreasing, violated at frame {frame}")]
    NonMonotonicTimestamps { frame: usize },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Create insufficient data error
    pub fn insufficient_data(actual: usize) -> Self {
        Self::InsufficientData {
            required: MIN_SWING_FRAMES,
            actual,
        }
    }

    /// Create pose parse error
    pub fn pose_parse(message: impl Into<String>) -> Self {
        Self::PoseParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Short, stable label used as a metrics dimension
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::PoseParse { .. } => "pose_parse",
            Self::NonMonotonicTimestamps { .. } => "non_monotonic_timestamps",
            Self::ConfigParse { .. } => "config_parse",
            Self::ConfigValidation { .. } => "config_validation",
            Self::Io(_) => "io",
        }
    }
}

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = AnalysisError::insufficient_data(7);
        let msg = err.to_string();
        assert!(msg.contains("10"), "got: {msg}");
        assert!(msg.contains('7'), "got: {msg}");
        assert_eq!(err.kind(), "insufficient_data");
    }

    #[test]
    fn test_config_validation_display() {
        let err = AnalysisError::config_validation("phases.setup_fraction", "must be < 1");
        assert_eq!(
            err.to_string(),
            "config validation error at 'phases.setup_fraction': must be < 1"
        );
    }
}
