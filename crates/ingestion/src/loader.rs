//! Pose sequence loading
//!
//! Accepts either `{"frames": [...]}` or a bare array of frames.

use std::path::Path;

use contracts::{PoseFrame, PoseSequence};
use serde::Deserialize;
use tracing::debug;

use crate::error::{IngestionError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum PoseDocument {
    Wrapped(PoseSequence),
    Bare(Vec<PoseFrame>),
}

/// Parse a pose sequence from a JSON string
pub fn parse_pose_sequence(content: &str) -> Result<PoseSequence> {
    let document: PoseDocument =
        serde_json::from_str(content).map_err(|source| IngestionError::Decode { source })?;

    Ok(match document {
        PoseDocument::Wrapped(sequence) => sequence,
        PoseDocument::Bare(frames) => PoseSequence { frames },
    })
}

/// Read and parse a pose sequence file
pub fn load_pose_sequence(path: &Path) -> Result<PoseSequence> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let sequence = parse_pose_sequence(&content)?;
    debug!(
        path = %path.display(),
        frames = sequence.frames.len(),
        "pose sequence loaded"
    );
    Ok(sequence)
}
