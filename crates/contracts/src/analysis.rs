//! SwingAnalysis - Analyzer output
//!
//! Everything downstream consumers (grading, export, UI) read from one swing.

use serde::{Deserialize, Serialize};

use crate::{
    PhaseSegmentation, SwingPathAnalysis, SwingTrajectory, TrajectoryMetrics, VelocityProfile,
};

/// Named frame indices of a swing.
///
/// Invariant: `takeaway <= top <= impact <= finish` and `finish == frame_count - 1`
/// for a non-empty trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyMoments {
    pub takeaway: usize,
    pub top: usize,
    pub impact: usize,
    pub finish: usize,
}

impl KeyMoments {
    pub fn is_ordered(&self) -> bool {
        self.takeaway <= self.top && self.top <= self.impact && self.impact <= self.finish
    }
}

/// Anomalies recovered during analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisDiagnostics {
    /// Landmarks absent from a frame (held at the last known position)
    pub missing_landmarks: usize,
    /// Landmarks present but below the visibility floor
    pub low_confidence_landmarks: usize,
    /// Clubhead intervals with zero elapsed time (velocity forced to 0)
    pub degenerate_intervals: usize,
}

impl AnalysisDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.missing_landmarks == 0
            && self.low_confidence_landmarks == 0
            && self.degenerate_intervals == 0
    }
}

/// Complete analysis of one swing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwingAnalysis {
    pub frame_count: usize,
    pub trajectory: SwingTrajectory,
    pub segmentation: PhaseSegmentation,
    pub clubhead_metrics: TrajectoryMetrics,
    pub wrist_metrics: TrajectoryMetrics,
    pub velocity_profile: VelocityProfile,
    pub path: SwingPathAnalysis,
    pub key_moments: KeyMoments,
    pub diagnostics: AnalysisDiagnostics,
}

impl SwingAnalysis {
    pub fn tempo_ratio(&self) -> f64 {
        self.segmentation.tempo_ratio
    }
}
