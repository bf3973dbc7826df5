//! Trajectory model
//!
//! Frame-indexed position series for each tracked point of a swing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tracked point's position at one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Milliseconds
    pub timestamp: f64,
    pub frame: usize,
}

impl TrajectoryPoint {
    pub fn new(x: f64, y: f64, z: f64, timestamp: f64, frame: usize) -> Self {
        Self {
            x,
            y,
            z,
            timestamp,
            frame,
        }
    }
}

/// Ordered points, index-aligned to frame number for a densely sampled swing.
pub type Trajectory = Vec<TrajectoryPoint>;

/// Named points tracked through a swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedPoint {
    RightWrist,
    LeftWrist,
    RightShoulder,
    LeftShoulder,
    RightHip,
    LeftHip,
    /// Derived from the wrists, never tracked directly
    Clubhead,
}

impl TrackedPoint {
    pub const ALL: [TrackedPoint; 7] = [
        TrackedPoint::RightWrist,
        TrackedPoint::LeftWrist,
        TrackedPoint::RightShoulder,
        TrackedPoint::LeftShoulder,
        TrackedPoint::RightHip,
        TrackedPoint::LeftHip,
        TrackedPoint::Clubhead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RightWrist => "right_wrist",
            Self::LeftWrist => "left_wrist",
            Self::RightShoulder => "right_shoulder",
            Self::LeftShoulder => "left_shoulder",
            Self::RightHip => "right_hip",
            Self::LeftHip => "left_hip",
            Self::Clubhead => "clubhead",
        }
    }
}

impl std::fmt::Display for TrackedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-key mapping from tracked point to trajectory.
///
/// All trajectories share the same length and frame indexing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwingTrajectory {
    pub right_wrist: Trajectory,
    pub left_wrist: Trajectory,
    pub right_shoulder: Trajectory,
    pub left_shoulder: Trajectory,
    pub right_hip: Trajectory,
    pub left_hip: Trajectory,
    pub clubhead: Trajectory,

    /// Frames at which a tracked point's landmark was not observed
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub missing_frames: BTreeMap<TrackedPoint, Vec<usize>>,
}

impl SwingTrajectory {
    /// Build every trajectory from one closure.
    pub fn from_fn(mut f: impl FnMut(TrackedPoint) -> Trajectory) -> Self {
        Self {
            right_wrist: f(TrackedPoint::RightWrist),
            left_wrist: f(TrackedPoint::LeftWrist),
            right_shoulder: f(TrackedPoint::RightShoulder),
            left_shoulder: f(TrackedPoint::LeftShoulder),
            right_hip: f(TrackedPoint::RightHip),
            left_hip: f(TrackedPoint::LeftHip),
            clubhead: f(TrackedPoint::Clubhead),
            missing_frames: BTreeMap::new(),
        }
    }

    pub fn get(&self, point: TrackedPoint) -> &Trajectory {
        match point {
            TrackedPoint::RightWrist => &self.right_wrist,
            TrackedPoint::LeftWrist => &self.left_wrist,
            TrackedPoint::RightShoulder => &self.right_shoulder,
            TrackedPoint::LeftShoulder => &self.left_shoulder,
            TrackedPoint::RightHip => &self.right_hip,
            TrackedPoint::LeftHip => &self.left_hip,
            TrackedPoint::Clubhead => &self.clubhead,
        }
    }

    /// Number of frames (length of the clubhead trajectory).
    pub fn frame_count(&self) -> usize {
        self.clubhead.len()
    }

    /// Timestamps shared by all trajectories.
    pub fn timestamps(&self) -> Vec<f64> {
        self.clubhead.iter().map(|p| p.timestamp).collect()
    }

    /// Apply a transformation to every trajectory, keeping the missing-frame record.
    pub fn map(&self, mut f: impl FnMut(&Trajectory) -> Trajectory) -> Self {
        let mut mapped = Self::from_fn(|point| f(self.get(point)));
        mapped.missing_frames = self.missing_frames.clone();
        mapped
    }

    /// Whether the point's landmark was observed at `frame`.
    pub fn is_observed(&self, point: TrackedPoint, frame: usize) -> bool {
        self.missing_frames
            .get(&point)
            .map(|frames| frames.binary_search(&frame).is_err())
            .unwrap_or(true)
    }

    /// Whether all trajectories share the clubhead's length.
    pub fn is_aligned(&self) -> bool {
        let n = self.frame_count();
        TrackedPoint::ALL.iter().all(|&p| self.get(p).len() == n)
    }
}
