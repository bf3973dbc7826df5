//! PoseFrame - pose estimator output
//!
//! Per-frame keypoints as produced by the external pose model, plus the
//! anatomical index table that maps body landmarks to keypoint slots.

use serde::{Deserialize, Serialize};

/// Single keypoint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    /// Detection confidence in `[0, 1]`. Absent means 0.
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    /// Confidence with the documented default applied.
    #[inline]
    pub fn confidence(&self) -> f64 {
        self.visibility.unwrap_or(0.0)
    }
}

/// All keypoints detected in one video frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Frame timestamp (milliseconds)
    pub timestamp: f64,

    /// Keypoints indexed by the pose model's numbering; `None` for undetected slots
    #[serde(default)]
    pub landmarks: Vec<Option<Landmark>>,
}

impl PoseFrame {
    /// Look up a keypoint slot, treating out-of-range indices as undetected.
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index).and_then(Option::as_ref)
    }
}

/// Buffered pose sequence for one swing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseSequence {
    pub frames: Vec<PoseFrame>,
}

/// Body landmarks the analysis reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyLandmark {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl BodyLandmark {
    pub const ALL: [BodyLandmark; 8] = [
        BodyLandmark::LeftShoulder,
        BodyLandmark::RightShoulder,
        BodyLandmark::LeftElbow,
        BodyLandmark::RightElbow,
        BodyLandmark::LeftWrist,
        BodyLandmark::RightWrist,
        BodyLandmark::LeftHip,
        BodyLandmark::RightHip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
        }
    }
}

impl std::fmt::Display for BodyLandmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anatomical keypoint numbering of the upstream pose model.
///
/// This is the single place keypoint indices are defined. Swap the table
/// (or pick another preset) when the pose model changes its numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkMap {
    pub left_shoulder: usize,
    pub right_shoulder: usize,
    pub left_elbow: usize,
    pub right_elbow: usize,
    pub left_wrist: usize,
    pub right_wrist: usize,
    pub left_hip: usize,
    pub right_hip: usize,
}

impl Default for LandmarkMap {
    fn default() -> Self {
        Self::mediapipe()
    }
}

impl LandmarkMap {
    /// MediaPipe Pose (33 keypoints)
    pub const fn mediapipe() -> Self {
        Self {
            left_shoulder: 11,
            right_shoulder: 12,
            left_elbow: 13,
            right_elbow: 14,
            left_wrist: 15,
            right_wrist: 16,
            left_hip: 23,
            right_hip: 24,
        }
    }

    /// COCO / PoseNet / MoveNet (17 keypoints)
    pub const fn coco() -> Self {
        Self {
            left_shoulder: 5,
            right_shoulder: 6,
            left_elbow: 7,
            right_elbow: 8,
            left_wrist: 9,
            right_wrist: 10,
            left_hip: 11,
            right_hip: 12,
        }
    }

    /// Keypoint slot for a body landmark.
    pub fn index(&self, landmark: BodyLandmark) -> usize {
        match landmark {
            BodyLandmark::LeftShoulder => self.left_shoulder,
            BodyLandmark::RightShoulder => self.right_shoulder,
            BodyLandmark::LeftElbow => self.left_elbow,
            BodyLandmark::RightElbow => self.right_elbow,
            BodyLandmark::LeftWrist => self.left_wrist,
            BodyLandmark::RightWrist => self.right_wrist,
            BodyLandmark::LeftHip => self.left_hip,
            BodyLandmark::RightHip => self.right_hip,
        }
    }

    /// Largest keypoint slot referenced by the table.
    pub fn max_index(&self) -> usize {
        BodyLandmark::ALL
            .iter()
            .map(|&l| self.index(l))
            .max()
            .unwrap_or(0)
    }
}
