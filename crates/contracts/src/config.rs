//! Analysis configuration contracts that can be shared across crates.
//!
//! Every heuristic threshold of the engine lives here with its documented
//! default, so thresholds can be tuned and tested apart from the algorithms.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{LandmarkMap, TrackedPoint};

/// Fraction of the frame count spent in setup
pub const DEFAULT_SETUP_FRACTION: f64 = 0.10;
/// Top of backswing as a fraction of the start-to-impact distance
pub const DEFAULT_BACKSWING_FRACTION: f64 = 0.80;
/// Follow-through starts at this multiple of the impact frame
pub const DEFAULT_FOLLOW_THROUGH_FACTOR: f64 = 1.20;
/// Impact fallback when no acceleration peak is found
pub const DEFAULT_IMPACT_FRACTION: f64 = 0.70;
/// Maximum backswing/downswing direction difference still called on-plane (degrees)
pub const DEFAULT_ON_PLANE_TOLERANCE_DEG: f64 = 10.0;
/// Movement-detection floor (normalized units per millisecond)
pub const DEFAULT_TAKEAWAY_VELOCITY: f64 = 1e-4;
/// Leading share of the swing searched for the top
pub const DEFAULT_TOP_SEARCH_FRACTION: f64 = 0.70;
/// Share of the swing after which impact is searched
pub const DEFAULT_IMPACT_SEARCH_FRACTION: f64 = 0.50;
/// Moving-average window
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trajectory construction
    #[validate(nested)]
    pub ingestion: IngestionConfig,

    /// Kinematics pre-processing
    #[validate(nested)]
    pub kinematics: KinematicsConfig,

    /// Phase segmentation cut points
    #[validate(nested)]
    pub phases: PhaseConfig,

    /// Path classification
    #[validate(nested)]
    pub path: PathConfig,

    /// Key-moment extraction
    #[validate(nested)]
    pub key_moments: KeyMomentConfig,
}

/// How the clubhead position is estimated from the arms
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClubheadEstimate {
    /// Midpoint of the two wrists
    #[default]
    WristMidpoint,
    /// Right wrist pushed along the elbow→wrist vector
    ForearmExtension {
        /// Multiple of the forearm length
        extension: f64,
    },
}

/// Trajectory construction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct IngestionConfig {
    /// Keypoint numbering of the pose model
    pub landmarks: LandmarkMap,

    /// Clubhead derivation
    pub clubhead: ClubheadEstimate,

    /// Landmarks below this visibility are treated as missing
    #[validate(range(min = 0.0, max = 1.0))]
    pub min_visibility: f64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            landmarks: LandmarkMap::mediapipe(),
            clubhead: ClubheadEstimate::WristMidpoint,
            min_visibility: 0.0,
        }
    }
}

/// Kinematics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Smooth every trajectory before analysis
    pub smooth_input: bool,

    /// Centered moving-average window (frames)
    #[validate(range(min = 1))]
    pub smoothing_window: usize,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            smooth_input: false,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

/// Phase Segmenter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PhaseConfig {
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub setup_fraction: f64,

    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub backswing_fraction: f64,

    #[validate(range(min = 1.0))]
    pub follow_through_factor: f64,

    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub default_impact_fraction: f64,

    /// Trajectory scanned for the impact acceleration peak
    pub impact_source: TrackedPoint,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            setup_fraction: DEFAULT_SETUP_FRACTION,
            backswing_fraction: DEFAULT_BACKSWING_FRACTION,
            follow_through_factor: DEFAULT_FOLLOW_THROUGH_FACTOR,
            default_impact_fraction: DEFAULT_IMPACT_FRACTION,
            impact_source: TrackedPoint::Clubhead,
        }
    }
}

/// Swing-Path Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PathConfig {
    #[validate(range(exclusive_min = 0.0, max = 180.0))]
    pub on_plane_tolerance_deg: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            on_plane_tolerance_deg: DEFAULT_ON_PLANE_TOLERANCE_DEG,
        }
    }
}

/// Key-Moment Extractor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct KeyMomentConfig {
    #[validate(range(min = 0.0))]
    pub takeaway_velocity_threshold: f64,

    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub top_search_fraction: f64,

    #[validate(range(min = 0.0, exclusive_max = 1.0))]
    pub impact_search_fraction: f64,
}

impl Default for KeyMomentConfig {
    fn default() -> Self {
        Self {
            takeaway_velocity_threshold: DEFAULT_TAKEAWAY_VELOCITY,
            top_search_fraction: DEFAULT_TOP_SEARCH_FRACTION,
            impact_search_fraction: DEFAULT_IMPACT_SEARCH_FRACTION,
        }
    }
}
