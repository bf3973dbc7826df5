//! Synthetic swing source
//!
//! Generates a plausible pose sequence for tests and demos: still address,
//! a backswing rising to the top, an accelerating downswing, and a
//! decelerating follow-through.

use std::f64::consts::PI;
use std::ops::Range;

use contracts::{BodyLandmark, Landmark, LandmarkMap, PoseFrame, PoseSequence};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Swing progress at which the club starts moving
const ADDRESS_END: f64 = 0.15;
/// Swing progress at the top of the backswing
const TOP: f64 = 0.60;
/// Swing progress at impact
const IMPACT: f64 = 0.75;

/// Arm angle at the top (radians, 0 = hands hanging at address)
const BACKSWING_ARC: f64 = 0.75 * PI;
/// Arm angle at the finish
const FOLLOW_THROUGH_ARC: f64 = 0.7 * PI;

const SHOULDER_CENTER: [f64; 2] = [0.5, 0.4];
const HIP_CENTER: [f64; 2] = [0.5, 0.65];
const ARM_LENGTH: f64 = 0.3;
const SHOULDER_HALF_WIDTH: f64 = 0.08;
const HIP_HALF_WIDTH: f64 = 0.06;
/// Share of the arm angle transferred to the shoulder/hip lines
const SHOULDER_COIL: f64 = 0.35;
const HIP_COIL: f64 = 0.15;

/// Synthetic swing configuration
#[derive(Debug, Clone)]
pub struct SyntheticSwingConfig {
    /// Number of frames
    pub frames: usize,

    /// Frame rate (Hz)
    pub fps: f64,

    /// Uniform position noise amplitude (normalized units)
    pub jitter: f64,

    /// RNG seed for the jitter
    pub seed: u64,

    /// Keypoint numbering of the generated frames
    pub landmarks: LandmarkMap,

    /// Visibility reported for every keypoint
    pub visibility: f64,
}

impl Default for SyntheticSwingConfig {
    fn default() -> Self {
        Self {
            frames: 60,
            fps: 30.0,
            jitter: 0.0,
            seed: 0,
            landmarks: LandmarkMap::mediapipe(),
            visibility: 0.95,
        }
    }
}

/// Synthetic swing source
pub struct SyntheticSwing {
    config: SyntheticSwingConfig,
    occlusions: Vec<(BodyLandmark, Range<usize>)>,
}

impl SyntheticSwing {
    pub fn new(config: SyntheticSwingConfig) -> Self {
        Self {
            config,
            occlusions: Vec::new(),
        }
    }

    /// Clean swing with the default frame rate
    pub fn standard(frames: usize) -> Self {
        Self::new(SyntheticSwingConfig {
            frames,
            ..Default::default()
        })
    }

    /// Swing with deterministic position noise
    pub fn noisy(frames: usize, jitter: f64, seed: u64) -> Self {
        Self::new(SyntheticSwingConfig {
            frames,
            jitter,
            seed,
            ..Default::default()
        })
    }

    /// Drop a landmark from the given frames
    pub fn with_occlusion(mut self, landmark: BodyLandmark, frames: Range<usize>) -> Self {
        self.occlusions.push((landmark, frames));
        self
    }

    pub fn config(&self) -> &SyntheticSwingConfig {
        &self.config
    }

    /// Frame index of the scripted impact
    pub fn impact_frame(&self) -> usize {
        self.frame_at(IMPACT)
    }

    /// Frame index of the scripted top of backswing
    pub fn top_frame(&self) -> usize {
        self.frame_at(TOP)
    }

    /// Generate the pose frames
    pub fn generate(&self) -> Vec<PoseFrame> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let slots = cfg.landmarks.max_index() + 1;
        let frame_ms = if cfg.fps > 0.0 { 1000.0 / cfg.fps } else { 0.0 };

        let frames: Vec<PoseFrame> = (0..cfg.frames)
            .map(|i| {
                let progress = if cfg.frames > 1 {
                    i as f64 / (cfg.frames - 1) as f64
                } else {
                    0.0
                };
                let mut landmarks = vec![None; slots];
                for (landmark, [x, y]) in body_pose(arm_angle(progress)) {
                    if self.is_occluded(landmark, i) {
                        continue;
                    }
                    let (dx, dy) = if cfg.jitter > 0.0 {
                        (
                            rng.random_range(-cfg.jitter..=cfg.jitter),
                            rng.random_range(-cfg.jitter..=cfg.jitter),
                        )
                    } else {
                        (0.0, 0.0)
                    };
                    landmarks[cfg.landmarks.index(landmark)] =
                        Some(Landmark::new(x + dx, y + dy, 0.0, cfg.visibility));
                }
                PoseFrame {
                    timestamp: i as f64 * frame_ms,
                    landmarks,
                }
            })
            .collect();

        debug!(
            frames = frames.len(),
            fps = cfg.fps,
            jitter = cfg.jitter,
            "synthetic swing generated"
        );
        frames
    }

    pub fn sequence(&self) -> PoseSequence {
        PoseSequence {
            frames: self.generate(),
        }
    }

    fn frame_at(&self, progress: f64) -> usize {
        (progress * self.config.frames.saturating_sub(1) as f64).round() as usize
    }

    fn is_occluded(&self, landmark: BodyLandmark, frame: usize) -> bool {
        self.occlusions
            .iter()
            .any(|(l, range)| *l == landmark && range.contains(&frame))
    }
}

/// Arm angle over swing progress `t` in `[0, 1]`.
///
/// Negative angles swing the hands up behind the body, positive through to
/// the finish. The downswing accelerates into impact and the follow-through
/// starts slower, leaving the largest velocity change at impact.
fn arm_angle(t: f64) -> f64 {
    if t < ADDRESS_END {
        0.0
    } else if t < TOP {
        let u = (t - ADDRESS_END) / (TOP - ADDRESS_END);
        -BACKSWING_ARC * u * u * (3.0 - 2.0 * u)
    } else if t < IMPACT {
        let u = (t - TOP) / (IMPACT - TOP);
        -BACKSWING_ARC * (1.0 - u * u)
    } else {
        let u = (t - IMPACT) / (1.0 - IMPACT);
        FOLLOW_THROUGH_ARC * u * (2.0 - u)
    }
}

/// Image-space position of every body landmark for one arm angle.
fn body_pose(angle: f64) -> [(BodyLandmark, [f64; 2]); 8] {
    let [cx, cy] = SHOULDER_CENTER;
    let hands = [cx + ARM_LENGTH * angle.sin(), cy + ARM_LENGTH * angle.cos()];
    let elbows = [
        cx + 0.5 * ARM_LENGTH * angle.sin(),
        cy + 0.5 * ARM_LENGTH * angle.cos(),
    ];

    let (left_shoulder, right_shoulder) =
        line_ends(SHOULDER_CENTER, SHOULDER_HALF_WIDTH, SHOULDER_COIL * angle);
    let (left_hip, right_hip) = line_ends(HIP_CENTER, HIP_HALF_WIDTH, HIP_COIL * angle);

    [
        (BodyLandmark::LeftShoulder, left_shoulder),
        (BodyLandmark::RightShoulder, right_shoulder),
        (BodyLandmark::LeftElbow, [elbows[0] + 0.01, elbows[1]]),
        (BodyLandmark::RightElbow, [elbows[0] - 0.01, elbows[1]]),
        (BodyLandmark::LeftWrist, [hands[0] + 0.01, hands[1]]),
        (BodyLandmark::RightWrist, [hands[0] - 0.01, hands[1]]),
        (BodyLandmark::LeftHip, left_hip),
        (BodyLandmark::RightHip, right_hip),
    ]
}

/// Left and right ends of a line through `center` tilted by `tilt` radians.
fn line_ends(center: [f64; 2], half_width: f64, tilt: f64) -> ([f64; 2], [f64; 2]) {
    let (dx, dy) = (half_width * tilt.cos(), half_width * tilt.sin());
    (
        [center[0] - dx, center[1] - dy],
        [center[0] + dx, center[1] + dy],
    )
}
