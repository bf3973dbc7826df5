//! Trajectory construction
//!
//! Turns buffered pose frames into one `SwingTrajectory`. Unobserved landmarks
//! hold their last known position so they contribute no motion.

use std::sync::Arc;

use contracts::{
    BodyLandmark, ClubheadEstimate, IngestionConfig, PoseFrame, SwingTrajectory, TrackedPoint,
    Trajectory, TrajectoryPoint,
};
use tracing::{debug, instrument, warn};

use crate::clubhead::estimate_clubhead;
use crate::error::{IngestionError, Result};
use crate::stats::IngestionMetrics;

/// Body landmark feeding each tracked point.
const TRACKED_LANDMARKS: [(TrackedPoint, BodyLandmark); 6] = [
    (TrackedPoint::RightWrist, BodyLandmark::RightWrist),
    (TrackedPoint::LeftWrist, BodyLandmark::LeftWrist),
    (TrackedPoint::RightShoulder, BodyLandmark::RightShoulder),
    (TrackedPoint::LeftShoulder, BodyLandmark::LeftShoulder),
    (TrackedPoint::RightHip, BodyLandmark::RightHip),
    (TrackedPoint::LeftHip, BodyLandmark::LeftHip),
];

/// Trajectory plus the landmark anomalies recovered while building it
#[derive(Debug, Clone)]
pub struct BuiltTrajectory {
    pub trajectory: SwingTrajectory,
    pub missing_landmarks: usize,
    pub low_confidence_landmarks: usize,
}

/// One landmark's positions after gap filling
struct LandmarkTrack {
    positions: Vec<[f64; 3]>,
    missing: Vec<usize>,
    absent: usize,
    low_confidence: usize,
}

/// Builds trajectories from pose frames
pub struct TrajectoryBuilder {
    config: IngestionConfig,
    metrics: Option<Arc<IngestionMetrics>>,
}

impl TrajectoryBuilder {
    pub fn new(config: &IngestionConfig) -> Self {
        Self {
            config: config.clone(),
            metrics: None,
        }
    }

    /// Share counters with other builders
    pub fn with_metrics(mut self, metrics: Arc<IngestionMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the swing trajectory for a buffered sequence
    ///
    /// # Errors
    /// `NonMonotonicTimestamps` when a timestamp is smaller than the previous one.
    #[instrument(
        level = "debug",
        name = "trajectory_builder.build",
        skip(self, frames),
        fields(frames = frames.len())
    )]
    pub fn build(&self, frames: &[PoseFrame]) -> Result<BuiltTrajectory> {
        if let Err(err) = check_timestamps(frames) {
            if let Some(m) = &self.metrics {
                m.record_rejected();
            }
            metrics::counter!("swing_analyzer_sequences_rejected_total").increment(1);
            return Err(err);
        }

        let mut trajectory = SwingTrajectory::default();
        let mut missing_landmarks = 0;
        let mut low_confidence_landmarks = 0;

        let tracks: Vec<LandmarkTrack> = TRACKED_LANDMARKS
            .iter()
            .map(|&(point, landmark)| {
                let track = self.track(frames, landmark);
                missing_landmarks += track.absent;
                low_confidence_landmarks += track.low_confidence;
                *slot(&mut trajectory, point) = to_trajectory(&track.positions, frames);
                if !track.missing.is_empty() {
                    trajectory.missing_frames.insert(point, track.missing.clone());
                }
                track
            })
            .collect();
        let (right_wrist, left_wrist) = (&tracks[0], &tracks[1]);

        // Clubhead: estimated from the wrists and, for forearm extension, the right elbow
        let elbow = match self.config.clubhead {
            ClubheadEstimate::WristMidpoint => None,
            ClubheadEstimate::ForearmExtension { .. } => {
                let track = self.track(frames, BodyLandmark::RightElbow);
                missing_landmarks += track.absent;
                low_confidence_landmarks += track.low_confidence;
                Some(track)
            }
        };

        // An elbow never observed has no forearm to extend along
        let elbow = elbow.filter(|track| {
            let seen = frames.is_empty() || track.missing.len() < frames.len();
            if !seen {
                warn!(
                    frames = frames.len(),
                    "right elbow never observed, clubhead falls back to wrist midpoint"
                );
            }
            seen
        });
        let estimate = match elbow {
            Some(_) => self.config.clubhead,
            None => ClubheadEstimate::WristMidpoint,
        };

        let clubhead: Vec<[f64; 3]> = (0..frames.len())
            .map(|i| {
                let elbow_pos = elbow.as_ref().map(|t| t.positions[i]).unwrap_or_default();
                estimate_clubhead(
                    estimate,
                    right_wrist.positions[i],
                    left_wrist.positions[i],
                    elbow_pos,
                )
            })
            .collect();
        trajectory.clubhead = to_trajectory(&clubhead, frames);

        let clubhead_missing = match &elbow {
            None => merge_frames(&[&right_wrist.missing, &left_wrist.missing]),
            Some(e) => merge_frames(&[&right_wrist.missing, &e.missing]),
        };
        if !clubhead_missing.is_empty() {
            trajectory
                .missing_frames
                .insert(TrackedPoint::Clubhead, clubhead_missing);
        }

        if missing_landmarks + low_confidence_landmarks > 0 {
            warn!(
                missing_landmarks,
                low_confidence_landmarks,
                frames = frames.len(),
                "landmark gaps filled by holding last known position"
            );
        }
        debug!(
            frames = frames.len(),
            clubhead = ?self.config.clubhead,
            "trajectory built"
        );

        metrics::counter!("swing_analyzer_landmarks_missing_total")
            .increment(missing_landmarks as u64);
        metrics::counter!("swing_analyzer_landmarks_low_confidence_total")
            .increment(low_confidence_landmarks as u64);
        if let Some(m) = &self.metrics {
            m.record_built(frames.len(), missing_landmarks, low_confidence_landmarks);
        }

        Ok(BuiltTrajectory {
            trajectory,
            missing_landmarks,
            low_confidence_landmarks,
        })
    }

    /// Read one landmark through the index table and fill its gaps
    fn track(&self, frames: &[PoseFrame], landmark: BodyLandmark) -> LandmarkTrack {
        let index = self.config.landmarks.index(landmark);
        let mut absent = 0;
        let mut low_confidence = 0;

        let observed: Vec<Option<[f64; 3]>> = frames
            .iter()
            .map(|frame| match frame.landmark(index) {
                None => {
                    absent += 1;
                    None
                }
                Some(lm) if lm.confidence() < self.config.min_visibility => {
                    low_confidence += 1;
                    None
                }
                Some(lm) => Some([lm.x, lm.y, lm.z]),
            })
            .collect();

        let missing: Vec<usize> = observed
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.is_none().then_some(i))
            .collect();

        LandmarkTrack {
            positions: fill_gaps(&observed),
            missing,
            absent,
            low_confidence,
        }
    }
}

fn check_timestamps(frames: &[PoseFrame]) -> Result<()> {
    for (i, pair) in frames.windows(2).enumerate() {
        let (previous, timestamp) = (pair[0].timestamp, pair[1].timestamp);
        if timestamp < previous || timestamp.is_nan() || previous.is_nan() {
            return Err(IngestionError::NonMonotonicTimestamps {
                frame: i + 1,
                previous,
                timestamp,
            });
        }
    }
    Ok(())
}

/// Hold the last known position; leading gaps take the first known one,
/// a landmark never seen sits at the origin.
fn fill_gaps(observed: &[Option<[f64; 3]>]) -> Vec<[f64; 3]> {
    let first_known = observed.iter().flatten().next().copied().unwrap_or([0.0; 3]);
    let mut last = first_known;
    observed
        .iter()
        .map(|p| {
            if let Some(p) = p {
                last = *p;
            }
            last
        })
        .collect()
}

fn to_trajectory(positions: &[[f64; 3]], frames: &[PoseFrame]) -> Trajectory {
    positions
        .iter()
        .zip(frames)
        .enumerate()
        .map(|(i, (p, frame))| TrajectoryPoint::new(p[0], p[1], p[2], frame.timestamp, i))
        .collect()
}

fn merge_frames(lists: &[&Vec<usize>]) -> Vec<usize> {
    let mut merged: Vec<usize> = lists.iter().flat_map(|l| l.iter().copied()).collect();
    merged.sort_unstable();
    merged.dedup();
    merged
}

fn slot(trajectory: &mut SwingTrajectory, point: TrackedPoint) -> &mut Trajectory {
    match point {
        TrackedPoint::RightWrist => &mut trajectory.right_wrist,
        TrackedPoint::LeftWrist => &mut trajectory.left_wrist,
        TrackedPoint::RightShoulder => &mut trajectory.right_shoulder,
        TrackedPoint::LeftShoulder => &mut trajectory.left_shoulder,
        TrackedPoint::RightHip => &mut trajectory.right_hip,
        TrackedPoint::LeftHip => &mut trajectory.left_hip,
        TrackedPoint::Clubhead => &mut trajectory.clubhead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Landmark, LandmarkMap};

    /// Frame with every MediaPipe slot filled at `(x, y)`
    fn frame(timestamp: f64, x: f64, y: f64) -> PoseFrame {
        PoseFrame {
            timestamp,
            landmarks: vec![Some(Landmark::new(x, y, 0.0, 0.9)); 33],
        }
    }

    fn builder() -> TrajectoryBuilder {
        TrajectoryBuilder::new(&IngestionConfig::default())
    }

    #[test]
    fn test_points_follow_frame_index_and_timestamps() {
        let frames: Vec<_> = (0..5).map(|i| frame(i as f64 * 33.0, 0.1 * i as f64, 0.5)).collect();
        let built = builder().build(&frames).unwrap();
        let traj = &built.trajectory;

        assert!(traj.is_aligned());
        assert_eq!(traj.frame_count(), 5);
        assert_eq!(traj.right_wrist[3].frame, 3);
        assert_eq!(traj.right_wrist[3].timestamp, 99.0);
        assert!((traj.clubhead[2].x - 0.2).abs() < 1e-12);
        assert_eq!(built.missing_landmarks, 0);
        assert!(traj.missing_frames.is_empty());
    }

    #[test]
    fn test_missing_landmark_holds_last_position() {
        let mut frames: Vec<_> = (0..4).map(|i| frame(i as f64, 0.1 * i as f64, 0.5)).collect();
        let left_shoulder = LandmarkMap::mediapipe().left_shoulder;
        frames[2].landmarks[left_shoulder] = None;

        let built = builder().build(&frames).unwrap();
        let ls = &built.trajectory.left_shoulder;
        assert_eq!(ls[2].x, ls[1].x);
        assert_eq!(built.missing_landmarks, 1);
        assert!(!built.trajectory.is_observed(TrackedPoint::LeftShoulder, 2));
        assert!(built.trajectory.is_observed(TrackedPoint::LeftShoulder, 3));
    }

    #[test]
    fn test_leading_gap_takes_next_known() {
        let mut frames: Vec<_> = (0..3).map(|i| frame(i as f64, 0.2 + 0.1 * i as f64, 0.5)).collect();
        frames[0].landmarks.truncate(20);

        let built = builder().build(&frames).unwrap();
        let hip = &built.trajectory.right_hip;
        assert!((hip[0].x - hip[1].x).abs() < 1e-12);
        // Two hips absent in frame 0
        assert_eq!(built.missing_landmarks, 2);
    }

    #[test]
    fn test_unseen_elbow_falls_back_to_wrist_midpoint() {
        let mut frames: Vec<_> = (0..3).map(|i| frame(i as f64, 0.5, 0.6)).collect();
        let right_elbow = LandmarkMap::mediapipe().right_elbow;
        for f in &mut frames {
            f.landmarks[right_elbow] = None;
        }
        let config = IngestionConfig {
            clubhead: ClubheadEstimate::ForearmExtension { extension: 1.0 },
            ..Default::default()
        };

        let built = TrajectoryBuilder::new(&config).build(&frames).unwrap();
        let clubhead = &built.trajectory.clubhead;
        assert!((clubhead[1].x - 0.5).abs() < 1e-12);
        assert!((clubhead[1].y - 0.6).abs() < 1e-12);
        assert_eq!(built.missing_landmarks, 3);
        assert!(built.trajectory.is_observed(TrackedPoint::Clubhead, 0));
    }

    #[test]
    fn test_never_seen_landmark_at_origin() {
        let frames: Vec<_> = (0..3)
            .map(|i| PoseFrame {
                timestamp: i as f64,
                landmarks: vec![Some(Landmark::new(0.5, 0.5, 0.0, 1.0)); 20],
            })
            .collect();
        let built = builder().build(&frames).unwrap();
        assert_eq!(built.trajectory.left_hip[1].x, 0.0);
        assert_eq!(built.missing_landmarks, 6);
    }

    #[test]
    fn test_low_visibility_is_missing() {
        let mut config = IngestionConfig::default();
        config.min_visibility = 0.5;
        let mut frames: Vec<_> = (0..3).map(|i| frame(i as f64, 0.1 * i as f64, 0.5)).collect();
        let rw = config.landmarks.right_wrist;
        frames[1].landmarks[rw] = Some(Landmark {
            x: 0.9,
            y: 0.9,
            z: 0.0,
            visibility: None,
        });

        let built = TrajectoryBuilder::new(&config).build(&frames).unwrap();
        assert_eq!(built.low_confidence_landmarks, 1);
        assert_eq!(built.trajectory.right_wrist[1].x, built.trajectory.right_wrist[0].x);
        assert!(!built.trajectory.is_observed(TrackedPoint::Clubhead, 1));
    }

    #[test]
    fn test_decreasing_timestamp_rejected() {
        let metrics = Arc::new(IngestionMetrics::new());
        let frames = vec![frame(0.0, 0.0, 0.0), frame(20.0, 0.0, 0.0), frame(10.0, 0.0, 0.0)];
        let err = builder()
            .with_metrics(metrics.clone())
            .build(&frames)
            .unwrap_err();
        assert!(matches!(
            err,
            IngestionError::NonMonotonicTimestamps { frame: 2, .. }
        ));
        assert_eq!(metrics.snapshot().sequences_rejected, 1);
    }

    #[test]
    fn test_equal_timestamps_allowed() {
        let frames = vec![frame(5.0, 0.0, 0.0), frame(5.0, 0.1, 0.0)];
        assert!(builder().build(&frames).is_ok());
    }

    #[test]
    fn test_forearm_extension_uses_elbow() {
        let mut config = IngestionConfig::default();
        config.clubhead = ClubheadEstimate::ForearmExtension { extension: 1.0 };
        let map = config.landmarks;
        let mut f = frame(0.0, 0.5, 0.5);
        f.landmarks[map.right_elbow] = Some(Landmark::new(0.5, 0.4, 0.0, 0.9));

        let built = TrajectoryBuilder::new(&config).build(&[f]).unwrap();
        assert!((built.trajectory.clubhead[0].y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        let built = builder().build(&[]).unwrap();
        assert_eq!(built.trajectory.frame_count(), 0);
        assert!(built.trajectory.is_aligned());
    }
}
