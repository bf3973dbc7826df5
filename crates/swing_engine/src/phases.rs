//! Phase segmentation.
//!
//! Splits a swing into `Setup → Backswing → Transition → Impact →
//! FollowThrough` in one deterministic pass. Adjacent phases share their
//! boundary frame and every phase spans at least one frame interval.

use contracts::{
    AnalysisError, MIN_SWING_FRAMES, PhaseConfig, PhaseName, PhaseSegmentation, RotationMetrics,
    SwingPhase, SwingTrajectory, TrackedPoint, Trajectory,
};
use tracing::{debug, trace};

use crate::kinematics::velocities;

/// Segment a swing into its five phases.
///
/// # Errors
/// `InsufficientData` when the swing has fewer than `MIN_SWING_FRAMES` frames.
pub fn segment_phases(
    trajectory: &SwingTrajectory,
    config: &PhaseConfig,
) -> Result<PhaseSegmentation, AnalysisError> {
    let n = trajectory.frame_count();
    if n < MIN_SWING_FRAMES {
        return Err(AnalysisError::insufficient_data(n));
    }

    let impact = detect_impact_frame(trajectory.get(config.impact_source), n, config);
    let cuts = cut_points(n, impact, config);
    let timestamps = trajectory.timestamps();

    let phases: Vec<SwingPhase> = PhaseName::ORDER
        .iter()
        .enumerate()
        .map(|(k, &name)| {
            let (start, end) = (cuts[k], cuts[k + 1]);
            SwingPhase::new(name, start, end, timestamps[start], timestamps[end])
        })
        .collect();

    let backswing = phases[1].duration;
    let downswing = phases[2].duration;
    let tempo_ratio = if downswing > 0.0 {
        backswing / downswing
    } else {
        1.0
    };

    let top_frame = cuts[2];
    let rotation = RotationMetrics {
        shoulder_turn: turn(
            trajectory,
            TrackedPoint::LeftShoulder,
            TrackedPoint::RightShoulder,
            top_frame,
        ),
        hip_turn: turn(
            trajectory,
            TrackedPoint::LeftHip,
            TrackedPoint::RightHip,
            top_frame,
        ),
    };

    debug!(
        frames = n,
        setup_end = cuts[1],
        top = top_frame,
        impact = cuts[3],
        follow_start = cuts[4],
        tempo_ratio,
        "swing phases segmented"
    );

    Ok(PhaseSegmentation {
        phases,
        impact_frame: cuts[3],
        top_frame,
        tempo_ratio,
        rotation,
    })
}

/// Frame of the largest velocity change on `source`.
///
/// Only interior frames `[1, n-2]` with a strictly positive change qualify.
/// Without one, falls back to `default_impact_fraction` of the swing.
pub fn detect_impact_frame(source: &Trajectory, n: usize, config: &PhaseConfig) -> usize {
    let last_interior = n.saturating_sub(2).max(1);
    let v = velocities(source);

    let mut best: Option<(usize, f64)> = None;
    for i in 1..v.len().min(n.saturating_sub(1)) {
        let change = (v[i] - v[i - 1]).abs();
        if change <= 0.0 {
            continue;
        }
        match best {
            Some((_, b)) if change <= b => {}
            _ => best = Some((i, change)),
        }
    }

    let impact = match best {
        Some((i, _)) => i,
        None => {
            let fallback = (config.default_impact_fraction * n as f64).floor() as usize;
            trace!(fallback, "no velocity change found, using default impact");
            fallback
        }
    };
    impact.clamp(1, last_interior)
}

/// Six strictly increasing cut points `[0, setup_end, top, impact, follow_start, n-1]`.
fn cut_points(n: usize, impact: usize, config: &PhaseConfig) -> [usize; 6] {
    let last = n - 1;
    // Fractions are only range-checked by the config validator; clamp here too
    let scaled = |fraction: f64, of: usize| ((fraction * of as f64).floor() as usize).min(last);
    let mut c = [
        0,
        scaled(config.setup_fraction, n),
        scaled(config.backswing_fraction, impact),
        impact.min(last),
        scaled(config.follow_through_factor, impact),
        last,
    ];
    trace!(raw = ?c, "raw phase cut points");

    for k in 1..5 {
        c[k] = c[k].max(c[k - 1].saturating_add(1));
    }
    for k in (1..5).rev() {
        c[k] = c[k].min(c[k + 1] - 1);
    }
    c
}

/// Absolute change of the left→right line angle between frame 0 and `top`,
/// wrapped into `[0, 180]` degrees.
///
/// An unobserved endpoint or a zero-length line gives 0.
fn turn(trajectory: &SwingTrajectory, left: TrackedPoint, right: TrackedPoint, top: usize) -> f64 {
    let observed = [0, top]
        .iter()
        .all(|&f| trajectory.is_observed(left, f) && trajectory.is_observed(right, f));
    if !observed {
        debug!(%left, %right, top, "rotation landmark missing, turn defaults to 0");
        return 0.0;
    }

    let angle = |frame: usize| -> Option<f64> {
        let l = trajectory.get(left).get(frame)?;
        let r = trajectory.get(right).get(frame)?;
        let (dx, dy) = (r.x - l.x, r.y - l.y);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(dy.atan2(dx).to_degrees())
    };

    match (angle(0), angle(top)) {
        (Some(start), Some(end)) => {
            let diff = (end - start).abs() % 360.0;
            if diff > 180.0 { 360.0 - diff } else { diff }
        }
        _ => 0.0,
    }
}
