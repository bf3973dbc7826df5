//! Swing-path classification of the clubhead trajectory.

use contracts::{PathConfig, PhaseName, SwingPathAnalysis, SwingPhase, TrajectoryPoint, find_phase};
use nalgebra::Vector2;

use crate::kinematics::{mean, variance, velocities};

/// Direction and plane analysis of a trajectory relative to its phases.
pub fn analyze_swing_path(
    trajectory: &[TrajectoryPoint],
    phases: &[SwingPhase],
    config: &PathConfig,
) -> SwingPathAnalysis {
    let (inside_out, outside_in, on_plane) = classify_direction(trajectory, phases, config);

    SwingPathAnalysis {
        clubhead_path: trajectory.to_vec(),
        swing_plane: swing_plane(trajectory),
        path_consistency: path_consistency(trajectory),
        inside_out,
        outside_in,
        on_plane,
        path_deviation: path_deviation(trajectory),
    }
}

/// Angle of the first→last line in degrees, `[-180, 180]`.
pub fn swing_plane(trajectory: &[TrajectoryPoint]) -> f64 {
    match (trajectory.first(), trajectory.last()) {
        (Some(first), Some(last)) if trajectory.len() >= 2 => direction(first, last),
        _ => 0.0,
    }
}

/// `1 - var(v) / mean(v)^2` over the speed samples, clamped to `[0, 1]`.
pub fn path_consistency(trajectory: &[TrajectoryPoint]) -> f64 {
    if trajectory.len() < 3 {
        return 1.0;
    }
    let v = velocities(trajectory);
    let m = mean(&v);
    if m == 0.0 {
        return 1.0;
    }
    (1.0 - variance(&v) / (m * m)).clamp(0.0, 1.0)
}

/// Mean perpendicular distance (x/y) from the first→last line.
///
/// When first and last coincide, the distance to that point is used.
pub fn path_deviation(trajectory: &[TrajectoryPoint]) -> f64 {
    let (Some(first), Some(last)) = (trajectory.first(), trajectory.last()) else {
        return 0.0;
    };
    let origin = Vector2::new(first.x, first.y);
    let line = Vector2::new(last.x, last.y) - origin;
    let length = line.norm();

    let total: f64 = trajectory
        .iter()
        .map(|p| {
            let offset = Vector2::new(p.x, p.y) - origin;
            if length > 0.0 {
                (line.x * offset.y - line.y * offset.x).abs() / length
            } else {
                offset.norm()
            }
        })
        .sum();
    total / trajectory.len() as f64
}

/// `(inside_out, outside_in, on_plane)` from the backswing and downswing directions.
fn classify_direction(
    trajectory: &[TrajectoryPoint],
    phases: &[SwingPhase],
    config: &PathConfig,
) -> (bool, bool, bool) {
    let segment = |name: PhaseName| -> Option<f64> {
        let phase = find_phase(phases, name)?;
        let start = trajectory.get(phase.start_frame)?;
        let end = trajectory.get(phase.end_frame)?;
        Some(direction(start, end))
    };

    match (segment(PhaseName::Backswing), segment(PhaseName::Transition)) {
        (Some(backswing), Some(downswing)) => (
            downswing > backswing,
            backswing > downswing,
            (downswing - backswing).abs() < config.on_plane_tolerance_deg,
        ),
        _ => (false, false, true),
    }
}

fn direction(from: &TrajectoryPoint, to: &TrajectoryPoint) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}
