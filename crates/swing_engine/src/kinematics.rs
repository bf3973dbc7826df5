//! Kinematics analysis of a single trajectory.
//!
//! Velocity between consecutive points is Euclidean distance over elapsed
//! milliseconds. A non-positive interval yields velocity 0 for that sample.

use contracts::{Trajectory, TrajectoryMetrics, TrajectoryPoint, VelocityProfile};
use nalgebra::Vector3;

#[inline]
fn position(p: &TrajectoryPoint) -> Vector3<f64> {
    Vector3::new(p.x, p.y, p.z)
}

/// Distance between consecutive points (length n-1).
pub fn distances(points: &[TrajectoryPoint]) -> Vec<f64> {
    points
        .windows(2)
        .map(|w| (position(&w[1]) - position(&w[0])).norm())
        .collect()
}

/// Speed between consecutive points (length n-1).
pub fn velocities(points: &[TrajectoryPoint]) -> Vec<f64> {
    points
        .windows(2)
        .map(|w| {
            let dt = w[1].timestamp - w[0].timestamp;
            if dt > 0.0 {
                (position(&w[1]) - position(&w[0])).norm() / dt
            } else {
                0.0
            }
        })
        .collect()
}

/// Rate of speed change at each interior point (length n-2).
///
/// Uses the centered interval `(t[i+1] - t[i-1]) / 2` around point `i`.
pub fn accelerations(points: &[TrajectoryPoint], velocities: &[f64]) -> Vec<f64> {
    if points.len() < 3 {
        return Vec::new();
    }
    (1..points.len() - 1)
        .map(|i| {
            let dt = (points[i + 1].timestamp - points[i - 1].timestamp) / 2.0;
            if dt > 0.0 {
                (velocities[i] - velocities[i - 1]).abs() / dt
            } else {
                0.0
            }
        })
        .collect()
}

/// Number of intervals with no elapsed time.
pub fn degenerate_intervals(points: &[TrajectoryPoint]) -> usize {
    points
        .windows(2)
        .filter(|w| w[1].timestamp - w[0].timestamp <= 0.0)
        .count()
}

/// Index of the first maximum.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance.
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Summarize motion along a trajectory.
pub fn analyze_trajectory(points: &[TrajectoryPoint]) -> TrajectoryMetrics {
    match points.len() {
        0 => return TrajectoryMetrics::default(),
        1 => {
            return TrajectoryMetrics {
                smoothness: 1.0,
                ..Default::default()
            };
        }
        _ => {}
    }

    let v = velocities(points);
    let a = accelerations(points, &v);

    TrajectoryMetrics {
        total_distance: distances(points).iter().sum(),
        max_velocity: max(&v),
        avg_velocity: mean(&v),
        max_acceleration: max(&a),
        avg_acceleration: mean(&a),
        peak_frame: argmax(&v).unwrap_or(0),
        smoothness: smoothness(&a),
    }
}

/// `1 - var(a) / max(a)^2` clamped to `[0, 1]`; no acceleration counts as smooth.
fn smoothness(accelerations: &[f64]) -> f64 {
    let peak = max(accelerations);
    if peak <= 0.0 {
        return 1.0;
    }
    (1.0 - variance(accelerations) / (peak * peak)).clamp(0.0, 1.0)
}

/// Per-sample velocity and acceleration series.
pub fn create_velocity_profile(points: &[TrajectoryPoint]) -> VelocityProfile {
    let velocities = velocities(points);
    let accelerations = accelerations(points, &velocities);
    VelocityProfile {
        frames: points.iter().map(|p| p.frame).collect(),
        peak_velocity_frame: argmax(&velocities).unwrap_or(0),
        peak_acceleration_frame: argmax(&accelerations).unwrap_or(0),
        velocities,
        accelerations,
    }
}

/// Centered moving average of position and timestamp.
///
/// The window is clipped at both ends, so edge points average fewer
/// neighbours. Input shorter than `window` is returned unchanged.
pub fn smooth_trajectory(points: &[TrajectoryPoint], window: usize) -> Trajectory {
    let n = points.len();
    if n < window || window == 0 {
        return points.to_vec();
    }
    let half = window / 2;

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            let span = &points[lo..=hi];
            let count = span.len() as f64;

            let sum: Vector3<f64> = span.iter().map(position).sum();
            let avg = sum / count;
            let timestamp = span.iter().map(|p| p.timestamp).sum::<f64>() / count;

            TrajectoryPoint::new(avg.x, avg.y, avg.z, timestamp, points[i].frame)
        })
        .collect()
}
