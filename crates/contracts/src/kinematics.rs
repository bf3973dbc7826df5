//! Kinematics Analyzer output records

use serde::{Deserialize, Serialize};

/// Motion summary of a single trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrajectoryMetrics {
    pub total_distance: f64,
    pub max_velocity: f64,
    pub avg_velocity: f64,
    pub max_acceleration: f64,
    pub avg_acceleration: f64,
    /// Index into the velocity array (length n-1), not into the points
    pub peak_frame: usize,
    /// `[0, 1]`, 1 = no detectable jerk
    pub smoothness: f64,
}

/// Per-sample velocity and acceleration series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityProfile {
    /// Frame number of every input point
    pub frames: Vec<usize>,
    /// Length n-1
    pub velocities: Vec<f64>,
    /// Length n-2
    pub accelerations: Vec<f64>,
    /// Index of the maximum in `velocities`
    pub peak_velocity_frame: usize,
    /// Index of the maximum in `accelerations`
    pub peak_acceleration_frame: usize,
}
