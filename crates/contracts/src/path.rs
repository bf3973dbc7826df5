//! Swing-Path Classifier output record

use serde::{Deserialize, Serialize};

use crate::Trajectory;

/// Direction and plane of the clubhead path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SwingPathAnalysis {
    pub clubhead_path: Trajectory,
    /// Degrees in `[-180, 180]`
    pub swing_plane: f64,
    /// `[0, 1]`
    pub path_consistency: f64,
    pub inside_out: bool,
    pub outside_in: bool,
    pub on_plane: bool,
    /// Mean distance of the path from the straight start-to-end line
    pub path_deviation: f64,
}

impl SwingPathAnalysis {
    /// Short label for reports.
    pub fn classification(&self) -> &'static str {
        match (self.inside_out, self.outside_in, self.on_plane) {
            (_, _, true) if !self.inside_out && !self.outside_in => "on-plane",
            (true, _, true) => "on-plane (slightly inside-out)",
            (_, true, true) => "on-plane (slightly outside-in)",
            (true, _, false) => "inside-out",
            (_, true, false) => "outside-in",
            _ => "undetermined",
        }
    }
}
