//! Swing phases - Phase Segmenter output

use serde::{Deserialize, Serialize};

/// Ordered swing phases; `FollowThrough` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    Setup,
    Backswing,
    /// Top of the backswing down to impact (the downswing)
    Transition,
    Impact,
    FollowThrough,
}

impl PhaseName {
    pub const ORDER: [PhaseName; 5] = [
        PhaseName::Setup,
        PhaseName::Backswing,
        PhaseName::Transition,
        PhaseName::Impact,
        PhaseName::FollowThrough,
    ];

    /// Display color (hex)
    pub fn color(&self) -> &'static str {
        match self {
            Self::Setup => "#3B82F6",
            Self::Backswing => "#10B981",
            Self::Transition => "#F59E0B",
            Self::Impact => "#EF4444",
            Self::FollowThrough => "#8B5CF6",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Setup => "Address position before the club starts moving",
            Self::Backswing => "Club travels away from the ball to the top",
            Self::Transition => "Direction change at the top and downswing into the ball",
            Self::Impact => "Club meets the ball",
            Self::FollowThrough => "Release and deceleration to the finish",
        }
    }

    /// Next phase in the sequence, `None` for the terminal phase.
    pub fn next(&self) -> Option<PhaseName> {
        match self {
            Self::Setup => Some(Self::Backswing),
            Self::Backswing => Some(Self::Transition),
            Self::Transition => Some(Self::Impact),
            Self::Impact => Some(Self::FollowThrough),
            Self::FollowThrough => None,
        }
    }
}

impl std::fmt::Display for PhaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Setup => "setup",
            Self::Backswing => "backswing",
            Self::Transition => "transition",
            Self::Impact => "impact",
            Self::FollowThrough => "follow_through",
        };
        f.write_str(name)
    }
}

/// A named contiguous frame range.
///
/// Adjacent phases share their boundary frame: `end_frame` of one phase is the
/// `start_frame` of the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingPhase {
    pub name: PhaseName,
    pub start_frame: usize,
    pub end_frame: usize,
    /// Milliseconds
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub color: String,
    pub description: String,
}

impl SwingPhase {
    pub fn new(
        name: PhaseName,
        start_frame: usize,
        end_frame: usize,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            name,
            start_frame,
            end_frame,
            start_time,
            end_time,
            duration: end_time - start_time,
            color: name.color().to_string(),
            description: name.description().to_string(),
        }
    }

    /// Inclusive of both boundary frames.
    pub fn contains(&self, frame: usize) -> bool {
        (self.start_frame..=self.end_frame).contains(&frame)
    }

    /// Progress through the phase in `[0, 1]`, `None` outside it.
    pub fn progress(&self, frame: usize) -> Option<f64> {
        if !self.contains(frame) {
            return None;
        }
        let span = self.end_frame - self.start_frame;
        if span == 0 {
            return Some(1.0);
        }
        Some((frame - self.start_frame) as f64 / span as f64)
    }

    pub fn frame_span(&self) -> usize {
        self.end_frame - self.start_frame
    }
}

/// Every phase containing `frame`; two at a shared boundary.
pub fn phases_at(phases: &[SwingPhase], frame: usize) -> Vec<&SwingPhase> {
    phases.iter().filter(|p| p.contains(frame)).collect()
}

/// Find a phase by name.
pub fn find_phase(phases: &[SwingPhase], name: PhaseName) -> Option<&SwingPhase> {
    phases.iter().find(|p| p.name == name)
}

/// Body turn between address and the top of the backswing (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationMetrics {
    pub shoulder_turn: f64,
    pub hip_turn: f64,
}

impl RotationMetrics {
    /// Shoulder turn minus hip turn
    pub fn x_factor(&self) -> f64 {
        self.shoulder_turn - self.hip_turn
    }
}

/// Complete segmenter result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSegmentation {
    pub phases: Vec<SwingPhase>,
    pub impact_frame: usize,
    pub top_frame: usize,
    /// Backswing duration / downswing duration
    pub tempo_ratio: f64,
    pub rotation: RotationMetrics,
}

impl PhaseSegmentation {
    pub fn phase(&self, name: PhaseName) -> Option<&SwingPhase> {
        find_phase(&self.phases, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases() -> Vec<SwingPhase> {
        vec![
            SwingPhase::new(PhaseName::Setup, 0, 5, 0.0, 50.0),
            SwingPhase::new(PhaseName::Backswing, 5, 20, 50.0, 200.0),
        ]
    }

    #[test]
    fn test_duration_and_metadata() {
        let p = SwingPhase::new(PhaseName::Impact, 10, 12, 100.0, 120.0);
        assert_eq!(p.duration, 20.0);
        assert_eq!(p.color, "#EF4444");
        assert!(!p.description.is_empty());
    }

    #[test]
    fn test_boundary_frame_in_both_phases() {
        let phases = phases();
        let at = phases_at(&phases, 5);
        assert_eq!(at.len(), 2);
        assert_eq!(at[0].progress(5), Some(1.0));
        assert_eq!(at[1].progress(5), Some(0.0));
    }

    #[test]
    fn test_progress_outside_is_none() {
        let phases = phases();
        assert_eq!(phases[0].progress(6), None);
        let mid = phases[1].progress(12).unwrap();
        assert!((mid - 7.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_phase_order_is_terminal() {
        assert_eq!(PhaseName::Setup.next(), Some(PhaseName::Backswing));
        assert_eq!(PhaseName::FollowThrough.next(), None);
        assert_eq!(PhaseName::FollowThrough.to_string(), "follow_through");
    }

    #[test]
    fn test_x_factor() {
        let r = RotationMetrics {
            shoulder_turn: 90.0,
            hip_turn: 45.0,
        };
        assert_eq!(r.x_factor(), 45.0);
    }
}
