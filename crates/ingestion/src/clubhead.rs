//! Clubhead derivation
//!
//! The club is never tracked directly; its head is estimated from the arms.

use contracts::ClubheadEstimate;

/// Estimate the clubhead position for one frame.
///
/// `ForearmExtension` pushes the right wrist along the elbow→wrist direction
/// by `extension` forearm lengths.
pub fn estimate_clubhead(
    estimate: ClubheadEstimate,
    right_wrist: [f64; 3],
    left_wrist: [f64; 3],
    right_elbow: [f64; 3],
) -> [f64; 3] {
    match estimate {
        ClubheadEstimate::WristMidpoint => [
            (right_wrist[0] + left_wrist[0]) / 2.0,
            (right_wrist[1] + left_wrist[1]) / 2.0,
            (right_wrist[2] + left_wrist[2]) / 2.0,
        ],
        ClubheadEstimate::ForearmExtension { extension } => [
            right_wrist[0] + (right_wrist[0] - right_elbow[0]) * extension,
            right_wrist[1] + (right_wrist[1] - right_elbow[1]) * extension,
            right_wrist[2] + (right_wrist[2] - right_elbow[2]) * extension,
        ],
    }
}
