//! Key-moment extraction: takeaway, top, impact, finish.

use contracts::{KeyMomentConfig, KeyMoments, TrajectoryPoint};

use crate::kinematics::{accelerations, argmax, velocities};

/// Locate the named moments of a swing on one trajectory.
///
/// The result always satisfies `takeaway <= top <= impact <= finish` and
/// `finish == len - 1` for non-empty input.
pub fn find_key_moments(trajectory: &[TrajectoryPoint], config: &KeyMomentConfig) -> KeyMoments {
    let n = trajectory.len();
    if n == 0 {
        return KeyMoments::default();
    }
    let finish = n - 1;
    let v = velocities(trajectory);

    let takeaway = v
        .iter()
        .position(|&speed| speed > config.takeaway_velocity_threshold)
        .unwrap_or(0);

    // Highest point of the hands: smallest y in image coordinates
    let top_end = ((config.top_search_fraction * n as f64).ceil() as usize).clamp(1, n);
    let top = trajectory[..top_end]
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, p)| {
            if p.y < best.1 { (i, p.y) } else { best }
        })
        .0;

    // accelerations[k] belongs to point k + 1
    let search_start = (config.impact_search_fraction * n as f64).floor() as usize;
    let a = accelerations(trajectory, &v);
    let first_candidate = search_start.max(1);
    let impact = if first_candidate <= n.saturating_sub(2) {
        argmax(&a[first_candidate - 1..])
            .map(|k| k + first_candidate)
            .unwrap_or(first_candidate)
    } else {
        search_start.min(finish)
    };

    let top = top.max(takeaway);
    KeyMoments {
        takeaway,
        top,
        impact: impact.max(top),
        finish,
    }
}
