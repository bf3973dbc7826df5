//! # Swing Engine
//!
//! Golf swing analysis engine.
//!
//! Responsible for:
//! - Trajectory kinematics (distance, velocity, acceleration, smoothness)
//! - Phase segmentation, tempo and body rotation
//! - Swing-path classification
//! - Key-moment extraction
//!
//! Every function here is synchronous, pure and CPU-bound.
//!
//! ## Usage Example
//!
//! ```
//! use contracts::AnalysisConfig;
//! use ingestion::SyntheticSwing;
//! use swing_engine::SwingAnalyzer;
//!
//! let frames = SyntheticSwing::standard(60).generate();
//! let analyzer = SwingAnalyzer::new(AnalysisConfig::default());
//! let analysis = analyzer.analyze_frames(&frames).unwrap();
//!
//! println!("tempo {:.2}", analysis.segmentation.tempo_ratio);
//! ```

mod engine;
mod kinematics;
mod moments;
mod path;
mod phases;

// Re-exports
pub use engine::SwingAnalyzer;
pub use kinematics::{
    accelerations, analyze_trajectory, create_velocity_profile, degenerate_intervals, distances,
    smooth_trajectory, velocities,
};
pub use moments::find_key_moments;
pub use path::{analyze_swing_path, path_consistency, path_deviation, swing_plane};
pub use phases::{detect_impact_frame, segment_phases};

// Re-export contracts types
pub use contracts::{
    AnalysisConfig, AnalysisError, KeyMoments, PhaseSegmentation, SwingAnalysis,
    SwingPathAnalysis, TrajectoryMetrics, VelocityProfile,
};
