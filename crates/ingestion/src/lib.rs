//! # Ingestion
//!
//! Pose-frame ingestion module.
//!
//! Responsibilities:
//! - Load buffered pose sequences (JSON)
//! - Map keypoints through the landmark index table
//! - Fill landmark gaps and derive the clubhead
//! - Produce a `SwingTrajectory`
//!
//! ## Usage Example
//!
//! ```no_run
//! use contracts::IngestionConfig;
//! use ingestion::{TrajectoryBuilder, load_pose_sequence};
//! use std::path::Path;
//!
//! let sequence = load_pose_sequence(Path::new("swing.json")).unwrap();
//! let built = TrajectoryBuilder::new(&IngestionConfig::default())
//!     .build(&sequence.frames)
//!     .unwrap();
//! println!("{} frames", built.trajectory.frame_count());
//! ```
//!
//! ## Synthetic Swings
//!
//! ```
//! use ingestion::SyntheticSwing;
//!
//! let frames = SyntheticSwing::noisy(90, 0.002, 42).generate();
//! assert_eq!(frames.len(), 90);
//! ```

mod builder;
mod clubhead;
mod error;
mod loader;
mod stats;
mod synthetic;

// Re-exports
pub use builder::{BuiltTrajectory, TrajectoryBuilder};
pub use clubhead::estimate_clubhead;
pub use error::{IngestionError, Result};
pub use loader::{load_pose_sequence, parse_pose_sequence};
pub use stats::{IngestionMetrics, MetricsSnapshot};
pub use synthetic::{SyntheticSwing, SyntheticSwingConfig};
