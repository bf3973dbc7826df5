//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Frame timestamps are milliseconds (f64) as reported by the pose provider
//! - `frame` is the dense index of the frame in the buffered sequence
//!
//! ## Coordinates
//! - Normalized image coordinates in `[0, 1]`, `y` grows downward

mod analysis;
mod config;
mod error;
mod kinematics;
mod landmark;
mod path;
mod phase;
mod trajectory;

pub use analysis::*;
pub use config::*;
pub use error::*;
pub use kinematics::*;
pub use landmark::*;
pub use path::*;
pub use phase::*;
pub use trajectory::*;
