//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Swing Analyzer - golf swing analysis from pose keypoints
#[derive(Parser, Debug)]
#[command(
    name = "swing-analyzer",
    author,
    version,
    about = "Golf swing analysis from per-frame pose keypoints",
    long_about = "Turns buffered pose-estimation output into swing trajectories and \n\
                  reports phases, tempo, rotation, kinematics, swing path and key moments."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "SWING_ANALYZER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "SWING_ANALYZER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze one or more pose sequence files
    Analyze(AnalyzeArgs),

    /// Print a synthetic pose sequence
    Simulate(SimulateArgs),

    /// Validate a configuration file
    Validate(ValidateArgs),

    /// Display the effective configuration
    Info(InfoArgs),
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Pose sequence files (JSON)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to configuration file (TOML or JSON); defaults apply when omitted
    #[arg(short, long, env = "SWING_ANALYZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Include trajectories and profiles in JSON output
    #[arg(long, requires = "json")]
    pub full: bool,

    /// Smooth trajectories before analysis
    #[arg(long)]
    pub smooth: bool,

    /// Override the smoothing window (frames)
    #[arg(long, env = "SWING_ANALYZER_SMOOTHING_WINDOW")]
    pub smoothing_window: Option<usize>,

    /// Expose Prometheus metrics on this port while running
    #[arg(long, env = "SWING_ANALYZER_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

/// Arguments for the `simulate` command
#[derive(Parser, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of frames
    #[arg(long, default_value = "60")]
    pub frames: usize,

    /// Frame rate (Hz)
    #[arg(long, default_value = "30.0")]
    pub fps: f64,

    /// Uniform position noise amplitude (normalized units)
    #[arg(long, default_value = "0.0")]
    pub jitter: f64,

    /// Seed for the position noise
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Keypoint numbering of the generated frames
    #[arg(long, value_enum, default_value = "mediapipe")]
    pub landmarks: LandmarkPreset,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "swing.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; defaults are shown when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, conflicts_with = "toml")]
    pub json: bool,

    /// Output as TOML (ready to use as a config file)
    #[arg(long)]
    pub toml: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Pose model keypoint numbering
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandmarkPreset {
    /// MediaPipe Pose (33 keypoints)
    #[default]
    Mediapipe,
    /// COCO / MoveNet (17 keypoints)
    Coco,
}

impl LandmarkPreset {
    pub fn landmark_map(self) -> contracts::LandmarkMap {
        match self {
            Self::Mediapipe => contracts::LandmarkMap::mediapipe(),
            Self::Coco => contracts::LandmarkMap::coco(),
        }
    }
}
