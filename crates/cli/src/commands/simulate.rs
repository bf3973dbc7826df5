//! `simulate` command implementation.

use anyhow::{Context, Result};
use ingestion::{SyntheticSwing, SyntheticSwingConfig};
use tracing::info;

use crate::cli::SimulateArgs;

/// Execute the `simulate` command
pub fn run_simulate(args: &SimulateArgs) -> Result<()> {
    if args.fps.is_nan() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be positive, got {}", args.fps);
    }
    if !args.jitter.is_finite() || args.jitter < 0.0 {
        anyhow::bail!("--jitter must be finite and not negative, got {}", args.jitter);
    }

    let swing = SyntheticSwing::new(SyntheticSwingConfig {
        frames: args.frames,
        fps: args.fps,
        jitter: args.jitter,
        seed: args.seed,
        landmarks: args.landmarks.landmark_map(),
        ..Default::default()
    });
    let json = serde_json::to_string_pretty(&swing.sequence())
        .context("Failed to serialize pose sequence")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                frames = args.frames,
                impact_frame = swing.impact_frame(),
                "Synthetic swing written"
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
