//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::AnalysisConfig;
use tracing::info;

use super::validate::{clubhead_name, landmark_preset_name};
use crate::cli::InfoArgs;
use crate::error::CliError;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    if let Some(path) = &args.config {
        info!(config = %path.display(), "Loading configuration info");
        if !path.exists() {
            return Err(CliError::config_not_found(path.display().to_string()).into());
        }
    }

    let config = config_loader::ConfigLoader::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if args.json {
        println!("{}", config_loader::ConfigLoader::to_json(&config)?);
    } else if args.toml {
        print!("{}", config_loader::ConfigLoader::to_toml(&config)?);
    } else {
        let source = args
            .config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());
        print_config_info(&config, &source);
    }

    Ok(())
}

fn print_config_info(config: &AnalysisConfig, source: &str) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Swing Analyzer Configuration                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Source: {}\n", source);

    let ingestion = &config.ingestion;
    println!("📥 Ingestion");
    println!(
        "   ├─ Landmarks: {}",
        landmark_preset_name(&ingestion.landmarks)
    );
    println!("   ├─ Clubhead: {}", clubhead_name(&ingestion.clubhead));
    println!("   └─ Min visibility: {}", ingestion.min_visibility);

    let kinematics = &config.kinematics;
    println!("\n📈 Kinematics");
    if kinematics.smooth_input {
        println!("   └─ Smoothing: window {}", kinematics.smoothing_window);
    } else {
        println!("   └─ Smoothing: off");
    }

    let phases = &config.phases;
    println!("\n⛳ Phases");
    println!("   ├─ Setup fraction: {}", phases.setup_fraction);
    println!("   ├─ Backswing fraction: {}", phases.backswing_fraction);
    println!(
        "   ├─ Follow-through factor: {}",
        phases.follow_through_factor
    );
    println!(
        "   ├─ Default impact fraction: {}",
        phases.default_impact_fraction
    );
    println!("   └─ Impact source: {}", phases.impact_source);

    println!("\n🧭 Path");
    println!(
        "   └─ On-plane tolerance: {}°",
        config.path.on_plane_tolerance_deg
    );

    let moments = &config.key_moments;
    println!("\n📍 Key Moments");
    println!(
        "   ├─ Takeaway velocity threshold: {}",
        moments.takeaway_velocity_threshold
    );
    println!("   ├─ Top search fraction: {}", moments.top_search_fraction);
    println!(
        "   └─ Impact search fraction: {}",
        moments.impact_search_fraction
    );

    println!();
}
