//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{AnalysisConfig, ClubheadEstimate, LandmarkMap};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    landmarks: String,
    clubhead: String,
    min_visibility: f64,
    smoothing: String,
    impact_source: String,
    on_plane_tolerance_deg: f64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&config)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

pub(crate) fn landmark_preset_name(map: &LandmarkMap) -> &'static str {
    if *map == LandmarkMap::mediapipe() {
        "mediapipe"
    } else if *map == LandmarkMap::coco() {
        "coco"
    } else {
        "custom"
    }
}

pub(crate) fn clubhead_name(estimate: &ClubheadEstimate) -> String {
    match estimate {
        ClubheadEstimate::WristMidpoint => "wrist midpoint".to_string(),
        ClubheadEstimate::ForearmExtension { extension } => {
            format!("forearm extension x{extension}")
        }
    }
}

fn summarize(config: &AnalysisConfig) -> ConfigSummary {
    ConfigSummary {
        landmarks: landmark_preset_name(&config.ingestion.landmarks).to_string(),
        clubhead: clubhead_name(&config.ingestion.clubhead),
        min_visibility: config.ingestion.min_visibility,
        smoothing: if config.kinematics.smooth_input {
            format!("window {}", config.kinematics.smoothing_window)
        } else {
            "off".to_string()
        },
        impact_source: config.phases.impact_source.to_string(),
        on_plane_tolerance_deg: config.path.on_plane_tolerance_deg,
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &AnalysisConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.ingestion.min_visibility == 0.0 {
        warnings.push(
            "ingestion.min_visibility is 0 - low-confidence landmarks are never filtered"
                .to_string(),
        );
    }

    if config.kinematics.smooth_input && config.kinematics.smoothing_window == 1 {
        warnings.push("kinematics.smoothing_window is 1 - smoothing has no effect".to_string());
    }

    let phases = &config.phases;
    if phases.follow_through_factor * phases.default_impact_fraction >= 1.0 {
        warnings.push(
            "phases.follow_through_factor * default_impact_fraction >= 1 - \
             follow-through collapses to the last frames when no impact is detected"
                .to_string(),
        );
    }

    if landmark_preset_name(&config.ingestion.landmarks) == "custom" {
        warnings.push("ingestion.landmarks is a custom keypoint table".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Landmarks: {}", summary.landmarks);
            println!("  Clubhead: {}", summary.clubhead);
            println!("  Min visibility: {}", summary.min_visibility);
            println!("  Smoothing: {}", summary.smoothing);
            println!("  Impact source: {}", summary.impact_source);
            println!("  On-plane tolerance: {}°", summary.on_plane_tolerance_deg);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
