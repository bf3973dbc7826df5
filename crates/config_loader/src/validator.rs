//! Configuration validation
//!
//! Rules:
//! - every numeric field within its documented range (derived `Validate`)
//! - landmark indices distinct
//! - setup fraction below the backswing fraction
//! - impact source is the clubhead or the right wrist
//! - forearm extension positive and finite

use std::collections::HashMap;

use contracts::{AnalysisConfig, AnalysisError, BodyLandmark, ClubheadEstimate, TrackedPoint};
use ::validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate an `AnalysisConfig`
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    validate_ranges(config)?;
    validate_landmarks(config)?;
    validate_phase_order(config)?;
    validate_impact_source(config)?;
    validate_clubhead(config)?;
    Ok(())
}

/// Field ranges declared on the contracts
fn validate_ranges(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    let Err(errors) = config.validate() else {
        return Ok(());
    };

    let mut flat = Vec::new();
    flatten(String::new(), &errors, &mut flat);
    flat.sort();

    match flat.into_iter().next() {
        Some((field, message)) => Err(AnalysisError::config_validation(field, message)),
        None => Err(AnalysisError::config_validation("<root>", errors.to_string())),
    }
}

fn flatten(prefix: String, errors: &ValidationErrors, out: &mut Vec<(String, String)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = match err.params.get("value") {
                        Some(value) => format!("{} check failed for value {value}", err.code),
                        None => format!("{} check failed", err.code),
                    };
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    flatten(format!("{path}[{idx}]"), inner, out);
                }
            }
        }
    }
}

/// Landmark indices must be distinct
fn validate_landmarks(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    let map = &config.ingestion.landmarks;
    let mut seen: HashMap<usize, BodyLandmark> = HashMap::new();
    for landmark in BodyLandmark::ALL {
        let index = map.index(landmark);
        if let Some(other) = seen.insert(index, landmark) {
            return Err(AnalysisError::config_validation(
                format!("ingestion.landmarks.{landmark}"),
                format!("duplicate landmark index {index} (also used by {other})"),
            ));
        }
    }
    Ok(())
}

fn validate_phase_order(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    let phases = &config.phases;
    if phases.setup_fraction >= phases.backswing_fraction {
        return Err(AnalysisError::config_validation(
            "phases.setup_fraction / phases.backswing_fraction",
            format!(
                "setup_fraction ({}) must be < backswing_fraction ({})",
                phases.setup_fraction, phases.backswing_fraction
            ),
        ));
    }
    Ok(())
}

fn validate_impact_source(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    match config.phases.impact_source {
        TrackedPoint::Clubhead | TrackedPoint::RightWrist => Ok(()),
        other => Err(AnalysisError::config_validation(
            "phases.impact_source",
            format!("impact_source must be clubhead or right_wrist, got {other}"),
        )),
    }
}

fn validate_clubhead(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    if let ClubheadEstimate::ForearmExtension { extension } = config.ingestion.clubhead {
        if !extension.is_finite() || extension <= 0.0 {
            return Err(AnalysisError::config_validation(
                "ingestion.clubhead.extension",
                format!("extension must be > 0, got {extension}"),
            ));
        }
    }
    Ok(())
}
