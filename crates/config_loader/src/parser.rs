//! Configuration parsing
//!
//! TOML (primary) and JSON formats.

use contracts::{AnalysisConfig, AnalysisError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<AnalysisConfig, AnalysisError> {
    toml::from_str(content).map_err(|e| AnalysisError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<AnalysisConfig, AnalysisError> {
    serde_json::from_str(content).map_err(|e| AnalysisError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse according to format
pub fn parse(content: &str, format: ConfigFormat) -> Result<AnalysisConfig, AnalysisError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ClubheadEstimate, LandmarkMap, TrackedPoint};

    #[test]
    fn test_parse_toml_empty_is_default() {
        let config = parse_toml("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_parse_toml_sections() {
        let content = r#"
[ingestion]
min_visibility = 0.3
landmarks = { left_shoulder = 5, right_shoulder = 6, left_elbow = 7, right_elbow = 8, left_wrist = 9, right_wrist = 10, left_hip = 11, right_hip = 12 }

[ingestion.clubhead]
mode = "forearm_extension"
extension = 1.25

[phases]
setup_fraction = 0.15
impact_source = "right_wrist"

[path]
on_plane_tolerance_deg = 7.5
"#;
        let config = parse_toml(content).unwrap();
        assert_eq!(config.ingestion.min_visibility, 0.3);
        assert_eq!(config.ingestion.landmarks, LandmarkMap::coco());
        assert_eq!(
            config.ingestion.clubhead,
            ClubheadEstimate::ForearmExtension { extension: 1.25 }
        );
        assert_eq!(config.phases.setup_fraction, 0.15);
        assert_eq!(config.phases.impact_source, TrackedPoint::RightWrist);
        assert_eq!(config.phases.backswing_fraction, 0.80);
        assert_eq!(config.path.on_plane_tolerance_deg, 7.5);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{ "key_moments": { "takeaway_velocity_threshold": 0.0005 } }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.key_moments.takeaway_velocity_threshold, 0.0005);
        assert_eq!(config.key_moments.top_search_fraction, 0.70);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(AnalysisError::ConfigParse { .. })));
    }

    #[test]
    fn test_parse_unknown_clubhead_mode() {
        let content = "[ingestion.clubhead]\nmode = \"laser\"\n";
        assert!(parse_toml(content).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
