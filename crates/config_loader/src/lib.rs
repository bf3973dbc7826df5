//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce an `AnalysisConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("swing.toml")).unwrap();
//! println!("On-plane tolerance: {}", config.path.on_plane_tolerance_deg);
//! ```

mod parser;
mod validator;

pub use contracts::AnalysisConfig;
pub use parser::ConfigFormat;

use contracts::AnalysisError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<AnalysisConfig, AnalysisError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AnalysisConfig, AnalysisError> {
        Self::parse_and_validate(content, format)
    }

    /// Load from an optional path, falling back to validated defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<AnalysisConfig, AnalysisError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let config = AnalysisConfig::default();
                validator::validate(&config)?;
                Ok(config)
            }
        }
    }

    /// Validate an already-built configuration
    pub fn validate(config: &AnalysisConfig) -> Result<(), AnalysisError> {
        validator::validate(config)
    }

    /// Serialize AnalysisConfig to TOML string
    pub fn to_toml(config: &AnalysisConfig) -> Result<String, AnalysisError> {
        toml::to_string_pretty(config)
            .map_err(|e| AnalysisError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize AnalysisConfig to JSON string
    pub fn to_json(config: &AnalysisConfig) -> Result<String, AnalysisError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| AnalysisError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, AnalysisError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            AnalysisError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            AnalysisError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, AnalysisError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<AnalysisConfig, AnalysisError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}
