//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading roster
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::calculation::{CoverageWindow, PayrollPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::BusinessHours;

use super::types::{EngineSettings, RosterConfig, VocabularySeed};

/// Loads and provides access to roster configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Server, coverage window and payroll settings
/// ├── business_hours.yaml  # Opening hours used until the settings document exists
/// └── vocabulary.yaml      # Seed roles and areas
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Coverage window starts at {}", loader.coverage_window().start_hour);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: RosterConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if a file is missing and `ConfigParseError`
    /// if a file is not valid YAML or holds out-of-range values.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let engine = Self::load_yaml::<EngineSettings>(&engine_path)?;
        Self::validate_engine(&engine, &engine_path)?;

        let business_hours = Self::load_yaml::<BusinessHours>(&path.join("business_hours.yaml"))?;
        let vocabulary = Self::load_yaml::<VocabularySeed>(&path.join("vocabulary.yaml"))?;

        Ok(Self {
            config: RosterConfig::new(engine, business_hours, vocabulary),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: RosterConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_engine(engine: &EngineSettings, path: &Path) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        let window = engine.coverage_window;
        if window.start_hour >= window.end_hour || window.end_hour > 24 {
            return Err(invalid(format!(
                "coverage_window must satisfy start_hour < end_hour <= 24, got {}..{}",
                window.start_hour, window.end_hour
            )));
        }
        if engine.payroll.weeks_per_month <= Decimal::ZERO {
            return Err(invalid(format!(
                "payroll.weeks_per_month must be positive, got {}",
                engine.payroll.weeks_per_month
            )));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn engine(&self) -> &EngineSettings {
        self.config.engine()
    }

    /// Returns the hours covered by coverage statistics.
    pub fn coverage_window(&self) -> CoverageWindow {
        self.config.engine().coverage_window
    }

    /// Returns the policy used for payroll projections.
    pub fn payroll_policy(&self) -> PayrollPolicy {
        self.config.engine().payroll.policy()
    }

    /// Returns the ticket price used when a request does not supply one.
    pub fn default_ticket_price(&self) -> Decimal {
        self.config.engine().payroll.default_ticket_price
    }

    /// Returns the opening hours used until the settings document exists.
    pub fn default_business_hours(&self) -> &BusinessHours {
        self.config.business_hours()
    }

    /// Returns the seed vocabularies.
    pub fn vocabulary(&self) -> &VocabularySeed {
        self.config.vocabulary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::DurationPolicy;
    use crate::models::Weekday;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roster-config-{}-{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::copy(
            Path::new(config_path()).join("business_hours.yaml"),
            dir.join("business_hours.yaml"),
        )
        .unwrap();
        fs::copy(
            Path::new(config_path()).join("vocabulary.yaml"),
            dir.join("vocabulary.yaml"),
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.coverage_window(), CoverageWindow::default());
        assert_eq!(loader.payroll_policy().weeks_per_month, Decimal::from_str("4.5").unwrap());
        assert_eq!(loader.payroll_policy().duration_policy, DurationPolicy::HourTruncated);
        assert!(!loader.payroll_policy().include_unassigned_salaried);
    }

    #[test]
    fn test_default_business_hours_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let hours = loader.default_business_hours();
        assert_eq!(hours.days.len(), 7);
        assert!(hours.is_closed(Weekday::Sunday));
        assert!(!hours.is_closed(Weekday::Monday));
    }

    #[test]
    fn test_vocabulary_seed_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.vocabulary().roles.iter().any(|r| r == "Instrutor"));
        assert!(loader.vocabulary().areas.iter().any(|a| a == "Musculação"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        match ConfigLoader::load("/nonexistent/path") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_window_is_rejected() {
        let dir = scratch_dir("window");
        fs::write(
            dir.join("engine.yaml"),
            "coverage_window:\n  start_hour: 20\n  end_hour: 8\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("coverage_window"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_non_positive_weeks_per_month_is_rejected() {
        let dir = scratch_dir("weeks");
        fs::write(dir.join("engine.yaml"), "payroll:\n  weeks_per_month: 0\n").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let dir = scratch_dir("yaml");
        fs::write(dir.join("engine.yaml"), "payroll: [unclosed").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));
        fs::remove_dir_all(dir).ok();
    }
}
