//! User settings for the planner
//!
//! Holds the owner id the CLI acts as, money formatting preferences, and the
//! recurrence expansion limits.

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::calendar::MAX_ITERATIONS;
use crate::error::PlannerError;
use crate::models::UserId;

/// Recurrence expansion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceSettings {
    /// Hard cap on loop iterations per recurring event and query
    #[serde(default = "default_iteration_cap")]
    pub iteration_cap: u32,
}

impl Default for RecurrenceSettings {
    fn default() -> Self {
        Self {
            iteration_cap: default_iteration_cap(),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Owner id every store query is scoped to
    #[serde(default)]
    pub user_id: UserId,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Separator between whole units and cents ("." or ",")
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub recurrence: RecurrenceSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_decimal_separator() -> char {
    '.'
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_iteration_cap() -> u32 {
    MAX_ITERATIONS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: UserId::new(),
            currency_symbol: default_currency(),
            decimal_separator: default_decimal_separator(),
            date_format: default_date_format(),
            recurrence: RecurrenceSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PlannerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PlannerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.recurrence.iteration_cap == 0 {
            return Err(PlannerError::Config(
                "recurrence.iteration_cap must be at least 1".into(),
            ));
        }
        if !matches!(self.decimal_separator, '.' | ',') {
            return Err(PlannerError::Config(format!(
                "decimal_separator must be '.' or ',', got '{}'",
                self.decimal_separator
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.recurrence.iteration_cap, 1000);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.decimal_separator, '.');
    }

    #[test]
    fn test_save_and_load_keeps_user() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.decimal_separator = ',';
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.user_id, settings.user_id);
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.decimal_separator, ',');
    }

    #[test]
    fn test_missing_recurrence_section_uses_default_cap() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.recurrence.iteration_cap, 1000);
        assert_eq!(loaded.currency_symbol, "£");
    }

    #[test]
    fn test_zero_cap_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.settings_file(),
            r#"{"recurrence": {"iteration_cap": 0}}"#,
        )
        .unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }
}
