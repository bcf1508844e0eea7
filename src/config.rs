//! Configuration for matching thresholds, automation pacing, and the
//! keyword tables driving both classifiers.
//!
//! The taxonomy and field-pattern tables live here so they are explicit,
//! immutable inputs to the classifiers rather than ambient globals; a
//! deployment overrides them by shipping a different config file.

use crate::automation::form_fields::FieldPatternTable;
use crate::error::{AutoApplyError, Result};
use crate::matching::taxonomy::SkillTaxonomy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub automation: AutomationConfig,
    pub taxonomy: SkillTaxonomy,
    pub field_patterns: FieldPatternTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum 0–100 match score for a job to pass filtering.
    pub min_match_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// How long to wait for a form element after navigation.
    pub form_timeout_ms: u64,
    /// How long to wait for a confirmation URL after submitting.
    pub confirmation_timeout_ms: u64,
    /// Pause enforced after every application attempt in a batch.
    pub inter_application_delay_ms: u64,
    /// Size of the trailing recent-results window in statistics.
    pub recent_window: usize,
}

impl AutomationConfig {
    pub fn form_timeout(&self) -> Duration {
        Duration::from_millis(self.form_timeout_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    pub fn inter_application_delay(&self) -> Duration {
        Duration::from_millis(self.inter_application_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig {
                min_match_score: 60.0,
            },
            automation: AutomationConfig {
                form_timeout_ms: 10_000,
                confirmation_timeout_ms: 10_000,
                inter_application_delay_ms: 2_000,
                recent_window: 10,
            },
            taxonomy: SkillTaxonomy::default(),
            field_patterns: FieldPatternTable::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                AutoApplyError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AutoApplyError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-autopilot")
            .join("config.toml")
    }
}
