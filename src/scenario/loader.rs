//! Scenario files: model configs in TOML
//!
//! A scenario is a `ModelConfig` with every field optional. It may also name
//! a value preset; dimensions listed under `[value_settings]` then override
//! the preset one by one.
//!
//! ```toml
//! n_agents = 150
//! preset = "traditional_community"
//!
//! [value_settings.wealth]
//! mean = 0.6
//! spread = 0.1
//!
//! [[institutions]]
//! name = "Mill"
//! type = "work"
//! capacity = 40
//! money_income = 25.0
//! culture = { community = 0.3, status = 0.5 }
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::core::error::Result;
use crate::entity::ValueDimension;
use crate::scenario::presets::ValuePreset;
use crate::simulation::config::ModelConfig;

/// Scenario keys read alongside the config itself
#[derive(Debug, Default, Deserialize)]
struct ScenarioHeader {
    preset: Option<ValuePreset>,
    #[serde(default)]
    value_settings: toml::Table,
}

/// Parse and validate a scenario from TOML text
pub fn parse_scenario(content: &str) -> Result<ModelConfig> {
    let mut config: ModelConfig = toml::from_str(content)?;
    let header: ScenarioHeader = toml::from_str(content)?;

    if let Some(preset) = header.preset {
        let mut settings = preset.settings();
        for dimension in ValueDimension::ALL {
            if header.value_settings.contains_key(dimension.as_str()) {
                settings.set(dimension, config.value_settings.get(dimension));
            }
        }
        config.value_settings = settings;
    }

    config.validate()?;
    Ok(config)
}

/// Load and validate a scenario file
pub fn load_scenario(path: &Path) -> Result<ModelConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_scenario(&content)?;
    tracing::debug!(
        "Loaded scenario {}: {} agents, {} institutions",
        path.display(),
        config.n_agents,
        config.institutions.len()
    );
    Ok(config)
}
