//! Model construction configuration

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::config::Tuning;
use crate::core::error::{ModelError, Result};
use crate::entity::institution::institution_key;
use crate::entity::practice::PracticeType;
use crate::entity::values::{ValueDimension, ValueProfile};

/// Everything needed to build a model at step 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_agents: usize,
    pub institutions: Vec<InstitutionDef>,
    pub value_settings: ValueSettings,
    /// Probability of a background tie between any two agents
    pub network_density: f64,
    /// Institutions within this distance are known at construction
    pub awareness_radius: f64,
    /// Steps an agent waits between reoptimizations
    pub reallocation_frequency: u32,
    pub seed: u32,
    pub tuning: Tuning,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_agents: 100,
            institutions: Vec::new(),
            value_settings: ValueSettings::default(),
            network_density: 0.03,
            awareness_radius: 0.3,
            reallocation_frequency: 4,
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// Definition of one institution to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionDef {
    pub name: String,
    #[serde(rename = "type", alias = "practice_type")]
    pub practice_type: PracticeType,
    #[serde(alias = "size")]
    pub capacity: u32,
    #[serde(default, alias = "money_cost")]
    pub money_cost_per_hour: f64,
    #[serde(default, alias = "money_income")]
    pub money_income_per_hour: f64,
    #[serde(default)]
    pub culture: ValueProfile,
}

impl InstitutionDef {
    pub fn new(name: impl Into<String>, practice_type: PracticeType, capacity: u32) -> Self {
        Self {
            name: name.into(),
            practice_type,
            capacity,
            money_cost_per_hour: 0.0,
            money_income_per_hour: 0.0,
            culture: ValueProfile::default(),
        }
    }

    pub fn with_cost(mut self, per_hour: f64) -> Self {
        self.money_cost_per_hour = per_hour;
        self
    }

    pub fn with_income(mut self, per_hour: f64) -> Self {
        self.money_income_per_hour = per_hour;
        self
    }

    pub fn with_culture(mut self, culture: ValueProfile) -> Self {
        self.culture = culture;
        self
    }

    pub fn key(&self) -> String {
        institution_key(self.practice_type, &self.name)
    }

    fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ModelError::InvalidCapacity {
                name: self.name.clone(),
                capacity: self.capacity,
            });
        }

        for (field, value) in [
            ("money_cost_per_hour", self.money_cost_per_hour),
            ("money_income_per_hour", self.money_income_per_hour),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ModelError::InvalidMoneyRate {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        if let Some((dimension, affinity)) = self
            .culture
            .iter()
            .find(|(_, v)| !(-1.0..=1.0).contains(v))
        {
            return Err(ModelError::InvalidCulture {
                name: self.name.clone(),
                dimension,
                affinity,
            });
        }

        Ok(())
    }
}

/// Normal distribution overlaid on one value dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueSetting {
    pub mean: f64,
    pub spread: f64,
}

impl ValueSetting {
    pub const fn new(mean: f64, spread: f64) -> Self {
        Self { mean, spread }
    }
}

/// Per-dimension value distributions
///
/// A dimension set to `None` keeps the agent's raw uniform draw. Dimensions
/// left out of a `[value_settings]` table deserialize to `None`; a config
/// without the table gets the default (0.5, 0.2) on every dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<ValueSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tradition: Option<ValueSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<ValueSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub civic: Option<ValueSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ValueSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leisure: Option<ValueSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wealth: Option<ValueSetting>,
}

impl Default for ValueSettings {
    fn default() -> Self {
        Self::uniform(0.5, 0.2)
    }
}

impl ValueSettings {
    /// Same (mean, spread) on every dimension
    pub fn uniform(mean: f64, spread: f64) -> Self {
        let setting = Some(ValueSetting::new(mean, spread));
        Self {
            community: setting,
            tradition: setting,
            growth: setting,
            civic: setting,
            status: setting,
            leisure: setting,
            wealth: setting,
        }
    }

    /// No overlay at all: agents keep raw uniform values
    pub fn raw() -> Self {
        Self {
            community: None,
            tradition: None,
            growth: None,
            civic: None,
            status: None,
            leisure: None,
            wealth: None,
        }
    }

    pub fn get(&self, dimension: ValueDimension) -> Option<ValueSetting> {
        match dimension {
            ValueDimension::Community => self.community,
            ValueDimension::Tradition => self.tradition,
            ValueDimension::Growth => self.growth,
            ValueDimension::Civic => self.civic,
            ValueDimension::Status => self.status,
            ValueDimension::Leisure => self.leisure,
            ValueDimension::Wealth => self.wealth,
        }
    }

    pub fn set(&mut self, dimension: ValueDimension, setting: Option<ValueSetting>) {
        let slot = match dimension {
            ValueDimension::Community => &mut self.community,
            ValueDimension::Tradition => &mut self.tradition,
            ValueDimension::Growth => &mut self.growth,
            ValueDimension::Civic => &mut self.civic,
            ValueDimension::Status => &mut self.status,
            ValueDimension::Leisure => &mut self.leisure,
            ValueDimension::Wealth => &mut self.wealth,
        };
        *slot = setting;
    }

    fn validate(&self) -> Result<()> {
        for dimension in ValueDimension::ALL {
            if let Some(ValueSetting { mean, spread }) = self.get(dimension) {
                if !(0.0..=1.0).contains(&mean) || !(spread >= 0.0 && spread.is_finite()) {
                    return Err(ModelError::InvalidValueSetting {
                        dimension,
                        mean,
                        spread,
                    });
                }
            }
        }
        Ok(())
    }
}

impl ModelConfig {
    /// Reject configurations that would build a degenerate model
    pub fn validate(&self) -> Result<()> {
        if self.n_agents == 0 || u32::try_from(self.n_agents).is_err() {
            return Err(ModelError::InvalidPopulation(self.n_agents));
        }

        if !(self.network_density > 0.0 && self.network_density < 1.0) {
            return Err(ModelError::InvalidDensity(self.network_density));
        }

        if !(self.awareness_radius > 0.0 && self.awareness_radius <= 1.0) {
            return Err(ModelError::InvalidRadius(self.awareness_radius));
        }

        if self.reallocation_frequency == 0 {
            return Err(ModelError::InvalidReallocationFrequency(
                self.reallocation_frequency,
            ));
        }

        self.value_settings.validate()?;

        let mut keys = AHashSet::new();
        for def in &self.institutions {
            def.validate()?;
            let key = def.key();
            if !keys.insert(key.clone()) {
                return Err(ModelError::DuplicateInstitution(key));
            }
        }

        self.tuning.validate()
    }
}
