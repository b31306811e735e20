//! Built-in value presets and stock institution templates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::{PracticeType, ValueProfile};
use crate::simulation::config::{InstitutionDef, ModelConfig, ValueSetting, ValueSettings};

/// Named population value distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePreset {
    TraditionalCommunity,
    SecularUrban,
    MixedValues,
    StatusDriven,
}

const fn s(mean: f64, spread: f64) -> Option<ValueSetting> {
    Some(ValueSetting::new(mean, spread))
}

impl ValuePreset {
    pub const ALL: [ValuePreset; 4] = [
        ValuePreset::TraditionalCommunity,
        ValuePreset::SecularUrban,
        ValuePreset::MixedValues,
        ValuePreset::StatusDriven,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValuePreset::TraditionalCommunity => "Traditional Community",
            ValuePreset::SecularUrban => "Secular Urban",
            ValuePreset::MixedValues => "Mixed Values",
            ValuePreset::StatusDriven => "Status-Driven",
        }
    }

    /// (mean, spread) for all seven dimensions
    pub fn settings(self) -> ValueSettings {
        match self {
            ValuePreset::TraditionalCommunity => ValueSettings {
                community: s(0.75, 0.15),
                tradition: s(0.80, 0.12),
                growth: s(0.40, 0.20),
                civic: s(0.60, 0.18),
                status: s(0.30, 0.18),
                leisure: s(0.50, 0.20),
                wealth: s(0.35, 0.18),
            },
            ValuePreset::SecularUrban => ValueSettings {
                community: s(0.40, 0.20),
                tradition: s(0.20, 0.15),
                growth: s(0.70, 0.18),
                civic: s(0.40, 0.20),
                status: s(0.70, 0.18),
                leisure: s(0.60, 0.20),
                wealth: s(0.70, 0.18),
            },
            ValuePreset::MixedValues => ValueSettings::uniform(0.5, 0.25),
            ValuePreset::StatusDriven => ValueSettings {
                community: s(0.30, 0.18),
                tradition: s(0.35, 0.18),
                growth: s(0.60, 0.18),
                civic: s(0.25, 0.18),
                status: s(0.90, 0.08),
                leisure: s(0.25, 0.18),
                wealth: s(0.80, 0.12),
            },
        }
    }
}

impl fmt::Display for ValuePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValuePreset {
    type Err = String;

    /// Accepts the display name or any case/separator variant of it,
    /// e.g. "Status-Driven", "status_driven", "secular urban"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalize = |text: &str| {
            text.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        };
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|preset| normalize(preset.name()) == wanted)
            .ok_or_else(|| format!("Unknown value preset: {}", s))
    }
}

/// Quick-add institution for a practice type, named "{Type} {number}"
///
/// Community centers have no stock template.
pub fn stock_institution(practice: PracticeType, number: usize) -> Option<InstitutionDef> {
    let (capacity, cost, income, culture) = match practice {
        PracticeType::Work => (40, 0.0, 25.0, ValueProfile::new(0.3, 0.2, 0.4, 0.2, 0.5, 0.0, 0.0)),
        PracticeType::Church => (30, 2.0, 0.0, ValueProfile::new(0.8, 0.9, 0.3, 0.5, 0.3, 0.0, 0.0)),
        PracticeType::Club => (25, 5.0, 0.0, ValueProfile::new(0.6, 0.2, 0.5, 0.3, 0.5, 0.0, 0.0)),
        PracticeType::Education => (35, 10.0, 0.0, ValueProfile::new(0.4, 0.4, 0.9, 0.5, 0.7, 0.0, 0.0)),
        PracticeType::PoliticalOrg => (20, 0.0, 0.0, ValueProfile::new(0.5, 0.3, 0.4, 0.9, 0.4, 0.0, 0.0)),
        PracticeType::CommunityCenter => return None,
    };

    let name = format!("{} {}", practice.title(), number);
    Some(
        InstitutionDef::new(name, practice, capacity)
            .with_cost(cost)
            .with_income(income)
            .with_culture(culture),
    )
}

/// Small town with two workplaces and one of every other stock template
pub fn default_town(preset: ValuePreset) -> ModelConfig {
    let plan = [
        (PracticeType::Work, 1),
        (PracticeType::Work, 2),
        (PracticeType::Church, 1),
        (PracticeType::Club, 1),
        (PracticeType::Education, 1),
        (PracticeType::PoliticalOrg, 1),
    ];

    ModelConfig {
        institutions: plan
            .into_iter()
            .filter_map(|(practice, number)| stock_institution(practice, number))
            .collect(),
        value_settings: preset.settings(),
        ..ModelConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ValueDimension;

    #[test]
    fn test_presets_cover_every_dimension() {
        for preset in ValuePreset::ALL {
            let settings = preset.settings();
            for dimension in ValueDimension::ALL {
                assert!(settings.get(dimension).is_some(), "{} lacks {}", preset, dimension);
            }
        }
    }

    #[test]
    fn test_preset_parsing_is_lenient() {
        assert_eq!("Status-Driven".parse::<ValuePreset>(), Ok(ValuePreset::StatusDriven));
        assert_eq!("secular_urban".parse::<ValuePreset>(), Ok(ValuePreset::SecularUrban));
        assert_eq!("TRADITIONAL community".parse::<ValuePreset>(), Ok(ValuePreset::TraditionalCommunity));
        assert!("utopia".parse::<ValuePreset>().is_err());
    }

    #[test]
    fn test_status_driven_values() {
        let settings = ValuePreset::StatusDriven.settings();
        assert_eq!(settings.status, Some(ValueSetting::new(0.90, 0.08)));
        assert_eq!(settings.wealth, Some(ValueSetting::new(0.80, 0.12)));
    }

    #[test]
    fn test_stock_templates() {
        let work = stock_institution(PracticeType::Work, 1).unwrap();
        assert_eq!(work.name, "Work 1");
        assert_eq!(work.capacity, 40);
        assert_eq!(work.money_income_per_hour, 25.0);

        let civic = stock_institution(PracticeType::PoliticalOrg, 3).unwrap();
        assert_eq!(civic.name, "Political Org 3");
        assert_eq!(civic.key(), "political_org_Political_Org_3");
        assert_eq!(civic.culture.civic, 0.9);

        assert!(stock_institution(PracticeType::CommunityCenter, 1).is_none());
    }

    #[test]
    fn test_default_town_is_valid() {
        for preset in ValuePreset::ALL {
            let config = default_town(preset);
            assert_eq!(config.institutions.len(), 6);
            assert!(config.validate().is_ok());
        }
    }
}
