//! Model tuning constants
//!
//! Every magic number the dynamics depend on lives here with a note on what
//! it controls. Scenario files may override any of them under `[tuning]`.

use serde::{Deserialize, Serialize};

use crate::core::error::{ModelError, Result};

/// Tunable constants for construction and stepping
///
/// The defaults reproduce the reference behavior of the model. Per-practice
/// constants (diminishing returns, hour caps, benefit weights) live on
/// `PracticeType::profile` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === BUDGETS ===
    /// Hours per week every agent can allocate
    ///
    /// Also bounds the number of greedy iterations the optimizer runs.
    pub time_budget: f64,

    /// Range agents' weekly money budget is drawn from, `[low, high)`
    ///
    /// Money only gates non-work institutions: an hour is unaffordable when
    /// its cost would push the running balance below zero.
    pub money_budget_range: (f64, f64),

    /// Range of the broadcast weight agents use when sharing awareness
    pub comm_strength_range: (f64, f64),

    // === MEMBERSHIP ===
    /// Chance an aware agent with positive cultural fit joins at bootstrap
    pub join_probability: f64,

    /// Minimum neighbor `comm_strength` for its memberships to be learned
    ///
    /// At the default (0.2) every agent drawn from the default
    /// `comm_strength_range` qualifies.
    pub social_learning_threshold: f64,

    // === ALLOCATION ===
    /// Smallest marginal utility worth spending an hour on
    ///
    /// The greedy optimizer stops once no affordable institution beats this,
    /// leaving the remaining hours as free time.
    pub utility_epsilon: f64,

    /// Allocations below this many hours are dropped from `time_allocation`
    pub min_allocation_hours: f64,

    /// Scale applied to hourly income/cost before weighting by the agent's
    /// wealth value
    ///
    /// At 0.01 a workplace paying 25/h adds 0.25 utility per hour to an agent
    /// with wealth 1.0, enough to outweigh most benefit weights.
    pub money_utility_scale: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_budget: 168.0,
            money_budget_range: (500.0, 2000.0),
            comm_strength_range: (0.5, 1.0),

            join_probability: 0.3,
            social_learning_threshold: 0.2,

            utility_epsilon: 0.005,
            min_allocation_hours: 0.5,
            money_utility_scale: 0.01,
        }
    }
}

impl Tuning {
    /// Validate tuning for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.time_budget > 0.0 && self.time_budget.is_finite()) {
            return Err(ModelError::InvalidTuning(format!(
                "time_budget must be positive, got {}",
                self.time_budget
            )));
        }

        let (low, high) = self.money_budget_range;
        if !(low > 0.0 && low <= high && high.is_finite()) {
            return Err(ModelError::InvalidTuning(format!(
                "money_budget_range must be positive and ordered, got ({}, {})",
                low, high
            )));
        }

        let (low, high) = self.comm_strength_range;
        if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
            return Err(ModelError::InvalidTuning(format!(
                "comm_strength_range must be an ordered range within [0, 1], got ({}, {})",
                low, high
            )));
        }

        if !(0.0..=1.0).contains(&self.join_probability) {
            return Err(ModelError::InvalidTuning(format!(
                "join_probability must be in [0, 1], got {}",
                self.join_probability
            )));
        }

        if !(self.utility_epsilon >= 0.0) || !(self.min_allocation_hours >= 0.0) {
            return Err(ModelError::InvalidTuning(
                "utility_epsilon and min_allocation_hours must be non-negative".into(),
            ));
        }

        if !self.money_utility_scale.is_finite() || !self.social_learning_threshold.is_finite() {
            return Err(ModelError::InvalidTuning(
                "money_utility_scale and social_learning_threshold must be finite".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.time_budget, 168.0);
        assert_eq!(tuning.join_probability, 0.3);
        assert_eq!(tuning.utility_epsilon, 0.005);
        assert_eq!(tuning.min_allocation_hours, 0.5);
    }

    #[test]
    fn test_rejects_unordered_money_range() {
        let tuning = Tuning {
            money_budget_range: (2000.0, 500.0),
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(ModelError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_nan_time_budget() {
        let tuning = Tuning {
            time_budget: f64::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let tuning: Tuning = toml::from_str("join_probability = 0.5").unwrap();
        assert_eq!(tuning.join_probability, 0.5);
        assert_eq!(tuning.time_budget, 168.0);
    }
}
