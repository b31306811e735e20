//! Institution - a bounded-capacity venue for one practice

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::types::{AgentId, InstitutionId, Vec2};
use crate::entity::practice::PracticeType;
use crate::entity::values::ValueProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: InstitutionId,
    /// Unique key derived from practice type and name
    pub key: String,
    pub name: String,
    pub practice_type: PracticeType,
    pub capacity: u32,
    /// Current members (mirrors `Agent::institutions`)
    pub members: BTreeSet<AgentId>,
    /// Affinity per value dimension, each in [-1, 1]
    pub culture: ValueProfile,
    pub money_cost_per_hour: f64,
    /// Only paid out by work institutions
    pub money_income_per_hour: f64,
    pub position: Vec2,
}

impl Institution {
    pub fn has_capacity(&self) -> bool {
        self.members.len() < self.capacity as usize
    }

    pub fn fill_rate(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.members.len() as f64 / f64::from(self.capacity)
    }
}

/// Build the unique key for an institution: `"{type}_{name}"` with runs of
/// whitespace in the name collapsed to one underscore
pub fn institution_key(practice_type: PracticeType, name: &str) -> String {
    let name = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}", practice_type.as_str(), name)
}
