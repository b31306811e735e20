//! Agent - an individual with values, budgets and memberships

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::{AgentId, InstitutionId, Vec2};
use crate::entity::values::ValueProfile;

/// An individual in the population
///
/// Ordered collections keep iteration order tied to institution ids, which
/// the optimizer's tie-breaking and the model's determinism rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: Vec2,
    /// Preferences, each in [0, 1]
    pub values: ValueProfile,
    /// Hours per week available for institutions
    pub time_budget: f64,
    pub money_budget: f64,
    /// Hours per institution; only entries at or above the allocation floor
    pub time_allocation: BTreeMap<InstitutionId, f64>,
    /// Institutions this agent is a member of (mirrors `Institution::members`)
    pub institutions: BTreeSet<InstitutionId>,
    /// Institutions this agent knows about; never shrinks
    pub aware_of: BTreeSet<InstitutionId>,
    /// Broadcast weight when neighbors learn from this agent
    pub comm_strength: f64,
    /// Steps since the last reoptimization
    pub steps_since_change: u32,
}

impl Agent {
    pub fn new(
        id: AgentId,
        position: Vec2,
        values: ValueProfile,
        time_budget: f64,
        money_budget: f64,
        comm_strength: f64,
    ) -> Self {
        Self {
            id,
            position,
            values,
            time_budget,
            money_budget,
            time_allocation: BTreeMap::new(),
            institutions: BTreeSet::new(),
            aware_of: BTreeSet::new(),
            comm_strength,
            steps_since_change: 0,
        }
    }

    pub fn total_allocated(&self) -> f64 {
        self.time_allocation.values().sum()
    }

    /// Hours not committed to any institution
    pub fn free_time(&self) -> f64 {
        self.time_budget - self.total_allocated()
    }

    pub fn hours_at(&self, institution: InstitutionId) -> f64 {
        self.time_allocation.get(&institution).copied().unwrap_or(0.0)
    }

    pub fn is_member_of(&self, institution: InstitutionId) -> bool {
        self.institutions.contains(&institution)
    }
}
