//! Membership: the only place agent and institution membership sets change
//!
//! `Agent::institutions` and `Institution::members` mirror each other. Every
//! mutation goes through `join` or `leave`, which update both sides together.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::Tuning;
use crate::core::rng::SimRng;
use crate::core::types::InstitutionId;
use crate::entity::{Agent, InitialHours, Institution};

/// Add `agent` to `institution` on both sides
///
/// Returns false, changing nothing, when the institution is full.
pub fn join(agent: &mut Agent, institution: &mut Institution) -> bool {
    if !institution.members.contains(&agent.id) {
        if !institution.has_capacity() {
            return false;
        }
        institution.members.insert(agent.id);
    }
    agent.institutions.insert(institution.id);
    true
}

/// Remove `agent` from `institution` on both sides
pub fn leave(agent: &mut Agent, institution: &mut Institution) {
    institution.members.remove(&agent.id);
    agent.institutions.remove(&institution.id);
}

/// Dot product of the institution's culture and the agent's values
pub fn cultural_fit(agent: &Agent, institution: &Institution) -> f64 {
    institution.culture.dot(&agent.values)
}

/// Initial joins at construction
///
/// Each aware agent with strictly positive fit joins with probability
/// `join_probability` if there is room, committing the practice's initial
/// hours. Hours are clamped to the agent's free time, and a join that would
/// leave less than the allocation floor is skipped.
pub fn bootstrap_memberships(
    agents: &mut [Agent],
    institutions: &mut [Institution],
    tuning: &Tuning,
    rng: &mut SimRng,
) {
    for agent in agents.iter_mut() {
        let aware: Vec<InstitutionId> = agent.aware_of.iter().copied().collect();
        for id in aware {
            let Some(institution) = institutions.get_mut(id.index()) else {
                continue;
            };

            if cultural_fit(agent, institution) <= 0.0 {
                continue;
            }
            if !rng.chance(tuning.join_probability) || !institution.has_capacity() {
                continue;
            }

            let hours = match institution.practice_type.profile().initial_hours {
                InitialHours::Fixed(hours) => hours,
                InitialHours::Range(low, high) => rng.uniform(low, high),
            };
            let hours = hours.min(agent.free_time());
            if hours < tuning.min_allocation_hours {
                continue;
            }

            if join(agent, institution) {
                agent.time_allocation.insert(id, hours);
            }
        }
    }
}

/// Outcome of reconciling one agent's memberships with a new allocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipChange {
    pub joined: Vec<InstitutionId>,
    pub left: Vec<InstitutionId>,
    /// Selected by the allocation but full
    pub excluded: Vec<InstitutionId>,
}

impl MembershipChange {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty() && self.excluded.is_empty()
    }
}

/// Leave institutions missing from `allocation`, join newly selected ones
/// where capacity permits
///
/// A full institution keeps its hours in the allocation but the agent does
/// not become a member; it will try again at its next reoptimization.
pub fn sync_memberships(
    agent: &mut Agent,
    institutions: &mut [Institution],
    allocation: &BTreeMap<InstitutionId, f64>,
) -> MembershipChange {
    let mut change = MembershipChange::default();

    let current: BTreeSet<InstitutionId> = agent.institutions.clone();
    for id in current.iter().filter(|id| !allocation.contains_key(id)) {
        if let Some(institution) = institutions.get_mut(id.index()) {
            leave(agent, institution);
            change.left.push(*id);
        }
    }

    for id in allocation.keys().filter(|id| !current.contains(id)) {
        let Some(institution) = institutions.get_mut(id.index()) else {
            continue;
        };
        if join(agent, institution) {
            change.joined.push(*id);
        } else {
            change.excluded.push(*id);
        }
    }

    change
}
