//! Institution awareness: spatial broadcast and social learning
//!
//! Awareness only ever grows. Agents learn of institutions once at
//! construction from proximity, then each step from neighbors' memberships.

use crate::core::types::AgentId;
use crate::entity::{Agent, Institution};
use crate::simulation::network::SocialNetwork;

/// Make every agent aware of institutions within `radius`
pub fn broadcast_awareness(agents: &mut [Agent], institutions: &[Institution], radius: f64) {
    for institution in institutions {
        for agent in agents.iter_mut() {
            if agent.position.distance(&institution.position) <= radius {
                agent.aware_of.insert(institution.id);
            }
        }
    }
}

/// Union the memberships of sufficiently communicative neighbors into
/// `agent`'s awareness. Returns how many institutions were newly learned.
pub fn learn_from_neighbors(
    agents: &mut [Agent],
    agent: AgentId,
    network: &SocialNetwork,
    threshold: f64,
) -> usize {
    let learned: Vec<_> = network
        .neighbors(agent)
        .filter_map(|neighbor| agents.get(neighbor.index()))
        .filter(|neighbor| neighbor.comm_strength >= threshold)
        .flat_map(|neighbor| neighbor.institutions.iter().copied())
        .collect();

    let Some(target) = agents.get_mut(agent.index()) else {
        return 0;
    };
    let before = target.aware_of.len();
    target.aware_of.extend(learned);
    target.aware_of.len() - before
}
