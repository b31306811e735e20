//! Social network: random background ties plus co-membership cliques
//!
//! The background graph is fixed at construction. The co-membership overlay
//! is rebuilt from scratch every step, since a clique computed once goes
//! stale as soon as membership changes. Rebuilding starts from a copy of the
//! background, so overlay edges are bounded by the sum of C(capacity, 2)
//! over institutions.

use ahash::AHashMap;
use std::collections::BTreeSet;

use crate::core::rng::SimRng;
use crate::core::types::AgentId;
use crate::entity::{Agent, Institution};

/// Undirected, loop-free adjacency over agent ids
#[derive(Debug, Clone, Default)]
pub struct SocialNetwork {
    background: Vec<BTreeSet<AgentId>>,
    adjacency: Vec<BTreeSet<AgentId>>,
    /// Co-membership weight per tie, keyed by (smaller id, larger id)
    tie_weights: AHashMap<(AgentId, AgentId), f64>,
}

fn ordered(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl SocialNetwork {
    /// Network over `agent_count` agents with no ties
    pub fn empty(agent_count: usize) -> Self {
        Self {
            background: vec![BTreeSet::new(); agent_count],
            adjacency: vec![BTreeSet::new(); agent_count],
            tie_weights: AHashMap::new(),
        }
    }

    /// Erdos-Renyi background: each unordered pair is tied with probability `density`
    pub fn random(agent_count: usize, density: f64, rng: &mut SimRng) -> Self {
        let mut network = Self::empty(agent_count);
        let ids: Vec<AgentId> = (0u32..).take(agent_count).map(AgentId).collect();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if rng.chance(density) {
                    network.connect(a, b);
                }
            }
        }
        network
    }

    /// Add a permanent background tie
    pub fn connect(&mut self, a: AgentId, b: AgentId) {
        if a == b || a.index() >= self.background.len() || b.index() >= self.background.len() {
            return;
        }
        self.background[a.index()].insert(b);
        self.background[b.index()].insert(a);
        self.link(a, b);
    }

    fn link(&mut self, a: AgentId, b: AgentId) {
        if a == b {
            return;
        }
        if let Some(set) = self.adjacency.get_mut(a.index()) {
            set.insert(b);
        }
        if let Some(set) = self.adjacency.get_mut(b.index()) {
            set.insert(a);
        }
    }

    /// Replace the co-membership overlay with cliques over current members
    ///
    /// Each tie is weighted by the mean hours the two members spend at every
    /// institution they share.
    pub fn rebuild_overlay(&mut self, institutions: &[Institution], agents: &[Agent]) {
        self.adjacency.clone_from(&self.background);
        self.tie_weights.clear();

        let hours = |agent: AgentId, institution: &Institution| {
            agents
                .get(agent.index())
                .map_or(0.0, |a| a.hours_at(institution.id))
        };

        for institution in institutions {
            let members: Vec<AgentId> = institution.members.iter().copied().collect();
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    self.link(a, b);
                    let weight = (hours(a, institution) + hours(b, institution)) / 2.0;
                    *self.tie_weights.entry(ordered(a, b)).or_insert(0.0) += weight;
                }
            }
        }
    }

    pub fn agent_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, agent: AgentId) -> impl Iterator<Item = AgentId> + '_ {
        self.adjacency
            .get(agent.index())
            .into_iter()
            .flatten()
            .copied()
    }

    pub fn are_connected(&self, a: AgentId, b: AgentId) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|set| set.contains(&b))
    }

    pub fn degree(&self, agent: AgentId) -> usize {
        self.adjacency.get(agent.index()).map_or(0, BTreeSet::len)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn background_edge_count(&self) -> usize {
        self.background.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Co-membership weight of a tie; 0 for background-only or absent ties
    pub fn tie_weight(&self, a: AgentId, b: AgentId) -> f64 {
        self.tie_weights.get(&ordered(a, b)).copied().unwrap_or(0.0)
    }

    /// Every edge once, as (smaller id, larger id), in id order
    pub fn edges(&self) -> impl Iterator<Item = (AgentId, AgentId)> + '_ {
        self.adjacency
            .iter()
            .zip(0u32..)
            .flat_map(|(set, a)| set.iter().filter(move |b| b.0 > a).map(move |&b| (AgentId(a), b)))
    }

    /// Symmetric, loop-free, and containing every background tie
    pub fn is_consistent(&self) -> bool {
        let symmetric = self.adjacency.iter().zip(0u32..).all(|(set, a)| {
            let a = AgentId(a);
            !set.contains(&a) && set.iter().all(|b| self.are_connected(*b, a))
        });
        let keeps_background = self
            .background
            .iter()
            .zip(&self.adjacency)
            .all(|(bg, adj)| bg.is_subset(adj));
        symmetric && keeps_background
    }
}
