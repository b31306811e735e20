//! Model - the aggregate root owning agents, institutions and the network

use ahash::AHashMap;
use serde::Serialize;

use crate::core::config::Tuning;
use crate::core::error::Result;
use crate::core::rng::SimRng;
use crate::core::types::{AgentId, InstitutionId, Step};
use crate::entity::{Agent, Institution, PracticeType, ValueDimension};
use crate::simulation::awareness::broadcast_awareness;
use crate::simulation::config::ModelConfig;
use crate::simulation::generation::{apply_value_settings, build_institutions, spawn_agents};
use crate::simulation::history::History;
use crate::simulation::membership::bootstrap_memberships;
use crate::simulation::network::SocialNetwork;
use crate::simulation::tick::{run_step, StepReport};

const INVARIANT_TOLERANCE: f64 = 1e-9;

/// A running cultural dynamics simulation
///
/// Construction is deterministic in the seed, and so is every step: two
/// models built from the same config and advanced the same number of times
/// are identical.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) agents: Vec<Agent>,
    pub(crate) institutions: Vec<Institution>,
    pub(crate) institution_index: AHashMap<String, InstitutionId>,
    pub(crate) network: SocialNetwork,
    pub(crate) history: History,
    pub(crate) step: Step,
    pub(crate) reallocation_frequency: u32,
    pub(crate) awareness_radius: f64,
    pub(crate) tuning: Tuning,
    pub(crate) rng: SimRng,
}

/// Occupancy and engagement of one institution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionStats {
    pub id: InstitutionId,
    pub key: String,
    pub name: String,
    pub practice_type: PracticeType,
    pub members: usize,
    pub capacity: u32,
    pub fill_rate: f64,
    /// Mean weekly hours members spend here; 0 with no members
    pub mean_member_hours: f64,
}

impl Model {
    /// Build a model at step 0 with one history point recorded
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;

        let ModelConfig {
            n_agents,
            institutions: defs,
            value_settings,
            network_density,
            awareness_radius,
            reallocation_frequency,
            seed,
            tuning,
        } = config;

        let mut rng = SimRng::new(seed);

        let mut agents = spawn_agents(n_agents, &tuning, reallocation_frequency, &mut rng);
        apply_value_settings(&mut agents, &value_settings, &mut rng);

        let mut institutions = build_institutions(&defs, &mut rng);
        let institution_index: AHashMap<String, InstitutionId> = institutions
            .iter()
            .map(|inst| (inst.key.clone(), inst.id))
            .collect();

        broadcast_awareness(&mut agents, &institutions, awareness_radius);
        bootstrap_memberships(&mut agents, &mut institutions, &tuning, &mut rng);

        let mut network = SocialNetwork::random(agents.len(), network_density, &mut rng);
        network.rebuild_overlay(&institutions, &agents);

        let mut history = History::new();
        history.record(0, &agents, &institutions);

        tracing::info!(
            "Built model: {} agents, {} institutions, {} background ties, seed {}",
            agents.len(),
            institutions.len(),
            network.background_edge_count(),
            seed
        );

        Ok(Self {
            agents,
            institutions,
            institution_index,
            network,
            history,
            step: 0,
            reallocation_frequency,
            awareness_radius,
            tuning,
            rng,
        })
    }

    /// Advance one step in place
    pub fn advance(&mut self) -> &mut Self {
        run_step(self);
        self
    }

    /// Advance one step, returning what happened
    pub fn advance_with_report(&mut self) -> StepReport {
        run_step(self)
    }

    /// A copy of this model advanced one step; `self` is untouched
    pub fn stepped(&self) -> Model {
        let mut next = self.clone();
        next.advance();
        next
    }

    /// Advance `steps` times
    pub fn run(&mut self, steps: u64) -> &mut Self {
        for _ in 0..steps {
            run_step(self);
        }
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn institutions(&self) -> &[Institution] {
        &self.institutions
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn institution(&self, id: InstitutionId) -> Option<&Institution> {
        self.institutions.get(id.index())
    }

    pub fn institution_by_key(&self, key: &str) -> Option<&Institution> {
        self.institution_index
            .get(key)
            .and_then(|id| self.institution(*id))
    }

    pub fn network(&self) -> &SocialNetwork {
        &self.network
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn reallocation_frequency(&self) -> u32 {
        self.reallocation_frequency
    }

    pub fn awareness_radius(&self) -> f64 {
        self.awareness_radius
    }

    pub fn free_time(&self, agent: AgentId) -> Option<f64> {
        self.agent(agent).map(Agent::free_time)
    }

    /// Non-work practice type the agent spends the most hours on
    ///
    /// Hours are summed per type. Ties go to the type met first when walking
    /// the allocation in institution order. `None` without non-work hours.
    pub fn dominant_practice(&self, agent: AgentId) -> Option<PracticeType> {
        let agent = self.agent(agent)?;
        let mut totals: Vec<(PracticeType, f64)> = Vec::new();
        for (id, hours) in &agent.time_allocation {
            let Some(institution) = self.institution(*id) else {
                continue;
            };
            let practice = institution.practice_type;
            if practice.is_work() {
                continue;
            }
            match totals.iter_mut().find(|(p, _)| *p == practice) {
                Some((_, total)) => *total += hours,
                None => totals.push((practice, *hours)),
            }
        }
        first_max(totals)
    }

    /// Practice type of the single institution with the most hours, work included
    pub fn primary_practice(&self, agent: AgentId) -> Option<PracticeType> {
        let agent = self.agent(agent)?;
        let entries = agent.time_allocation.iter().filter_map(|(id, hours)| {
            self.institution(*id)
                .map(|institution| (institution.practice_type, *hours))
        });
        first_max(entries)
    }

    /// The agent's `n` strongest values, strongest first
    pub fn top_values(&self, agent: AgentId, n: usize) -> Vec<(ValueDimension, f64)> {
        let Some(agent) = self.agent(agent) else {
            return Vec::new();
        };
        let mut values: Vec<(ValueDimension, f64)> = agent.values.iter().collect();
        values.sort_by(|a, b| b.1.total_cmp(&a.1));
        values.truncate(n);
        values
    }

    pub fn degree(&self, agent: AgentId) -> usize {
        self.network.degree(agent)
    }

    pub fn edge_count(&self) -> usize {
        self.network.edge_count()
    }

    pub fn institution_stats(&self) -> Vec<InstitutionStats> {
        self.institutions
            .iter()
            .map(|institution| {
                let member_hours: f64 = institution
                    .members
                    .iter()
                    .filter_map(|id| self.agent(*id))
                    .map(|agent| agent.hours_at(institution.id))
                    .sum();
                let members = institution.members.len();
                InstitutionStats {
                    id: institution.id,
                    key: institution.key.clone(),
                    name: institution.name.clone(),
                    practice_type: institution.practice_type,
                    members,
                    capacity: institution.capacity,
                    fill_rate: institution.fill_rate(),
                    mean_member_hours: if members == 0 {
                        0.0
                    } else {
                        member_hours / members as f64
                    },
                }
            })
            .collect()
    }

    /// Describe every broken model invariant; empty when the model is sound
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for agent in &self.agents {
            if !agent.institutions.is_subset(&agent.aware_of) {
                violations.push(format!("agent {} is a member of an unknown institution", agent.id.0));
            }
            if agent.total_allocated() > agent.time_budget + INVARIANT_TOLERANCE {
                violations.push(format!(
                    "agent {} allocates {} of {} hours",
                    agent.id.0,
                    agent.total_allocated(),
                    agent.time_budget
                ));
            }
            if !agent.values.within(0.0, 1.0) {
                violations.push(format!("agent {} has values outside [0, 1]", agent.id.0));
            }
            for id in &agent.institutions {
                let listed = self
                    .institution(*id)
                    .is_some_and(|inst| inst.members.contains(&agent.id));
                if !listed {
                    violations.push(format!(
                        "agent {} lists institution {} which does not list it back",
                        agent.id.0, id.0
                    ));
                }
            }
        }

        for institution in &self.institutions {
            if institution.members.len() > institution.capacity as usize {
                violations.push(format!(
                    "{} has {} members over capacity {}",
                    institution.key,
                    institution.members.len(),
                    institution.capacity
                ));
            }
            if !institution.culture.within(-1.0, 1.0) {
                violations.push(format!("{} has culture outside [-1, 1]", institution.key));
            }
            for id in &institution.members {
                if !self.agent(*id).is_some_and(|a| a.is_member_of(institution.id)) {
                    violations.push(format!(
                        "{} lists agent {} which does not list it back",
                        institution.key, id.0
                    ));
                }
            }
        }

        if !self.network.is_consistent() {
            violations.push("network is asymmetric, has a self-loop, or lost a background tie".into());
        }

        violations
    }
}

/// Greatest value, first occurrence wins ties
fn first_max<T>(entries: impl IntoIterator<Item = (T, f64)>) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for (item, value) in entries {
        if best.as_ref().map_or(true, |(_, b)| value > *b) {
            best = Some((item, value));
        }
    }
    best.map(|(item, _)| item)
}
