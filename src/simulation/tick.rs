//! Tick system - advances a model by one step
//!
//! Agents are visited one at a time in a freshly shuffled order, and each
//! sees the updates of the agents visited before it.

use crate::core::types::{AgentId, Step};
use crate::simulation::allocation::optimize_allocation;
use crate::simulation::awareness::learn_from_neighbors;
use crate::simulation::membership::sync_memberships;
use crate::simulation::model::Model;

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Step number after advancing
    pub step: Step,
    /// Agents that recomputed their allocation
    pub reoptimized: usize,
    pub joined: usize,
    pub left: usize,
    /// Joins refused because the institution was full
    pub excluded: usize,
    /// Institutions newly learned about through neighbors
    pub awareness_gained: usize,
}

/// Run a single step
///
/// 1. Shuffle agent ids with the model's generator
/// 2. For each agent in that order:
///    - bump its reoptimization counter
///    - learn of institutions from communicative neighbors
///    - if due, recompute its allocation, sync memberships, reset the counter
/// 3. Rebuild the co-membership overlay
/// 4. Advance the step counter and record history
pub fn run_step(model: &mut Model) -> StepReport {
    let mut report = StepReport::default();

    let mut order: Vec<AgentId> = model.agents.iter().map(|a| a.id).collect();
    model.rng.shuffle(&mut order);

    for id in order {
        if let Some(agent) = model.agents.get_mut(id.index()) {
            agent.steps_since_change = agent.steps_since_change.saturating_add(1);
        }

        report.awareness_gained += learn_from_neighbors(
            &mut model.agents,
            id,
            &model.network,
            model.tuning.social_learning_threshold,
        );

        let Some(agent) = model.agents.get_mut(id.index()) else {
            continue;
        };
        if agent.steps_since_change < model.reallocation_frequency {
            continue;
        }

        let allocation = optimize_allocation(agent, &model.institutions, &model.tuning);
        let change = sync_memberships(agent, &mut model.institutions, &allocation);
        if !change.is_empty() {
            tracing::trace!(
                agent = id.0,
                joined = ?change.joined,
                left = ?change.left,
                excluded = ?change.excluded,
                "Memberships changed"
            );
        }

        report.reoptimized += 1;
        report.joined += change.joined.len();
        report.left += change.left.len();
        report.excluded += change.excluded.len();

        agent.time_allocation = allocation;
        agent.steps_since_change = 0;
    }

    model.network.rebuild_overlay(&model.institutions, &model.agents);

    model.step += 1;
    model.history.record(model.step, &model.agents, &model.institutions);
    report.step = model.step;

    tracing::debug!(
        "Step {}: {} reoptimized, {} joined, {} left, {} excluded, {} edges",
        report.step,
        report.reoptimized,
        report.joined,
        report.left,
        report.excluded,
        model.network.edge_count()
    );

    report
}
