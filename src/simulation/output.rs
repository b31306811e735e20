//! Run output: final snapshot, history and summary statistics

use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

use crate::core::error::Result;
use crate::core::types::{AgentId, Step};
use crate::entity::{Agent, Institution, PracticeType};
use crate::simulation::history::History;
use crate::simulation::model::{InstitutionStats, Model};

/// Complete simulation output, for export only
#[derive(Clone, Debug, Serialize)]
pub struct SimulationOutput {
    pub final_state: ModelSnapshot,
    pub history: History,
    pub statistics: SimulationStats,
}

/// Serializable snapshot of model state
#[derive(Clone, Debug, Serialize)]
pub struct ModelSnapshot {
    pub step: Step,
    pub agents: Vec<Agent>,
    pub institutions: Vec<Institution>,
    pub edges: Vec<(AgentId, AgentId)>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationStats {
    pub steps_simulated: Step,
    pub simulation_time_ms: u64,
    pub agents: usize,
    pub edges: usize,
    pub background_edges: usize,
    /// Agents with at least one membership
    pub engaged_agents: usize,
    pub mean_free_time: f64,
    pub institutions: Vec<InstitutionStats>,
}

impl SimulationOutput {
    pub fn from_model(model: &Model, elapsed: Duration) -> Self {
        let agents = model.agents();
        let population = agents.len().max(1) as f64;
        let engaged_agents = agents.iter().filter(|a| !a.institutions.is_empty()).count();
        let mean_free_time = agents.iter().map(Agent::free_time).sum::<f64>() / population;

        Self {
            final_state: ModelSnapshot {
                step: model.step(),
                agents: agents.to_vec(),
                institutions: model.institutions().to_vec(),
                edges: model.network().edges().collect(),
            },
            history: model.history().clone(),
            statistics: SimulationStats {
                steps_simulated: model.step(),
                simulation_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                agents: agents.len(),
                edges: model.network().edge_count(),
                background_edges: model.network().background_edge_count(),
                engaged_agents,
                mean_free_time,
                institutions: model.institution_stats(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary with the final participation table
    pub fn summary(&self) -> String {
        let stats = &self.statistics;
        let mut out = format!(
            "Simulated {} steps in {}ms\n{} agents, {} engaged, {:.1}h mean free time, {} ties ({} background)\n",
            stats.steps_simulated,
            stats.simulation_time_ms,
            stats.agents,
            stats.engaged_agents,
            stats.mean_free_time,
            stats.edges,
            stats.background_edges,
        );

        let _ = writeln!(out, "\n{:<18} {:>13} {:>10}", "practice", "participation", "avg hours");
        for practice in PracticeType::ALL {
            if let Some((rate, hours)) = self.history.latest(practice) {
                let _ = writeln!(out, "{:<18} {:>12.1}% {:>10.2}", practice.as_str(), rate * 100.0, hours);
            }
        }

        if !stats.institutions.is_empty() {
            let _ = writeln!(out, "\n{:<28} {:>9} {:>7} {:>10}", "institution", "members", "fill", "mean hrs");
            for inst in &stats.institutions {
                let _ = writeln!(
                    out,
                    "{:<28} {:>4}/{:<4} {:>6.0}% {:>10.2}",
                    inst.key,
                    inst.members,
                    inst.capacity,
                    inst.fill_rate * 100.0,
                    inst.mean_member_hours
                );
            }
        }

        out
    }
}
