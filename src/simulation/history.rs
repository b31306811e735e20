//! Per-practice time series, one point per recorded step

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::types::Step;
use crate::entity::{Agent, Institution, PracticeType};

/// Two aligned series for one practice type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PracticeSeries {
    /// Fraction of agents with any hours at this practice
    pub participation_rate: Vec<f64>,
    /// Hours at this practice averaged over the whole population
    pub avg_hours: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub steps: Vec<Step>,
    pub series: BTreeMap<PracticeType, PracticeSeries>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Empty series for every practice type
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            series: PracticeType::ALL
                .into_iter()
                .map(|practice| (practice, PracticeSeries::default()))
                .collect(),
        }
    }

    /// Append one point to every series
    pub fn record(&mut self, step: Step, agents: &[Agent], institutions: &[Institution]) {
        let population = agents.len().max(1) as f64;
        let mut participants: BTreeMap<PracticeType, usize> = BTreeMap::new();
        let mut total_hours: BTreeMap<PracticeType, f64> = BTreeMap::new();

        for agent in agents {
            let mut seen = BTreeSet::new();
            for (id, hours) in &agent.time_allocation {
                let Some(institution) = institutions.get(id.index()) else {
                    continue;
                };
                let practice = institution.practice_type;
                *total_hours.entry(practice).or_insert(0.0) += hours;

                if seen.insert(practice) {
                    *participants.entry(practice).or_insert(0) += 1;
                }
            }
        }

        self.steps.push(step);
        for (practice, series) in self.series.iter_mut() {
            let count = participants.get(practice).copied().unwrap_or(0);
            let hours = total_hours.get(practice).copied().unwrap_or(0.0);
            series.participation_rate.push(count as f64 / population);
            series.avg_hours.push(hours / population);
        }
    }

    pub fn series(&self, practice: PracticeType) -> Option<&PracticeSeries> {
        self.series.get(&practice)
    }

    /// Most recent (participation rate, average hours) for a practice
    pub fn latest(&self, practice: PracticeType) -> Option<(f64, f64)> {
        let series = self.series.get(&practice)?;
        Some((
            *series.participation_rate.last()?,
            *series.avg_hours.last()?,
        ))
    }

    /// Number of recorded points
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
