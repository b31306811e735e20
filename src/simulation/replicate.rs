//! Independent replicate runs over a range of seeds
//!
//! Each replicate owns its own model, so runs proceed in parallel while every
//! individual trajectory stays deterministic in its seed.

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::core::error::Result;
use crate::entity::PracticeType;
use crate::simulation::config::ModelConfig;
use crate::simulation::history::History;
use crate::simulation::model::Model;

/// History of one replicate
#[derive(Debug, Clone)]
pub struct ReplicateRun {
    pub seed: u32,
    pub history: History,
}

/// Run `config` once per seed for `steps` steps; results keep seed order
pub fn run_replicates(config: &ModelConfig, seeds: &[u32], steps: u64) -> Result<Vec<ReplicateRun>> {
    // PARALLEL: replicates share nothing
    seeds
        .par_iter()
        .map(|&seed| -> Result<ReplicateRun> {
            let mut model = Model::new(ModelConfig {
                seed,
                ..config.clone()
            })?;
            model.run(steps);
            Ok(ReplicateRun {
                seed,
                history: model.history,
            })
        })
        .collect()
}

/// Final participation rate per practice, averaged over replicates
pub fn mean_final_participation(runs: &[ReplicateRun]) -> BTreeMap<PracticeType, f64> {
    let count = runs.len().max(1) as f64;
    PracticeType::ALL
        .into_iter()
        .map(|practice| {
            let total: f64 = runs
                .iter()
                .filter_map(|run| run.history.latest(practice))
                .map(|(rate, _)| rate)
                .sum();
            (practice, total / count)
        })
        .collect()
}
