//! Headless cultural dynamics runner
//!
//! Builds a model from a scenario file or a value preset with the stock
//! institutions, runs it, and prints a summary. `--output` also writes the
//! full run as JSON.

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use cultural_dynamics::scenario::{default_town, load_scenario, ValuePreset};
use cultural_dynamics::simulation::{mean_final_participation, run_replicates, SimulationOutput};
use cultural_dynamics::{Model, Result};

#[derive(Parser, Debug)]
#[command(name = "cultural-dynamics")]
#[command(about = "Run a cultural practice diffusion simulation")]
struct Args {
    /// Scenario TOML file; overrides --preset
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Value preset for the stock town (e.g. "traditional_community", "secular_urban")
    #[arg(long, default_value = "mixed_values")]
    preset: ValuePreset,

    /// Number of agents (overrides the scenario)
    #[arg(long)]
    agents: Option<usize>,

    /// Steps to simulate
    #[arg(long, default_value_t = 40)]
    steps: u64,

    /// Random seed (overrides the scenario)
    #[arg(long)]
    seed: Option<u32>,

    /// Write the full run as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also run this many extra seeds in parallel and report mean participation
    #[arg(long, default_value_t = 0)]
    replicates: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => default_town(args.preset),
    };
    if let Some(agents) = args.agents {
        config.n_agents = agents;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let start = Instant::now();
    let mut model = Model::new(config.clone())?;
    model.run(args.steps);
    let elapsed = start.elapsed();

    let output = SimulationOutput::from_model(&model, elapsed);
    println!("{}", output.summary());

    if let Some(path) = &args.output {
        std::fs::write(path, output.to_json()?)?;
        tracing::info!("Full output written to {}", path.display());
    }

    if args.replicates > 0 {
        let seeds: Vec<u32> = (1..=args.replicates)
            .map(|offset| config.seed.wrapping_add(offset))
            .collect();
        let runs = run_replicates(&config, &seeds, args.steps)?;
        println!("\nMean final participation over {} extra seeds:", runs.len());
        for (practice, rate) in mean_final_participation(&runs) {
            println!("  {:<18} {:>6.1}%", practice.as_str(), rate * 100.0);
        }
    }

    Ok(())
}
