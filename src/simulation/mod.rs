pub mod allocation;
pub mod awareness;
pub mod config;
pub mod generation;
pub mod history;
pub mod membership;
pub mod model;
pub mod network;
pub mod output;
pub mod replicate;
pub mod tick;

pub use allocation::{institution_utility, marginal_utility, optimize_allocation};
pub use config::{InstitutionDef, ModelConfig, ValueSetting, ValueSettings};
pub use history::{History, PracticeSeries};
pub use membership::{cultural_fit, MembershipChange};
pub use model::{InstitutionStats, Model};
pub use network::SocialNetwork;
pub use output::{ModelSnapshot, SimulationOutput, SimulationStats};
pub use replicate::{mean_final_participation, run_replicates, ReplicateRun};
pub use tick::{run_step, StepReport};
