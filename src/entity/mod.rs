pub mod agent;
pub mod institution;
pub mod practice;
pub mod values;

pub use agent::Agent;
pub use institution::{institution_key, Institution};
pub use practice::{InitialHours, PracticeProfile, PracticeType};
pub use values::{ValueDimension, ValueProfile};
