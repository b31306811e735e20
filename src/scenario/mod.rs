//! Scenario loading and built-in starting points

pub mod loader;
pub mod presets;

pub use loader::{load_scenario, parse_scenario};
pub use presets::{default_town, stock_institution, ValuePreset};
