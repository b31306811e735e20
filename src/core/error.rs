use thiserror::Error;

use crate::entity::values::ValueDimension;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Population size must be positive, got {0}")]
    InvalidPopulation(usize),

    #[error("Institution '{name}' must have a positive capacity, got {capacity}")]
    InvalidCapacity { name: String, capacity: u32 },

    #[error("Awareness radius must be in (0, 1], got {0}")]
    InvalidRadius(f64),

    #[error("Network density must be in (0, 1), got {0}")]
    InvalidDensity(f64),

    #[error("Reallocation frequency must be at least 1, got {0}")]
    InvalidReallocationFrequency(u32),

    #[error("Value setting for {dimension}: mean {mean} must be in [0, 1] and spread {spread} must be non-negative")]
    InvalidValueSetting {
        dimension: ValueDimension,
        mean: f64,
        spread: f64,
    },

    #[error("Institution '{name}' has {dimension} affinity {affinity}, expected [-1, 1]")]
    InvalidCulture {
        name: String,
        dimension: ValueDimension,
        affinity: f64,
    },

    #[error("Institution '{name}' has invalid {field} {value}, expected a non-negative amount")]
    InvalidMoneyRate {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("Duplicate institution key: {0}")]
    DuplicateInstitution(String),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
