//! Cultural Dynamics - agent-based diffusion of cultural practices
//!
//! Agents with value profiles spend a weekly time and money budget across
//! institutions, learn about new institutions through a social network, and
//! periodically reallocate their hours with a greedy utility optimizer.

pub mod core;
pub mod entity;
pub mod scenario;
pub mod simulation;

pub use crate::core::error::{ModelError, Result};
pub use crate::simulation::{Model, ModelConfig};
