// seeker_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Pure agent types: `Seeker`, `NavigationCommand`, `MissionPlan`, ...
pub use seeker_core::prelude::*;

// Simulation-specific types used across plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::{AppState, SceneBuildSet, SimulationSet};
