// seeker_sim/src/lib.rs

use bevy::prelude::*;

use crate::simulation::config::ConfigPlugin;
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::agent::AgentPlugin;
use crate::simulation::plugins::mission::MissionPlugin;
use crate::simulation::plugins::telemetry::TelemetryPlugin;
use crate::simulation::plugins::vision::VisionPlugin;

// Convenience imports for files WITHIN the seeker_sim crate.
pub mod prelude;

pub mod cli;
pub mod simulation;

/// Everything a scenario run needs. Insert the `ScenarioConfig` and
/// initialize `AppState` before adding it.
pub struct SeekerSimulationPlugin;

impl Plugin for SeekerSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Catalog loading and target resolution.
            ConfigPlugin,
            // RNG, clock, state flow, spawning.
            SimulationSetupPlugin,
            // The simulated remote vision model.
            VisionPlugin,
            MissionPlugin,
            // The seeker tick itself.
            AgentPlugin,
            TelemetryPlugin,
        ));
    }
}
