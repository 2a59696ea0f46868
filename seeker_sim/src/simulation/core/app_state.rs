// seeker_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state: catalog loading and target resolution.
    #[default]
    AssetLoading,

    /// Spawning targets and the agent, planning the mission.
    SceneBuilding,

    /// The fixed-rate simulation loop is running.
    Running,

    /// The mission ended (completed, failed or out of time). Nothing ticks.
    Finished,
}

/// Ordering of the spawning passes run on entering `SceneBuilding`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: static world content (targets).
    World,
    /// Pass 2: the agent itself.
    Agent,
    /// Pass 3: vision link for the agent.
    Perception,
    /// Pass 4: mission planning; needs the targets' names.
    Mission,
    /// Pass 5: hand over to `Running`.
    Finalize,
}

/// The per-tick data flow inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Simulated vision service: captures, latency, delivery.
    Perception,
    /// Mission bookkeeping driven by vision reports.
    Behavior,
    /// The agent tick: arbitration, physics, collisions.
    Control,
    /// Reporting, timeouts and end-of-run checks.
    Validation,
}
