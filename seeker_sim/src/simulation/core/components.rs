// seeker_sim/src/simulation/core/components.rs

use bevy::prelude::Component;
use nalgebra::Point2;
use seeker_core::seeker::Seeker;

/// The agent entity's core state.
#[derive(Component)]
pub struct SeekerAgent(pub Seeker);

/// A target placed in the maze.
#[derive(Component, Debug, Clone)]
pub struct Target {
    pub name: String,
    pub radius: f64,
    pub position: Point2<f64>,
}

/// Command and perception inputs fed to the agent each tick.
#[derive(Component, Debug, Clone, Default)]
pub struct AgentDirective {
    /// Position of the assigned target.
    pub target: Option<Point2<f64>>,
    /// Name of the assigned target.
    pub target_name: Option<String>,
    /// When set, overrides every vision command (mission over).
    pub halt: bool,
}
