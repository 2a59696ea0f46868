// seeker_core/src/exploration.rs

//! Idle search used while no target is assigned: drive straight for a while,
//! turn by roughly a third of a circle, repeat.

use serde::{Deserialize, Serialize};

use crate::params::ExplorationParams;
use crate::types::NavigationCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorePhase {
    Forward,
    Turn,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationController {
    phase: ExplorePhase,
    /// Seconds spent in the current phase.
    elapsed: f64,
}

/// What the controller wants this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExploreStep {
    pub command: NavigationCommand,
    /// Yaw rate to hold during the turn phase.
    pub yaw_rate: Option<f64>,
}

impl Default for ExplorationController {
    fn default() -> Self {
        Self {
            phase: ExplorePhase::Forward,
            elapsed: 0.0,
        }
    }
}

impl ExplorationController {
    pub fn phase(&self) -> ExplorePhase {
        self.phase
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances the phase clock by `dt` and returns the command for this tick.
    pub fn step(&mut self, dt: f64, params: &ExplorationParams) -> ExploreStep {
        self.elapsed += dt.max(0.0);
        let limit = match self.phase {
            ExplorePhase::Forward => params.forward_duration,
            ExplorePhase::Turn => params.turn_duration,
        };
        if self.elapsed >= limit {
            self.elapsed -= limit;
            self.phase = match self.phase {
                ExplorePhase::Forward => ExplorePhase::Turn,
                ExplorePhase::Turn => ExplorePhase::Forward,
            };
        }

        match self.phase {
            ExplorePhase::Forward => ExploreStep {
                command: NavigationCommand::Forward,
                yaw_rate: None,
            },
            ExplorePhase::Turn => ExploreStep {
                command: NavigationCommand::Left,
                yaw_rate: Some(params.turn_angle / params.turn_duration),
            },
        }
    }
}
