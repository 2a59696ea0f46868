// seeker_core/src/params.rs

//! Tunable constants for every subsystem of the seeker.
//!
//! All structs deserialize with per-field defaults, so a scenario file only
//! needs to list the values it wants to change.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{SeekerError, SeekerResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeekerParams {
    pub physics: PhysicsParams,
    pub collision: CollisionParams,
    pub pathfinding: PathfindingParams,
    pub exploration: ExplorationParams,
    pub view: ViewParams,
    pub mission: MissionParams,
}

impl SeekerParams {
    /// Rejects parameter sets that would break the integrator's bounds.
    pub fn validate(&self) -> SeekerResult<()> {
        let p = &self.physics;
        positive("physics.mass", p.mass)?;
        positive("physics.max_speed", p.max_speed)?;
        positive("physics.max_angular_speed", p.max_angular_speed)?;
        positive("physics.brake_gain", p.brake_gain)?;
        positive("physics.stop_epsilon", p.stop_epsilon)?;
        if p.scan_rate.abs() > p.max_angular_speed {
            return Err(SeekerError::InvalidParameter {
                name: "physics.scan_rate",
                reason: format!("exceeds max_angular_speed ({})", p.max_angular_speed),
            });
        }
        if p.pathfinding_max_speed < p.max_speed {
            return Err(SeekerError::InvalidParameter {
                name: "physics.pathfinding_max_speed",
                reason: "must not be below max_speed".to_string(),
            });
        }
        if self.collision.rebound_speed > p.max_speed {
            return Err(SeekerError::InvalidParameter {
                name: "collision.rebound_speed",
                reason: format!("exceeds max_speed ({})", p.max_speed),
            });
        }
        positive("collision.agent_radius", self.collision.agent_radius)?;
        positive("pathfinding.waypoint_threshold", self.pathfinding.waypoint_threshold)?;
        positive("exploration.forward_duration", self.exploration.forward_duration)?;
        positive("exploration.turn_duration", self.exploration.turn_duration)?;
        if !(0.0..=1.0).contains(&self.mission.confidence_threshold) {
            return Err(SeekerError::InvalidParameter {
                name: "mission.confidence_threshold",
                reason: "must lie in [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> SeekerResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SeekerError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsParams {
    pub mass: f64,
    /// Top forward speed in normal driving (units/s).
    pub max_speed: f64,
    /// Raised speed cap while traversing a pathfinding route.
    pub pathfinding_max_speed: f64,
    /// Bound on the thrust force the controller may apply.
    pub max_thrust: f64,
    /// Proportional gain from speed error to thrust.
    pub accel_gain: f64,
    /// Quadratic drag coefficient.
    pub drag: f64,
    /// Desired speed per unit of distance to the target.
    pub approach_gain: f64,
    pub min_approach_speed: f64,
    /// Passive forward decay rate (1/s).
    pub passive_decay: f64,
    /// Forward decay rate while turning (1/s). Larger than `passive_decay`.
    pub turn_speed_decay: f64,
    pub angular_accel: f64,
    pub angular_drag: f64,
    pub max_angular_speed: f64,
    /// Fixed yaw rate while scanning.
    pub scan_rate: f64,
    pub brake_gain: f64,
    /// Speeds below this snap to exactly zero when braking.
    pub stop_epsilon: f64,
    /// No-target profile: forward cruise speed.
    pub cruise_speed: f64,
    /// No-target profile: forward creep while turning.
    pub turn_creep_speed: f64,
    /// No-target profile: first-order lag rate (1/s).
    pub lag_rate: f64,
    /// Fraction of speed kept when the boundary clamp engages.
    pub boundary_speed_retention: f64,
    /// Yaw rate added towards the interior when the boundary clamp engages.
    pub boundary_nudge: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_speed: 4.0,
            pathfinding_max_speed: 6.0,
            max_thrust: 8.0,
            accel_gain: 2.5,
            drag: 0.05,
            approach_gain: 0.8,
            min_approach_speed: 0.5,
            passive_decay: 1.5,
            turn_speed_decay: 3.0,
            angular_accel: 4.0,
            angular_drag: 1.5,
            max_angular_speed: 2.0,
            scan_rate: 0.6,
            brake_gain: 6.0,
            stop_epsilon: 0.01,
            cruise_speed: 2.5,
            turn_creep_speed: 0.3,
            lag_rate: 3.0,
            boundary_speed_retention: 0.5,
            boundary_nudge: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollisionParams {
    pub agent_radius: f64,
    pub obstacle_radius: f64,
    /// Distance from the outer wall at which a boundary contact registers.
    pub boundary_margin: f64,
    pub rebound_speed: f64,
    /// Multiplier applied to the yaw rate on contact (0 = kill all spin).
    pub angular_damping: f64,
    /// Seconds during which further contacts are ignored.
    pub cooldown: f64,
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self {
            agent_radius: 0.5,
            obstacle_radius: 0.8,
            boundary_margin: 1.0,
            rebound_speed: 1.5,
            angular_damping: 0.2,
            cooldown: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathfindingParams {
    /// Scan rotation (rad) that triggers a route to the other half.
    pub trigger_rotation: f64,
    pub waypoint_threshold: f64,
    pub heading_tolerance: f64,
}

impl Default for PathfindingParams {
    fn default() -> Self {
        Self {
            trigger_rotation: TAU,
            waypoint_threshold: 1.0,
            heading_tolerance: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorationParams {
    /// Total rotation (rad) without a target that starts exploring.
    pub trigger_rotation: f64,
    pub forward_duration: f64,
    pub turn_duration: f64,
    /// Heading change aimed for during one turn phase (rad).
    pub turn_angle: f64,
}

impl Default for ExplorationParams {
    fn default() -> Self {
        Self {
            trigger_rotation: TAU,
            forward_duration: 3.0,
            turn_duration: 1.2,
            turn_angle: 120f64.to_radians(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewParams {
    /// Builds without a rear camera pair set this to false.
    pub rear_view_enabled: bool,
    pub switch_cooldown: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            rear_view_enabled: true,
            switch_cooldown: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissionParams {
    /// Detection confidence a STOP report must exceed to complete a step.
    pub confidence_threshold: f64,
}

impl Default for MissionParams {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.8,
        }
    }
}
