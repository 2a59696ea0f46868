// seeker_core/src/types.rs

use nalgebra::{Point2, Point3, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::angles::wrap_angle;

// --- Core Identifier ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AgentHandle(pub u64);

impl AgentHandle {
    /// Tags a report with the simulator entity that produced it.
    #[cfg(feature = "bevy")]
    pub fn from_entity(entity: bevy_ecs::prelude::Entity) -> Self {
        Self(entity.to_bits())
    }

    #[cfg(feature = "bevy")]
    pub fn to_entity(self) -> bevy_ecs::prelude::Entity {
        bevy_ecs::prelude::Entity::from_bits(self.0)
    }
}

// =========================================================================
// == Navigation Command ==
// =========================================================================

/// The single per-tick steering command.
///
/// The wire format is the upper-case word used by the vision service
/// (`"FORWARD"`, `"LEFT"`, ...). Anything unrecognized parses as `Idle`,
/// which the integrator treats as "decay everything".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NavigationCommand {
    Forward,
    Left,
    Right,
    Stop,
    Scan,
    #[default]
    Idle,
}

impl NavigationCommand {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FORWARD" => Self::Forward,
            "LEFT" => Self::Left,
            "RIGHT" => Self::Right,
            "STOP" => Self::Stop,
            "SCAN" => Self::Scan,
            _ => Self::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "FORWARD",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Stop => "STOP",
            Self::Scan => "SCAN",
            Self::Idle => "IDLE",
        }
    }

    /// Sign of the rotation this command asks for: `+1` for LEFT, `-1` for RIGHT.
    pub fn turn_sign(&self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
            _ => 0.0,
        }
    }
}

impl From<String> for NavigationCommand {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<NavigationCommand> for String {
    fn from(value: NavigationCommand) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NavigationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================================
// == Agent State ==
// =========================================================================

/// Position and heading of the agent.
///
/// The ground plane is (x, z): `x` is the lateral coordinate and `z` the depth
/// coordinate. The agent faces its local -z axis, so "forward" at heading
/// `h` is the world direction `(-sin h, -cos h)`. Positive heading change
/// turns the agent to its left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentPose {
    pub position: Point3<f64>,
    pub heading: f64,
}

impl Default for AgentPose {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            heading: 0.0,
        }
    }
}

impl AgentPose {
    pub fn new(x: f64, z: f64, heading: f64) -> Self {
        Self {
            position: Point3::new(x, 0.0, z),
            heading: wrap_angle(heading),
        }
    }

    /// The (x, z) projection of the position.
    pub fn ground(&self) -> Point2<f64> {
        Point2::new(self.position.x, self.position.z)
    }

    pub fn set_ground(&mut self, p: Point2<f64>) {
        self.position.x = p.x;
        self.position.z = p.y;
    }

    /// Unit vector the agent moves along when driving forward.
    pub fn forward(&self) -> Vector2<f64> {
        heading_direction(self.heading)
    }

    /// Moves the agent along its facing direction by `distance`
    /// (negative distances move it backwards).
    pub fn translate_forward(&mut self, distance: f64) {
        let step = self.forward() * distance;
        self.position.x += step.x;
        self.position.z += step.y;
    }

    pub fn rotate(&mut self, delta: f64) {
        self.heading = wrap_angle(self.heading + delta);
    }
}

/// World direction for a heading.
pub fn heading_direction(heading: f64) -> Vector2<f64> {
    Vector2::new(-heading.sin(), -heading.cos())
}

/// Heading that faces along `direction`. Inverse of [`heading_direction`].
pub fn heading_towards(direction: &Vector2<f64>) -> f64 {
    (-direction.x).atan2(-direction.y)
}

/// Transient motion state, recomputed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentKinematics {
    /// Forward speed, always in `[0, max_speed]`.
    pub velocity: f64,
    /// Yaw rate in rad/s, positive turns left.
    pub angular_velocity: f64,
    /// Forward acceleration applied on the last tick.
    pub acceleration: f64,
}

impl AgentKinematics {
    pub fn halt(&mut self) {
        *self = Self::default();
    }
}
