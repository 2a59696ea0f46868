// seeker_sim/src/simulation/config/structs.rs

//! Serde mirror of a scenario TOML file.

use bevy::prelude::Resource;
use serde::Deserialize;
use std::path::PathBuf;

use seeker_core::maze::MazeLayout;
use seeker_core::params::SeekerParams;
use seeker_core::types::AgentPose;
use seeker_core::vision::StereoCameraModel;

#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub maze: MazeLayout,
    pub agent: AgentConfig,
    pub vision: VisionConfig,
    pub mission: MissionConfig,
    pub targets: Vec<TargetSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Hard stop for the whole run, in simulated seconds.
    pub duration_seconds: f64,
    pub tick_hz: f64,
    /// Root of the target prefab catalog.
    pub catalog_dir: PathBuf,
    /// Seconds between two status lines.
    pub status_interval_seconds: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: 300.0,
            tick_hz: 60.0,
            catalog_dir: PathBuf::from("assets/catalog"),
            status_interval_seconds: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub name: String,
    pub start: StartPose,
    pub params: SeekerParams,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartPose {
    pub x: f64,
    pub z: f64,
    pub heading_deg: f64,
}

impl StartPose {
    pub fn to_pose(&self) -> AgentPose {
        AgentPose::new(self.x, self.z, self.heading_deg.to_radians())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Stereo,
    BoundingBox,
}

/// How the simulated vision service behaves.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisionConfig {
    pub policy: PolicyKind,
    pub interval_seconds: f64,
    /// Delay between capture and answer.
    pub latency_seconds: f64,
    /// Chance that a request fails outright.
    pub failure_probability: f64,
    pub distance_noise_stddev: f64,
    pub angle_noise_stddev_deg: f64,
    pub camera: StereoCameraModel,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Stereo,
            interval_seconds: 0.6,
            latency_seconds: 0.25,
            failure_probability: 0.0,
            distance_noise_stddev: 0.05,
            angle_noise_stddev_deg: 1.0,
            camera: StereoCameraModel::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissionConfig {
    pub text: String,
    /// Stand-in for the language model's answer. When absent the text is
    /// parsed with keyword matching.
    pub planned_targets: Option<Vec<String>>,
    pub timeout_seconds: f64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            planned_targets: None,
            timeout_seconds: 240.0,
        }
    }
}

/// A target as written in the scenario: a catalog reference plus
/// placement and optional overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    /// Catalog key, e.g. `targets.red_cube`.
    pub from: Option<String>,
    pub name: Option<String>,
    pub radius: Option<f64>,
    /// Ground position `[x, z]`.
    pub position: [f64; 2],
}

/// The fields a catalog prefab provides.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetPrefab {
    pub name: String,
    #[serde(default = "default_target_radius")]
    pub radius: f64,
    #[serde(default)]
    pub description: String,
}

fn default_target_radius() -> f64 {
    0.5
}

/// A fully resolved target, ready to spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetConfig {
    pub name: String,
    pub radius: f64,
    pub position: [f64; 2],
}
