// seeker_sim/src/simulation/config/mod.rs

//! Loading and validating the scenario, and resolving its targets against
//! the prefab catalog.

mod catalog;
mod resolver;

pub mod structs;

use bevy::prelude::*;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use seeker_core::error::SeekerError;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::prelude::AppState;
pub use catalog::{load_catalog_from_disk, PrefabCatalog};
pub use resolver::resolve_target;
pub use structs::{ScenarioConfig, TargetConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("scenario file {0:?} does not exist")]
    MissingScenario(PathBuf),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error("prefab '{0}' not found in catalog")]
    UnknownPrefab(String),

    #[error("prefab '{key}' is malformed: {source}")]
    InvalidPrefab {
        key: String,
        source: Box<figment::Error>,
    },

    #[error("target at {0:?} has no name and no prefab")]
    UnnamedTarget([f64; 2]),

    #[error("invalid agent parameters: {0}")]
    Params(#[from] SeekerError),

    #[error("{0}")]
    Invalid(String),
}

/// Reads the scenario at `path`. A `seed` given on the command line replaces
/// the file's.
pub fn load_scenario(path: &Path, seed: Option<u64>) -> Result<ScenarioConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingScenario(path.to_path_buf()));
    }
    let mut config: ScenarioConfig = Figment::new()
        .merge(Toml::file(path))
        .extract()
        .map_err(Box::new)?;
    if seed.is_some() {
        config.simulation.seed = seed;
    }
    validate(&config)?;
    Ok(config)
}

/// Same as [`load_scenario`] for a TOML string.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, ConfigError> {
    let config: ScenarioConfig = Figment::new()
        .merge(Toml::string(toml))
        .extract()
        .map_err(Box::new)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ScenarioConfig) -> Result<(), ConfigError> {
    config.agent.params.validate()?;

    let sim = &config.simulation;
    if sim.tick_hz <= 0.0 || sim.duration_seconds <= 0.0 || sim.status_interval_seconds <= 0.0 {
        return Err(ConfigError::Invalid(
            "simulation tick_hz, duration_seconds and status_interval_seconds must be positive".into(),
        ));
    }
    let vision = &config.vision;
    if !(0.0..=1.0).contains(&vision.failure_probability) {
        return Err(ConfigError::Invalid(format!(
            "vision.failure_probability {} is outside [0, 1]",
            vision.failure_probability
        )));
    }
    if vision.interval_seconds < 0.0
        || vision.latency_seconds < 0.0
        || vision.distance_noise_stddev < 0.0
        || vision.angle_noise_stddev_deg < 0.0
    {
        return Err(ConfigError::Invalid("vision timings and noise must not be negative".into()));
    }
    let start = config.agent.start;
    if !config.maze.contains(&nalgebra::Point2::new(start.x, start.z)) {
        return Err(ConfigError::Invalid(format!(
            "agent start ({}, {}) is outside the maze",
            start.x, start.z
        )));
    }
    Ok(())
}

/// Targets that survived resolution, in scenario order.
#[derive(Resource, Default, Debug)]
pub struct ResolvedTargets(pub Vec<TargetConfig>);

impl ResolvedTargets {
    /// Target names, used as the mission vocabulary.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|t| t.name.clone()).collect()
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ResolvedTargets>()
            .init_resource::<PrefabCatalog>()
            .add_systems(
                OnEnter(AppState::AssetLoading),
                (
                    load_catalog_from_disk,
                    resolve_scenario_targets,
                    transition_to_scene_building,
                )
                    .chain(),
            );
    }
}

fn resolve_scenario_targets(
    config: Res<ScenarioConfig>,
    catalog: Res<PrefabCatalog>,
    mut resolved: ResMut<ResolvedTargets>,
) {
    for spec in &config.targets {
        match resolve_target(spec, &catalog) {
            Ok(target) if resolved.0.iter().any(|t| t.name == target.name) => {
                warn!("[CONFIG] Duplicate target '{}' skipped.", target.name);
            }
            Ok(target) => {
                info!(
                    "[CONFIG] Target '{}' at ({:.1}, {:.1}), radius {:.2}",
                    target.name, target.position[0], target.position[1], target.radius
                );
                resolved.0.push(target);
            }
            Err(e) => error!("[CONFIG] {}. Skipping target.", e),
        }
    }
}

fn transition_to_scene_building(mut next_state: ResMut<NextState<AppState>>) {
    info!("[CONFIG] Configuration resolved. Building scene.");
    next_state.set(AppState::SceneBuilding);
}
