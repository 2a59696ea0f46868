use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Seeker: a headless two-room maze search simulator.
///
/// Runs one agent against a scenario file: targets, mission text, vision
/// service behavior and tuning parameters all come from the TOML.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Scenario TOML: maze, agent, vision service, mission and targets.
    #[arg(short, long, default_value = "assets/scenarios/00_two_targets.toml")]
    pub scenario: PathBuf,

    /// Step the simulation as fast as possible instead of in real time.
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Overrides the scenario's RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the effective agent parameters as TOML and exit.
    #[arg(long, default_value_t = false)]
    pub print_params: bool,
}
