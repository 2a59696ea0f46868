// seeker_sim/src/main.rs

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;

use seeker_sim::cli::Cli;
use seeker_sim::prelude::*;
use seeker_sim::simulation::config::load_scenario;
use seeker_sim::SeekerSimulationPlugin;

fn main() -> AppExit {
    let cli = Cli::parse();
    let mut app = App::new();

    // Logging first, so configuration errors are reported through it.
    app.add_plugins(LogPlugin {
        level: bevy::log::Level::DEBUG,
        // Our crates at debug, everything else at info.
        filter: "info,seeker_sim=debug,seeker_core=debug".to_string(),
        ..Default::default()
    });

    let scenario = match load_scenario(&cli.scenario, cli.seed) {
        Ok(scenario) => {
            info!("Successfully loaded scenario from {:?}", cli.scenario);
            scenario
        }
        Err(e) => {
            error!("Cannot load scenario {:?}: {}", cli.scenario, e);
            return AppExit::error();
        }
    };

    if cli.print_params {
        return match toml::to_string_pretty(&scenario.agent.params) {
            Ok(text) => {
                println!("{text}");
                AppExit::Success
            }
            Err(e) => {
                error!("Cannot serialize agent parameters: {}", e);
                AppExit::error()
            }
        };
    }

    let step = Duration::from_secs_f64(1.0 / scenario.simulation.tick_hz);
    if cli.headless {
        // One fixed step per frame, frames back to back.
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)))
            .insert_resource(TimeUpdateStrategy::ManualDuration(step));
    } else {
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(step)));
    }

    app.add_plugins(StatesPlugin)
        .insert_resource(scenario)
        .insert_resource(cli)
        .init_state::<AppState>()
        .add_plugins(SeekerSimulationPlugin);

    app.run()
}
