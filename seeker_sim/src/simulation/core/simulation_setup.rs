// seeker_sim/src/simulation/core/simulation_setup.rs

use nalgebra::Point2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::prelude::*;
use crate::simulation::config::ResolvedTargets;
use crate::simulation::core::components::{AgentDirective, SeekerAgent, Target};
use crate::simulation::core::events::{RunFinished, TickReportEvent, VisionResultEvent};
use crate::simulation::core::prng::SimulationRng;

/// Simulated seconds since the scene started running.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimulationClock(pub f64);

pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .cloned()
            .unwrap_or_else(|| {
                warn!("[SETUP] No scenario inserted, running with defaults.");
                ScenarioConfig::default()
            });

        // --- Deterministic PRNG ---
        let rng = match config.simulation.seed {
            Some(seed) => {
                info!("[SETUP] Seeding simulation RNG with {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        };
        app.insert_resource(SimulationRng(rng));

        app.init_resource::<SimulationClock>()
            .add_event::<VisionResultEvent>()
            .add_event::<TickReportEvent>()
            .add_event::<RunFinished>()
            .insert_resource(Time::<Fixed>::from_hz(config.simulation.tick_hz));

        // --- Spawning pipeline ---
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::World,
                SceneBuildSet::Agent,
                SceneBuildSet::Perception,
                SceneBuildSet::Mission,
                SceneBuildSet::Finalize,
            )
                .chain(),
        );
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (
                spawn_targets.in_set(SceneBuildSet::World),
                spawn_agent.in_set(SceneBuildSet::Agent),
                transition_to_running.in_set(SceneBuildSet::Finalize),
            ),
        );
        app.add_systems(OnEnter(AppState::Finished), exit_with_outcome);

        // --- Runtime data flow ---
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Perception,
                SimulationSet::Behavior,
                SimulationSet::Control,
                SimulationSet::Validation,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );
        app.add_systems(
            FixedUpdate,
            (
                advance_clock
                    .in_set(SimulationSet::Perception)
                    .before(SimulationClockSet),
                (enforce_duration, finish_run)
                    .chain()
                    .in_set(SimulationSet::Validation),
            ),
        );
        app.configure_sets(
            FixedUpdate,
            SimulationClockSet.in_set(SimulationSet::Perception),
        );
    }
}

/// Perception systems that read the clock run in this set, after it ticks.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationClockSet;

fn spawn_targets(mut commands: Commands, targets: Res<ResolvedTargets>) {
    for target in &targets.0 {
        info!("[SPAWN] Placing target '{}'", target.name);
        commands.spawn((
            Name::new(target.name.clone()),
            Target {
                name: target.name.clone(),
                radius: target.radius,
                position: Point2::new(target.position[0], target.position[1]),
            },
        ));
    }
}

fn spawn_agent(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut app_exit: EventWriter<AppExit>,
) {
    let agent = &config.agent;
    let name = if agent.name.is_empty() { "seeker" } else { agent.name.as_str() };
    let pose = agent.start.to_pose();

    match Seeker::new(agent.params.clone(), config.maze.clone(), pose) {
        Ok(seeker) => {
            info!(
                "[SPAWN] Agent '{}' at ({:.1}, {:.1}), heading {:.0} deg, in the {:?} half",
                name,
                pose.position.x,
                pose.position.z,
                pose.heading.to_degrees(),
                MazeHalf::of(&pose.ground()),
            );
            commands.spawn((
                Name::new(name.to_string()),
                SeekerAgent(seeker),
                AgentDirective::default(),
            ));
        }
        Err(e) => {
            error!("[SPAWN] Cannot create agent '{}': {}", name, e);
            app_exit.write(AppExit::error());
        }
    }
}

fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("[SETUP] Scene building complete. Transitioning to Running state.");
    next_state.set(AppState::Running);
}

fn advance_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.0 += time.delta_secs_f64();
}

fn enforce_duration(
    clock: Res<SimulationClock>,
    config: Res<ScenarioConfig>,
    mut finished: EventWriter<RunFinished>,
) {
    if clock.0 >= config.simulation.duration_seconds {
        finished.write(RunFinished::OutOfTime);
    }
}

/// How the run ended, turned into the process exit code on `Finished`.
#[derive(Resource, Debug, Clone)]
pub struct RunOutcome(pub AppExit);

/// Ends the run on the first `RunFinished` event.
fn finish_run(
    mut commands: Commands,
    mut events: EventReader<RunFinished>,
    clock: Res<SimulationClock>,
    decided: Option<Res<RunOutcome>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    // Fixed steps left in the current frame still see `Running`.
    if decided.is_some() {
        events.clear();
        return;
    }
    let Some(reason) = events.read().next() else {
        return;
    };
    let exit = match reason {
        RunFinished::MissionCompleted => {
            info!("[RUN] Mission completed after {:.1}s.", clock.0);
            AppExit::Success
        }
        RunFinished::MissionFailed(why) => {
            error!("[RUN] Mission failed after {:.1}s: {}", clock.0, why);
            AppExit::error()
        }
        RunFinished::OutOfTime => {
            warn!("[RUN] Simulation duration reached at {:.1}s.", clock.0);
            AppExit::error()
        }
    };
    events.clear();
    commands.insert_resource(RunOutcome(exit));
    next_state.set(AppState::Finished);
}

fn exit_with_outcome(outcome: Option<Res<RunOutcome>>, mut app_exit: EventWriter<AppExit>) {
    let exit = outcome.map(|o| o.0.clone()).unwrap_or_else(AppExit::error);
    app_exit.write(exit);
}
