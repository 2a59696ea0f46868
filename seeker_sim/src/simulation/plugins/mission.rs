// seeker_sim/src/simulation/plugins/mission.rs

use crate::prelude::*;
use crate::simulation::config::ResolvedTargets;
use crate::simulation::core::{
    components::{AgentDirective, Target},
    events::{RunFinished, VisionResultEvent},
    simulation_setup::SimulationClock,
};
use crate::simulation::plugins::vision::VisionLink;

use seeker_core::mission::PlanSource;

/// Replays a fixed answer, standing in for the language-model planner. An
/// empty answer is reported the way an unreachable planner would be.
#[derive(Debug, Clone)]
pub struct ScriptedPlanner(pub Vec<String>);

impl MissionPlanner for ScriptedPlanner {
    fn plan(&self, text: &str, _vocabulary: &[String]) -> SeekerResult<Vec<String>> {
        if self.0.is_empty() {
            return Err(SeekerError::Planner(format!("no answer scripted for {text:?}")));
        }
        Ok(self.0.clone())
    }
}

/// The running mission.
#[derive(Resource, Debug)]
pub struct MissionState {
    pub plan: MissionPlan,
    pub timeout: f64,
}

pub struct MissionPlugin;

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            plan_scenario_mission.in_set(SceneBuildSet::Mission),
        )
        .add_systems(
            FixedUpdate,
            (advance_mission, enforce_mission_timeout)
                .chain()
                .in_set(SimulationSet::Behavior),
        );
    }
}

/// Builds the plan from the scenario's mission text and assigns the first
/// target.
fn plan_scenario_mission(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    targets: Res<ResolvedTargets>,
    placed: Query<&Target>,
    mut agents: Query<&mut AgentDirective>,
    mut app_exit: EventWriter<AppExit>,
) {
    let vocabulary = targets.names();
    let scripted = config.mission.planned_targets.clone().map(ScriptedPlanner);
    let planner = scripted.as_ref().map(|p| p as &dyn MissionPlanner);

    let planned = match plan_mission(planner, &config.mission.text, &vocabulary) {
        Ok(planned) => planned,
        Err(e) => {
            error!("[MISSION] Cannot plan mission: {}", e);
            app_exit.write(AppExit::error());
            return;
        }
    };
    match planned.source {
        PlanSource::Planner => info!("[MISSION] Planner answered: {:?}", planned.targets),
        PlanSource::Keywords => info!("[MISSION] Keyword match: {:?}", planned.targets),
        PlanSource::Default => warn!(
            "[MISSION] Nothing in {:?} names a target, defaulting to {:?}",
            config.mission.text, planned.targets
        ),
    }

    let mut plan = match MissionPlan::new(planned.targets, config.agent.params.mission.confidence_threshold) {
        Ok(plan) => plan,
        Err(e) => {
            error!("[MISSION] {}", e);
            app_exit.write(AppExit::error());
            return;
        }
    };
    let first = plan.start().map(str::to_string);
    for mut directive in &mut agents {
        assign(&mut directive, first.as_deref(), &placed);
    }
    if let Some(name) = &first {
        info!("[MISSION] Step 1/{}: find '{}'", plan.steps().len(), name);
    }

    commands.insert_resource(MissionState {
        plan,
        timeout: config.mission.timeout_seconds,
    });
}

fn assign(directive: &mut AgentDirective, name: Option<&str>, placed: &Query<&Target>) {
    directive.target_name = name.map(str::to_string);
    directive.target = name.and_then(|n| placed.iter().find(|t| t.name == n).map(|t| t.position));
}

/// Feeds accepted vision answers to the plan.
fn advance_mission(
    mut results: EventReader<VisionResultEvent>,
    mission: Option<ResMut<MissionState>>,
    placed: Query<&Target>,
    mut agents: Query<(&mut AgentDirective, &mut VisionLink)>,
    mut finished: EventWriter<RunFinished>,
) {
    let Some(mut mission) = mission else {
        results.clear();
        return;
    };

    for event in results.read() {
        match mission.plan.report(&event.response) {
            MissionEvent::Ignored => {}
            MissionEvent::Advanced { reached, next } => {
                let step = mission.plan.current_index() + 1;
                info!(
                    "[MISSION] Reached '{}' (confidence {:.2}). Step {}/{}: find '{}'",
                    reached,
                    event.response.confidence,
                    step,
                    mission.plan.steps().len(),
                    next
                );
                for (mut directive, mut link) in &mut agents {
                    assign(&mut directive, Some(&next), &placed);
                    link.reset();
                }
            }
            MissionEvent::Completed { reached } => {
                info!("[MISSION] Reached '{}'. All targets found.", reached);
                for (mut directive, mut link) in &mut agents {
                    assign(&mut directive, None, &placed);
                    directive.halt = true;
                    link.reset();
                }
                finished.write(RunFinished::MissionCompleted);
            }
        }
    }
}

fn enforce_mission_timeout(
    clock: Res<SimulationClock>,
    mission: Option<ResMut<MissionState>>,
    mut agents: Query<&mut AgentDirective>,
    mut finished: EventWriter<RunFinished>,
) {
    let Some(mut mission) = mission else {
        return;
    };
    if mission.plan.status() != MissionStatus::Active || clock.0 < mission.timeout {
        return;
    }

    let reason = format!(
        "timed out after {:.0}s looking for '{}'",
        mission.timeout,
        mission.plan.current_target().unwrap_or("?")
    );
    mission.plan.fail(reason.clone());
    for mut directive in &mut agents {
        directive.halt = true;
    }
    finished.write(RunFinished::MissionFailed(reason));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_planner_answer_wins_over_keywords() {
        let vocabulary = vec!["Red Cube".to_string(), "Green Cone".to_string()];
        let planner = ScriptedPlanner(vec!["Green Cone".into(), "Red Cube".into()]);
        let planned = plan_mission(Some(&planner), "find the red cube", &vocabulary).unwrap();
        assert_eq!(planned.source, PlanSource::Planner);
        assert_eq!(planned.targets, vec!["Green Cone", "Red Cube"]);
    }

    #[test]
    fn empty_scripted_answer_falls_back_to_keywords() {
        let vocabulary = vec!["Red Cube".to_string(), "Green Cone".to_string()];
        let planner = ScriptedPlanner(vec![]);
        assert!(matches!(
            planner.plan("find the cone", &vocabulary),
            Err(SeekerError::Planner(_))
        ));
        let planned = plan_mission(Some(&planner), "find the cone", &vocabulary).unwrap();
        assert_eq!(planned.source, PlanSource::Keywords);
        assert_eq!(planned.targets, vec!["Green Cone"]);
    }
}
