// seeker_sim/src/simulation/plugins/agent.rs

//! Drives each agent's core tick from its directive and latest vision answer.

use nalgebra::Point2;

use crate::prelude::*;
use crate::simulation::core::{
    components::{AgentDirective, SeekerAgent, Target},
    events::TickReportEvent,
    simulation_setup::SimulationClock,
};
use crate::simulation::plugins::vision::VisionLink;

pub struct AgentPlugin;

impl Plugin for AgentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, seeker_tick_system.in_set(SimulationSet::Control));
    }
}

/// The command the agent acts on when vision has nothing to say yet.
fn fallback_command(directive: &AgentDirective) -> NavigationCommand {
    if directive.halt {
        NavigationCommand::Stop
    } else {
        NavigationCommand::Scan
    }
}

fn seeker_tick_system(
    time: Res<Time>,
    clock: Res<SimulationClock>,
    targets: Query<&Target>,
    mut agents: Query<(Entity, &mut SeekerAgent, &AgentDirective, &mut VisionLink)>,
    mut reports: EventWriter<TickReportEvent>,
) {
    let dt = time.delta_secs_f64();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut agent, directive, mut link) in &mut agents {
        // Everything except the assigned target is something to bump into.
        let obstacles: Vec<Point2<f64>> = targets
            .iter()
            .filter(|t| directive.target_name.as_deref() != Some(t.name.as_str()))
            .map(|t| t.position)
            .collect();

        let (command, target_visible) = match (directive.halt, link.latest()) {
            (false, Some(response)) => (response.action, response.target_visible),
            _ => (fallback_command(directive), false),
        };

        let input = TickInput {
            command,
            target: if directive.halt { None } else { directive.target },
            target_visible,
            view_request: link.take_view_request(),
            obstacles: &obstacles,
        };
        let report = agent.0.tick(&input, dt);

        // Answers computed for the other camera pair no longer apply.
        if report.view_switched {
            link.reset();
        }

        reports.write(TickReportEvent {
            agent: AgentHandle::from_entity(entity),
            timestamp: clock.0,
            report,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halted_agents_stop_and_others_scan() {
        let mut directive = AgentDirective::default();
        assert_eq!(fallback_command(&directive), NavigationCommand::Scan);
        directive.halt = true;
        assert_eq!(fallback_command(&directive), NavigationCommand::Stop);
    }
}
