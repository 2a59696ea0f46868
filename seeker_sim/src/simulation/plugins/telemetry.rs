// seeker_sim/src/simulation/plugins/telemetry.rs

//! The render/UI sink of a headless run: everything the agent reports ends
//! up in the log.

use std::time::Duration;

use crate::prelude::*;
use crate::simulation::core::events::TickReportEvent;

/// Running totals, printed when the run ends.
#[derive(Resource, Debug, Default)]
pub struct RunStats {
    pub ticks: u64,
    pub collisions: u64,
    pub view_switches: u64,
    pub pathfinding_runs: u64,
    pub explorations: u64,
    pub distance: f64,
    last_position: Option<(f64, f64)>,
}

impl RunStats {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.collisions += report.collided as u64;
        self.view_switches += report.view_switched as u64;
        for t in &report.transitions {
            match t {
                Transition::StartPathfinding => self.pathfinding_runs += 1,
                Transition::StartExploring => self.explorations += 1,
                _ => {}
            }
        }
        let here = (report.pose.position.x, report.pose.position.z);
        if let Some((x, z)) = self.last_position {
            self.distance += ((here.0 - x).powi(2) + (here.1 - z).powi(2)).sqrt();
        }
        self.last_position = Some(here);
    }
}

#[derive(Resource)]
struct StatusTimer(Timer);

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        let interval = app
            .world()
            .get_resource::<ScenarioConfig>()
            .map(|c| c.simulation.status_interval_seconds)
            .unwrap_or(2.0);

        app.init_resource::<RunStats>()
            .insert_resource(StatusTimer(Timer::new(
                Duration::from_secs_f64(interval),
                TimerMode::Repeating,
            )))
            .add_systems(
                FixedUpdate,
                log_tick_reports.in_set(SimulationSet::Validation),
            )
            .add_systems(OnEnter(AppState::Finished), log_run_summary);
    }
}

fn log_tick_reports(
    time: Res<Time>,
    mut timer: ResMut<StatusTimer>,
    mut stats: ResMut<RunStats>,
    mut reports: EventReader<TickReportEvent>,
) {
    timer.0.tick(time.delta());
    let status_due = timer.0.just_finished();

    for TickReportEvent {
        timestamp, report, ..
    } in reports.read()
    {
        stats.record(report);

        for t in &report.transitions {
            match t {
                Transition::StartPathfinding => info!(
                    "[AGENT] t={:.1}s full scan without a sighting, crossing to the other half",
                    timestamp
                ),
                Transition::StartExploring => {
                    info!("[AGENT] t={:.1}s no target assigned, exploring", timestamp)
                }
                Transition::ToReactive(reason) => {
                    info!("[AGENT] t={:.1}s back to reactive ({:?})", timestamp, reason)
                }
                Transition::Stay => {}
            }
        }
        if let Some(contact) = &report.contact {
            info!(
                "[AGENT] t={:.1}s collision with {:?} at ({:.2}, {:.2})",
                timestamp, contact, report.pose.position.x, report.pose.position.z
            );
        }
        if report.view_switched {
            info!(
                "[AGENT] t={:.1}s steering with the {} camera pair",
                timestamp,
                if report.rear_view { "rear" } else { "front" }
            );
        }

        if status_due {
            info!(
                "[STATUS] t={:.1}s pos=({:.2}, {:.2}) heading={:.0}deg v={:.2} w={:.2} mode={} cmd={}{}",
                timestamp,
                report.pose.position.x,
                report.pose.position.z,
                report.pose.heading.to_degrees(),
                report.kinematics.velocity,
                report.kinematics.angular_velocity,
                report.mode,
                report.applied_command,
                report
                    .waypoint
                    .map(|w| format!(" waypoint=({:.1}, {:.1})", w.x, w.y))
                    .unwrap_or_default()
            );
        }
    }
}

fn log_run_summary(stats: Res<RunStats>) {
    info!(
        "[SUMMARY] {} ticks, {:.1} units travelled, {} collisions, {} view switches, {} crossings, {} explorations",
        stats.ticks,
        stats.distance,
        stats.collisions,
        stats.view_switches,
        stats.pathfinding_runs,
        stats.explorations
    );
}
