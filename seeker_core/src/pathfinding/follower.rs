// seeker_core/src/pathfinding/follower.rs

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::planner::Route;
use crate::params::PathfindingParams;
use crate::types::{heading_towards, AgentPose, NavigationCommand};
use crate::utils::angles::shortest_angle;

/// Progress along a route. `index == waypoints.len()` means complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFollower {
    route: Route,
    index: usize,
}

/// Output of one follow step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowStep {
    pub command: NavigationCommand,
    /// Waypoint being steered towards, `None` once complete.
    pub target: Option<Point2<f64>>,
    pub complete: bool,
}

impl PathFollower {
    pub fn new(route: Route) -> Self {
        Self { route, index: 0 }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.route.waypoints.len()
    }

    pub fn current_waypoint(&self) -> Option<Point2<f64>> {
        self.route.waypoints.get(self.index).copied()
    }

    /// Skips every waypoint already within reach, then decides whether to
    /// drive or turn towards the next one.
    pub fn step(&mut self, pose: &AgentPose, params: &PathfindingParams) -> FollowStep {
        let here = pose.ground();
        while let Some(wp) = self.current_waypoint() {
            if (wp - here).norm() < params.waypoint_threshold {
                self.index += 1;
            } else {
                break;
            }
        }

        let Some(target) = self.current_waypoint() else {
            return FollowStep {
                command: NavigationCommand::Stop,
                target: None,
                complete: true,
            };
        };

        let bearing = heading_towards(&(target - here));
        let diff = shortest_angle(pose.heading, bearing);
        let command = if diff.abs() < params.heading_tolerance {
            NavigationCommand::Forward
        } else if diff > 0.0 {
            NavigationCommand::Left
        } else {
            NavigationCommand::Right
        };

        FollowStep {
            command,
            target: Some(target),
            complete: false,
        }
    }
}

/// Moves straight at `target` by `speed * dt` without overshooting and snaps
/// the heading onto the bearing. Route traversal skips the integrator's
/// angular inertia so the agent cannot drift into the wall while crossing.
pub fn advance_towards(pose: &mut AgentPose, target: Point2<f64>, speed: f64, dt: f64) {
    let here = pose.ground();
    let offset = target - here;
    let distance = offset.norm();
    if distance <= f64::EPSILON {
        return;
    }
    pose.heading = heading_towards(&offset);
    let travel = (speed * dt).min(distance);
    pose.set_ground(here + offset / distance * travel);
}
