// seeker_core/src/seeker.rs

//! One agent, advanced one fixed tick at a time.
//!
//! Per tick: cooldowns, collision, mode arbitration and command synthesis,
//! view mapping, movement, boundary clamp, rotation bookkeeping.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::behavior::{transition, BehaviorMode, ModeKind, ReactiveReason, RotationAccumulators, Signals, Transition};
use crate::collision::{CollisionDetector, CollisionState, ContactKind};
use crate::error::SeekerResult;
use crate::exploration::ExplorationController;
use crate::maze::MazeLayout;
use crate::params::SeekerParams;
use crate::pathfinding::{advance_towards, plan_crossing, PathFollower};
use crate::physics::{DriveInput, PhysicsIntegrator};
use crate::types::{AgentKinematics, AgentPose, NavigationCommand};
use crate::utils::angles::shortest_angle;
use crate::view::{CameraPair, ViewState};

/// What the outside world tells the agent this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Latest command from the vision service.
    pub command: NavigationCommand,
    /// Position of the assigned target; `None` when nothing is assigned.
    pub target: Option<Point2<f64>>,
    pub target_visible: bool,
    /// Camera pair the vision service would rather steer with.
    pub view_request: Option<CameraPair>,
    pub obstacles: &'a [Point2<f64>],
}

/// What happened during a tick, for rendering and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub pose: AgentPose,
    pub kinematics: AgentKinematics,
    /// Command chosen by the active mode, before view remapping.
    pub effective_command: NavigationCommand,
    /// Command the integrator actually received.
    pub applied_command: NavigationCommand,
    pub mode: ModeKind,
    pub rear_view: bool,
    pub view_switched: bool,
    pub collided: bool,
    pub contact: Option<ContactKind>,
    pub transitions: Vec<Transition>,
    /// Waypoint being followed while pathfinding.
    pub waypoint: Option<Point2<f64>>,
}

#[derive(Debug, Clone)]
pub struct Seeker {
    pose: AgentPose,
    kinematics: AgentKinematics,
    mode: BehaviorMode,
    rotation: RotationAccumulators,
    collision: CollisionState,
    view: ViewState,
    last_target: Option<Point2<f64>>,
    params: SeekerParams,
    layout: MazeLayout,
    integrator: PhysicsIntegrator,
    detector: CollisionDetector,
}

impl Seeker {
    pub fn new(params: SeekerParams, layout: MazeLayout, pose: AgentPose) -> SeekerResult<Self> {
        params.validate()?;
        Ok(Self {
            pose,
            kinematics: AgentKinematics::default(),
            mode: BehaviorMode::default(),
            rotation: RotationAccumulators::default(),
            collision: CollisionState::default(),
            view: ViewState::default(),
            last_target: None,
            integrator: PhysicsIntegrator::new(params.physics.clone()),
            detector: CollisionDetector::new(params.collision.clone()),
            params,
            layout,
        })
    }

    pub fn pose(&self) -> &AgentPose {
        &self.pose
    }

    pub fn kinematics(&self) -> &AgentKinematics {
        &self.kinematics
    }

    pub fn mode(&self) -> &BehaviorMode {
        &self.mode
    }

    pub fn rotation(&self) -> &RotationAccumulators {
        &self.rotation
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn params(&self) -> &SeekerParams {
        &self.params
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    /// Puts the agent back at `pose`, at rest, reactive and looking forward.
    pub fn reset(&mut self, pose: AgentPose) {
        self.pose = pose;
        self.kinematics.halt();
        self.mode = BehaviorMode::Reactive;
        self.rotation.reset();
        self.collision = CollisionState::default();
        self.view = ViewState::default();
        self.last_target = None;
    }

    pub fn tick(&mut self, input: &TickInput<'_>, dt: f64) -> TickReport {
        let mut heading_before = self.pose.heading;
        let mut transitions = Vec::new();
        let mut view_switched = false;

        self.collision.tick(dt);
        self.view.tick(dt);

        let contact = self.detector.check(
            &mut self.collision,
            &self.pose.ground(),
            input.obstacles,
            &self.layout,
        );
        if let Some(contact) = &contact {
            self.detector.rebound(contact, &mut self.pose, &mut self.kinematics);
            // The rebound snap is not a scan.
            heading_before = self.pose.heading;
            view_switched |= self.view.force_front();
            if self.mode.kind() == ModeKind::Pathfinding {
                self.kinematics.halt();
                self.rotation.reset_scan();
            }
        }

        if input.target.is_some() && input.target != self.last_target {
            self.rotation.reset();
        }
        self.last_target = input.target;
        if input.target_visible {
            self.rotation.reset_scan();
        }

        let signals = Signals {
            target_assigned: input.target.is_some(),
            collided: self.collision.collided,
            path_complete: matches!(&self.mode, BehaviorMode::Pathfinding(f) if f.is_complete()),
            rotation: self.rotation,
        };
        let change = transition(self.mode.kind(), &signals, &self.params);
        if change != Transition::Stay {
            view_switched |= self.apply(change);
            transitions.push(change);
        }

        if let (Some(pair), ModeKind::Reactive) = (input.view_request, self.mode.kind()) {
            view_switched |= self.view.request(pair, &self.params.view);
        }

        let target_distance = input.target.map(|t| (t - self.pose.ground()).norm());
        let mut waypoint = None;

        let effective = match &mut self.mode {
            BehaviorMode::Reactive => {
                let command = input.command;
                let drive = DriveInput::new(self.view.map(command)).with_target_distance(target_distance);
                self.drive(&drive, dt);
                command
            }
            BehaviorMode::Exploring(controller) => {
                let step = controller.step(dt, &self.params.exploration);
                let drive = DriveInput {
                    yaw_rate: step.yaw_rate,
                    ..DriveInput::new(step.command)
                };
                self.drive(&drive, dt);
                step.command
            }
            BehaviorMode::Pathfinding(follower) => {
                let step = follower.step(&self.pose, &self.params.pathfinding);
                waypoint = step.target;
                let drive = DriveInput {
                    speed_cap: Some(self.params.physics.pathfinding_max_speed),
                    ..DriveInput::new(step.command)
                        .with_target_distance(step.target.map(|t| (t - self.pose.ground()).norm()))
                };
                self.integrator.update_kinematics(&mut self.kinematics, &drive, dt);
                if let Some(target) = step.target {
                    advance_towards(&mut self.pose, target, self.kinematics.velocity, dt);
                    // The heading is snapped, not integrated.
                    self.kinematics.angular_velocity = 0.0;
                }
                step.command
            }
        };
        // Only vision commands are relative to the active camera pair.
        let applied = match self.mode {
            BehaviorMode::Reactive => self.view.map(effective),
            _ => effective,
        };

        self.integrator.clamp_to_boundary(
            &mut self.pose,
            &mut self.kinematics,
            &self.layout,
            self.params.collision.agent_radius,
        );

        let turned = shortest_angle(heading_before, self.pose.heading);
        self.rotation.record(turned, effective, self.mode.kind());

        TickReport {
            pose: self.pose,
            kinematics: self.kinematics,
            effective_command: effective,
            applied_command: applied,
            mode: self.mode.kind(),
            rear_view: self.view.rear,
            view_switched,
            collided: contact.is_some(),
            contact: contact.map(|c| c.kind),
            transitions,
            waypoint,
        }
    }

    /// Applies a mode change. Returns whether the camera view changed.
    fn apply(&mut self, change: Transition) -> bool {
        match change {
            Transition::Stay => false,
            Transition::StartPathfinding => {
                let route = plan_crossing(self.pose.ground(), &self.layout);
                self.mode = BehaviorMode::Pathfinding(PathFollower::new(route));
                self.view.force_front()
            }
            Transition::StartExploring => {
                self.rotation.reset();
                self.mode = BehaviorMode::Exploring(ExplorationController::default());
                self.view.force_front()
            }
            Transition::ToReactive(reason) => {
                if matches!(reason, ReactiveReason::PathComplete | ReactiveReason::Collision) {
                    self.rotation.reset_scan();
                }
                self.mode = BehaviorMode::Reactive;
                false
            }
        }
    }

    fn drive(&mut self, drive: &DriveInput, dt: f64) {
        self.integrator.update_kinematics(&mut self.kinematics, drive, dt);
        self.integrator
            .integrate_pose(&mut self.pose, &self.kinematics, self.view.drive_sign(), dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeHalf;
    use std::f64::consts::TAU;

    const DT: f64 = 1.0 / 60.0;

    fn seeker_at(x: f64, z: f64) -> Seeker {
        Seeker::new(SeekerParams::default(), MazeLayout::default(), AgentPose::new(x, z, 0.0)).unwrap()
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = SeekerParams::default();
        params.physics.max_speed = -1.0;
        assert!(Seeker::new(params, MazeLayout::default(), AgentPose::default()).is_err());
    }

    #[test]
    fn scanning_with_a_target_starts_pathfinding() {
        let mut seeker = seeker_at(-8.0, -12.0);
        let target = Point2::new(5.0, 10.0);
        let input = TickInput {
            command: NavigationCommand::Scan,
            target: Some(target),
            ..Default::default()
        };

        let mut started = false;
        for _ in 0..2000 {
            let report = seeker.tick(&input, DT);
            if report.transitions.contains(&Transition::StartPathfinding) {
                started = true;
                break;
            }
        }
        assert!(started);
        let BehaviorMode::Pathfinding(follower) = seeker.mode() else {
            panic!("expected pathfinding, got {:?}", seeker.mode().kind());
        };
        assert_eq!(follower.route().to, MazeHalf::South);
        assert!(seeker.rotation().scan >= TAU);
    }

    #[test]
    fn visible_target_keeps_the_scan_counter_at_zero() {
        let mut seeker = seeker_at(-8.0, -12.0);
        let input = TickInput {
            command: NavigationCommand::Scan,
            target: Some(Point2::new(-8.0, -16.0)),
            target_visible: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            seeker.tick(&input, DT);
        }
        assert_eq!(seeker.mode().kind(), ModeKind::Reactive);
        assert!(seeker.rotation().scan < 0.02);
    }

    #[test]
    fn collision_aborts_pathfinding_and_faces_front() {
        let mut seeker = seeker_at(-8.0, -12.0);
        seeker.mode = BehaviorMode::Pathfinding(PathFollower::new(plan_crossing(
            seeker.pose.ground(),
            &seeker.layout,
        )));
        seeker.view.rear = true;
        seeker.rotation.scan = 1.0;

        // An obstacle right on top of the agent.
        let obstacles = [Point2::new(-8.0, -12.3)];
        let report = seeker.tick(
            &TickInput {
                target: Some(Point2::new(5.0, 10.0)),
                obstacles: &obstacles,
                ..Default::default()
            },
            DT,
        );
        assert!(report.collided);
        assert_eq!(report.transitions, vec![Transition::ToReactive(ReactiveReason::Collision)]);
        assert_eq!(report.mode, ModeKind::Reactive);
        assert!(!report.rear_view);
        assert_eq!(seeker.rotation().scan, 0.0);
    }

    #[test]
    fn pathfinding_starts_on_the_front_pair() {
        let mut seeker = seeker_at(-8.0, -12.0);
        seeker.view.rear = true;
        let input = TickInput {
            command: NavigationCommand::Scan,
            target: Some(Point2::new(5.0, 10.0)),
            ..Default::default()
        };

        let report = (0..2000)
            .map(|_| seeker.tick(&input, DT))
            .find(|r| r.transitions.contains(&Transition::StartPathfinding))
            .expect("pathfinding never started");
        assert!(report.view_switched);
        assert!(!report.rear_view);
        assert_eq!(report.mode, ModeKind::Pathfinding);
    }

    #[test]
    fn exploration_ignores_a_leftover_rear_view() {
        let mut seeker = seeker_at(5.0, 10.0);
        seeker.tick(
            &TickInput {
                command: NavigationCommand::Scan,
                target: Some(Point2::new(5.0, 14.0)),
                view_request: Some(CameraPair::Rear),
                ..Default::default()
            },
            DT,
        );
        assert!(seeker.view().rear);

        // The target is withdrawn; scanning on eventually starts exploring.
        let scan = TickInput {
            command: NavigationCommand::Scan,
            ..Default::default()
        };
        let report = (0..3600)
            .map(|_| seeker.tick(&scan, DT))
            .find(|r| r.transitions.contains(&Transition::StartExploring))
            .expect("exploration never started");
        assert!(report.view_switched);
        assert!(!report.rear_view);

        let start = seeker.pose().ground();
        let facing = seeker.pose().forward();
        for _ in 0..60 {
            let r = seeker.tick(&scan, DT);
            assert_eq!(r.effective_command, NavigationCommand::Forward);
            assert_eq!(r.applied_command, NavigationCommand::Forward);
        }
        assert!((seeker.pose().ground() - start).dot(&facing) > 0.0);

        let turn = (0..300)
            .map(|_| seeker.tick(&scan, DT))
            .find(|r| r.effective_command == NavigationCommand::Left)
            .expect("no turn phase");
        assert_eq!(turn.applied_command, NavigationCommand::Left);
        assert!(turn.kinematics.angular_velocity > 0.0);
    }

    #[test]
    fn rebound_heading_snap_is_not_counted_as_scanning() {
        let mut seeker = seeker_at(-8.0, -12.0);
        let obstacles = [Point2::new(-8.0, -12.3)];
        let report = seeker.tick(
            &TickInput {
                command: NavigationCommand::Scan,
                target: Some(Point2::new(5.0, 10.0)),
                obstacles: &obstacles,
                ..Default::default()
            },
            DT,
        );
        assert!(report.collided);
        // Turned to face away from the obstacle (+z), then one scan step.
        assert!(shortest_angle(std::f64::consts::PI, report.pose.heading).abs() < 0.05);
        assert!(seeker.rotation().scan < 0.05);
        assert!(seeker.rotation().total < 0.05);
    }

    #[test]
    fn rear_view_requests_are_mapped() {
        let mut seeker = seeker_at(5.0, 10.0);
        let report = seeker.tick(
            &TickInput {
                command: NavigationCommand::Left,
                target: Some(Point2::new(5.0, 14.0)),
                view_request: Some(CameraPair::Rear),
                ..Default::default()
            },
            DT,
        );
        assert!(report.view_switched);
        assert!(report.rear_view);
        assert_eq!(report.effective_command, NavigationCommand::Left);
        assert_eq!(report.applied_command, NavigationCommand::Right);
        assert!(report.kinematics.angular_velocity < 0.0);
    }
}
