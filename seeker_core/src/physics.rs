// seeker_core/src/physics.rs

//! Converts a discrete navigation command into forward and angular velocity,
//! then integrates the pose.
//!
//! Two velocity profiles exist. When the agent has a destination, FORWARD uses
//! a thrust/drag model whose desired speed shrinks as the target gets closer.
//! Without a destination a cheaper first-order lag towards a per-command
//! target velocity is used instead. STOP and IDLE behave the same in both.

use nalgebra::Point2;

use crate::maze::MazeLayout;
use crate::params::PhysicsParams;
use crate::types::{heading_towards, AgentKinematics, AgentPose, NavigationCommand};
use crate::utils::angles::shortest_angle;

/// Everything the integrator needs to know about this tick besides time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveInput {
    pub command: NavigationCommand,
    /// Distance to the assigned target, if there is one.
    pub target_distance: Option<f64>,
    /// Replaces `max_speed` as the forward speed bound (pathfinding transit).
    pub speed_cap: Option<f64>,
    /// Forces a yaw rate after the command has been applied (exploration turns).
    pub yaw_rate: Option<f64>,
}

impl DriveInput {
    pub fn new(command: NavigationCommand) -> Self {
        Self {
            command,
            ..Default::default()
        }
    }

    pub fn with_target_distance(mut self, distance: Option<f64>) -> Self {
        self.target_distance = distance;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhysicsIntegrator {
    pub params: PhysicsParams,
}

impl PhysicsIntegrator {
    pub fn new(params: PhysicsParams) -> Self {
        Self { params }
    }

    /// Upper bound on forward speed for the given input.
    pub fn speed_cap(&self, input: &DriveInput) -> f64 {
        input.speed_cap.unwrap_or(self.params.max_speed)
    }

    /// Updates velocity and yaw rate for one tick. Both are clamped to their
    /// bounds on exit regardless of the incoming values.
    pub fn update_kinematics(&self, k: &mut AgentKinematics, input: &DriveInput, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let p = &self.params;
        let cap = self.speed_cap(input);
        let v0 = k.velocity.clamp(0.0, cap);
        let mut v = v0;
        let mut w = k.angular_velocity;

        match (input.command, input.target_distance) {
            (NavigationCommand::Stop, _) => {
                v -= p.brake_gain * v * dt;
                v = v.max(0.0);
                w = decay(w, p.angular_drag, dt);
                v = snap(v, p.stop_epsilon);
                w = snap(w, p.stop_epsilon);
            }
            (NavigationCommand::Idle, _) => {
                v = snap(decay(v, p.passive_decay, dt), p.stop_epsilon);
                w = snap(decay(w, p.angular_drag, dt), p.stop_epsilon);
            }
            (NavigationCommand::Forward, Some(distance)) => {
                let desired = (distance * p.approach_gain).clamp(p.min_approach_speed.min(cap), cap);
                let thrust = ((desired - v) * p.accel_gain).clamp(-p.max_thrust, p.max_thrust);
                let drag = p.drag * v * v;
                v += (thrust - drag) / p.mass * dt;
                w = decay(w, p.angular_drag, dt);
            }
            (cmd @ (NavigationCommand::Left | NavigationCommand::Right), Some(_)) => {
                w += cmd.turn_sign() * p.angular_accel * dt;
                w = decay(w, p.angular_drag, dt);
                v = decay(v, p.turn_speed_decay, dt);
            }
            (NavigationCommand::Scan, Some(_)) => {
                w = p.scan_rate;
                v = decay(v, p.passive_decay, dt);
            }
            // No destination: first-order lag towards a per-command target.
            (cmd, None) => {
                let (target_v, target_w) = match cmd {
                    NavigationCommand::Forward => (p.cruise_speed.min(cap), 0.0),
                    NavigationCommand::Left | NavigationCommand::Right => {
                        (p.turn_creep_speed.min(cap), cmd.turn_sign() * p.max_angular_speed)
                    }
                    _ => (0.0, p.scan_rate),
                };
                let alpha = (p.lag_rate * dt).min(1.0);
                v += (target_v - v) * alpha;
                w += (target_w - w) * alpha;
            }
        }

        if let Some(rate) = input.yaw_rate {
            w = rate;
        }

        k.velocity = v.clamp(0.0, cap);
        k.angular_velocity = w.clamp(-p.max_angular_speed, p.max_angular_speed);
        k.acceleration = (k.velocity - v0) / dt;
    }

    /// Advances the pose by the current kinematics. `drive_sign` is -1 when
    /// the rear camera pair is the steering reference.
    pub fn integrate_pose(&self, pose: &mut AgentPose, k: &AgentKinematics, drive_sign: f64, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        pose.translate_forward(k.velocity * dt * drive_sign);
        pose.rotate(k.angular_velocity * dt);
    }

    /// Soft clamp into the arena. On contact the agent loses speed and gets a
    /// yaw nudge back towards the interior. Returns whether the clamp engaged.
    pub fn clamp_to_boundary(
        &self,
        pose: &mut AgentPose,
        k: &mut AgentKinematics,
        layout: &MazeLayout,
        agent_radius: f64,
    ) -> bool {
        let limit = layout.half_extent - agent_radius;
        let p = pose.ground();
        let clamped = Point2::new(p.x.clamp(-limit, limit), p.y.clamp(-limit, limit));
        if clamped == p {
            return false;
        }
        pose.set_ground(clamped);

        let params = &self.params;
        k.velocity *= params.boundary_speed_retention;
        let inward = Point2::origin() - clamped;
        let turn = shortest_angle(pose.heading, heading_towards(&inward));
        k.angular_velocity = (k.angular_velocity + turn.signum() * params.boundary_nudge)
            .clamp(-params.max_angular_speed, params.max_angular_speed);
        true
    }
}

fn decay(value: f64, rate: f64, dt: f64) -> f64 {
    value * (1.0 - rate * dt).max(0.0)
}

fn snap(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f64 = 1.0 / 60.0;

    const ALL_COMMANDS: [NavigationCommand; 6] = [
        NavigationCommand::Forward,
        NavigationCommand::Left,
        NavigationCommand::Right,
        NavigationCommand::Stop,
        NavigationCommand::Scan,
        NavigationCommand::Idle,
    ];

    fn integrator() -> PhysicsIntegrator {
        PhysicsIntegrator::default()
    }

    #[test]
    fn velocities_stay_within_bounds_for_every_command() {
        let phys = integrator();
        let p = &phys.params;
        let initial = [
            (0.0, 0.0),
            (100.0, 50.0),
            (-3.0, -50.0),
            (p.max_speed, p.max_angular_speed),
        ];
        for command in ALL_COMMANDS {
            for target in [None, Some(0.2), Some(30.0)] {
                for (v, w) in initial {
                    let mut k = AgentKinematics {
                        velocity: v,
                        angular_velocity: w,
                        acceleration: 0.0,
                    };
                    let input = DriveInput::new(command).with_target_distance(target);
                    for _ in 0..300 {
                        phys.update_kinematics(&mut k, &input, DT);
                        assert!(k.velocity >= 0.0 && k.velocity <= p.max_speed);
                        assert!(k.angular_velocity.abs() <= p.max_angular_speed);
                    }
                }
            }
        }
    }

    #[test]
    fn stop_reaches_exactly_zero_without_overshoot() {
        let phys = integrator();
        let mut k = AgentKinematics {
            velocity: phys.params.max_speed,
            angular_velocity: 1.0,
            acceleration: 0.0,
        };
        let input = DriveInput::new(NavigationCommand::Stop);
        let mut previous = k.velocity;
        let mut ticks = 0;
        while k.velocity > 0.0 {
            phys.update_kinematics(&mut k, &input, DT);
            assert!(k.velocity >= 0.0);
            assert!(k.velocity <= previous);
            previous = k.velocity;
            ticks += 1;
            assert!(ticks < 200, "STOP did not converge");
        }
        assert_eq!(k.velocity, 0.0);
    }

    #[test]
    fn forward_slows_down_near_the_target() {
        let phys = integrator();
        let mut far = AgentKinematics::default();
        let mut near = AgentKinematics::default();
        for _ in 0..240 {
            phys.update_kinematics(
                &mut far,
                &DriveInput::new(NavigationCommand::Forward).with_target_distance(Some(30.0)),
                DT,
            );
            phys.update_kinematics(
                &mut near,
                &DriveInput::new(NavigationCommand::Forward).with_target_distance(Some(1.0)),
                DT,
            );
        }
        assert!(far.velocity > near.velocity);
        assert!(far.velocity > 0.8 * phys.params.max_speed);
    }

    #[test]
    fn turning_bleeds_speed_faster_than_idling() {
        let phys = integrator();
        let start = AgentKinematics {
            velocity: 3.0,
            ..Default::default()
        };
        let (mut turning, mut idle) = (start, start);
        for _ in 0..30 {
            phys.update_kinematics(
                &mut turning,
                &DriveInput::new(NavigationCommand::Left).with_target_distance(Some(10.0)),
                DT,
            );
            phys.update_kinematics(&mut idle, &DriveInput::new(NavigationCommand::Idle), DT);
        }
        assert!(turning.velocity < idle.velocity);
        assert!(turning.angular_velocity > 0.0);
    }

    #[test]
    fn scan_uses_the_fixed_rate_with_a_target() {
        let phys = integrator();
        let mut k = AgentKinematics::default();
        phys.update_kinematics(
            &mut k,
            &DriveInput::new(NavigationCommand::Scan).with_target_distance(Some(5.0)),
            DT,
        );
        assert_abs_diff_eq!(k.angular_velocity, phys.params.scan_rate, epsilon = 1e-12);
    }

    #[test]
    fn right_turns_clockwise_without_target() {
        let phys = integrator();
        let mut k = AgentKinematics::default();
        for _ in 0..60 {
            phys.update_kinematics(&mut k, &DriveInput::new(NavigationCommand::Right), DT);
        }
        assert!(k.angular_velocity < -1.0);
    }

    #[test]
    fn boundary_clamp_keeps_agent_inside_and_costs_speed() {
        let phys = integrator();
        let layout = MazeLayout::default();
        let mut pose = AgentPose::new(25.0, 0.0, 0.0);
        let mut k = AgentKinematics {
            velocity: 2.0,
            ..Default::default()
        };
        assert!(phys.clamp_to_boundary(&mut pose, &mut k, &layout, 0.5));
        assert_abs_diff_eq!(pose.position.x, 19.5, epsilon = 1e-12);
        assert_abs_diff_eq!(k.velocity, 1.0, epsilon = 1e-12);
        // Facing -z at x = +19.5, the interior is to the left.
        assert!(k.angular_velocity > 0.0);
    }

    #[test]
    fn rear_drive_sign_moves_backwards() {
        let phys = integrator();
        let mut pose = AgentPose::new(0.0, 0.0, 0.0);
        let k = AgentKinematics {
            velocity: 1.0,
            ..Default::default()
        };
        phys.integrate_pose(&mut pose, &k, -1.0, 1.0);
        assert_abs_diff_eq!(pose.position.z, 1.0, epsilon = 1e-12);
    }
}
