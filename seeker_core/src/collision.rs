// seeker_core/src/collision.rs

//! Binary collision test against the dividing wall, the outer boundary and
//! nearby obstacles, plus the rebound response.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::maze::MazeLayout;
use crate::params::CollisionParams;
use crate::types::{heading_towards, AgentKinematics, AgentPose};
use crate::utils::angles::wrap_angle;

/// What the agent ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    /// One of the two solid segments of the dividing wall.
    Divider,
    Boundary,
    /// Index into the obstacle list passed to the detector.
    Obstacle(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub kind: ContactKind,
    /// Unit vector pointing away from the surface that was hit.
    pub normal: Vector2<f64>,
}

/// Collision flag plus the cooldown that suppresses repeated triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    pub collided: bool,
    pub cooldown: f64,
}

impl CollisionState {
    /// Clears last tick's flag and runs the cooldown down.
    pub fn tick(&mut self, dt: f64) {
        self.collided = false;
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    pub fn cooling_down(&self) -> bool {
        self.cooldown > 0.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollisionDetector {
    pub params: CollisionParams,
}

impl CollisionDetector {
    pub fn new(params: CollisionParams) -> Self {
        Self { params }
    }

    /// Pure geometric test. Walls are checked before obstacles.
    pub fn detect(
        &self,
        position: &Point2<f64>,
        obstacles: &[Point2<f64>],
        layout: &MazeLayout,
    ) -> Option<Contact> {
        let r = self.params.agent_radius;

        if layout.hits_divider(position, r) {
            let side = if position.y >= 0.0 { 1.0 } else { -1.0 };
            return Some(Contact {
                kind: ContactKind::Divider,
                normal: Vector2::new(0.0, side),
            });
        }

        let limit = layout.half_extent - self.params.boundary_margin;
        if position.x.abs() >= limit {
            return Some(Contact {
                kind: ContactKind::Boundary,
                normal: Vector2::new(-position.x.signum(), 0.0),
            });
        }
        if position.y.abs() >= limit {
            return Some(Contact {
                kind: ContactKind::Boundary,
                normal: Vector2::new(0.0, -position.y.signum()),
            });
        }

        let reach = r + self.params.obstacle_radius;
        obstacles.iter().enumerate().find_map(|(i, center)| {
            let offset = position - center;
            let distance = offset.norm();
            (distance < reach).then(|| Contact {
                kind: ContactKind::Obstacle(i),
                normal: if distance > f64::EPSILON {
                    offset / distance
                } else {
                    Vector2::new(0.0, 1.0)
                },
            })
        })
    }

    /// Detects and registers a contact unless the cooldown is running.
    /// A suppressed contact returns `None`.
    pub fn check(
        &self,
        state: &mut CollisionState,
        position: &Point2<f64>,
        obstacles: &[Point2<f64>],
        layout: &MazeLayout,
    ) -> Option<Contact> {
        if state.cooling_down() {
            return None;
        }
        let contact = self.detect(position, obstacles, layout)?;
        state.collided = true;
        state.cooldown = self.params.cooldown;
        Some(contact)
    }

    /// Turns the agent away from the surface and sends it off at the rebound
    /// speed with most of its spin removed.
    pub fn rebound(&self, contact: &Contact, pose: &mut AgentPose, k: &mut AgentKinematics) {
        pose.heading = wrap_angle(heading_towards(&contact.normal));
        k.velocity = self.params.rebound_speed;
        k.angular_velocity *= self.params.angular_damping;
    }
}
