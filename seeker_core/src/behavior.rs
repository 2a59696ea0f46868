// seeker_core/src/behavior.rs

//! Arbitration between reactive tracking, exploration and pathfinding.
//!
//! There is exactly one current [`BehaviorMode`]; each variant carries the
//! state only that mode needs. Mode changes are decided by the pure
//! [`transition`] function from a snapshot of [`Signals`], then applied by
//! the owner of the mode (the `Seeker`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::exploration::ExplorationController;
use crate::params::SeekerParams;
use crate::pathfinding::PathFollower;
use crate::types::NavigationCommand;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum BehaviorMode {
    /// The externally supplied vision command drives the agent.
    #[default]
    Reactive,
    Exploring(ExplorationController),
    Pathfinding(PathFollower),
}

/// Payload-free view of the mode, for reporting and transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Reactive,
    Exploring,
    Pathfinding,
}

impl BehaviorMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            BehaviorMode::Reactive => ModeKind::Reactive,
            BehaviorMode::Exploring(_) => ModeKind::Exploring,
            BehaviorMode::Pathfinding(_) => ModeKind::Pathfinding,
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModeKind::Reactive => "Reactive",
            ModeKind::Exploring => "Exploring",
            ModeKind::Pathfinding => "Pathfinding",
        };
        f.write_str(name)
    }
}

/// The two rotation counters gating mode changes.
///
/// `scan` only grows while the effective command is SCAN and gates
/// pathfinding. `total` grows for any rotation while reactive and gates
/// exploration. They are kept separate on purpose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationAccumulators {
    pub scan: f64,
    pub total: f64,
}

impl RotationAccumulators {
    /// Adds this tick's heading change. `effective` is the command before
    /// view remapping.
    pub fn record(&mut self, heading_delta: f64, effective: NavigationCommand, mode: ModeKind) {
        if mode != ModeKind::Reactive {
            return;
        }
        let turned = heading_delta.abs();
        self.total += turned;
        if effective == NavigationCommand::Scan {
            self.scan += turned;
        }
    }

    pub fn reset_scan(&mut self) {
        self.scan = 0.0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Inputs to the transition function.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    pub target_assigned: bool,
    pub collided: bool,
    pub path_complete: bool,
    pub rotation: RotationAccumulators,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactiveReason {
    PathComplete,
    Collision,
    TargetAssigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Stay,
    StartPathfinding,
    StartExploring,
    ToReactive(ReactiveReason),
}

/// Decides the next mode. Never returns a transition into the current mode.
pub fn transition(current: ModeKind, signals: &Signals, params: &SeekerParams) -> Transition {
    match current {
        ModeKind::Pathfinding if signals.collided => Transition::ToReactive(ReactiveReason::Collision),
        ModeKind::Pathfinding if signals.path_complete => {
            Transition::ToReactive(ReactiveReason::PathComplete)
        }
        ModeKind::Exploring if signals.target_assigned => {
            Transition::ToReactive(ReactiveReason::TargetAssigned)
        }
        ModeKind::Reactive
            if signals.target_assigned
                && signals.rotation.scan >= params.pathfinding.trigger_rotation =>
        {
            Transition::StartPathfinding
        }
        ModeKind::Reactive
            if !signals.target_assigned
                && signals.rotation.total >= params.exploration.trigger_rotation =>
        {
            Transition::StartExploring
        }
        _ => Transition::Stay,
    }
}
