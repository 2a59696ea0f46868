// seeker_core/src/view.rs

//! Front/rear stereo camera selection and the command remapping it implies.
//!
//! With the rear pair as the steering reference the agent is effectively
//! looking backwards, so LEFT and RIGHT swap and forward travel flips sign.

use serde::{Deserialize, Serialize};

use crate::params::ViewParams;
use crate::types::NavigationCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraPair {
    Front,
    Rear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub rear: bool,
    pub cooldown: f64,
}

impl ViewState {
    pub fn active_pair(&self) -> CameraPair {
        if self.rear {
            CameraPair::Rear
        } else {
            CameraPair::Front
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Asks for a camera pair. Honored only when the view is enabled, the
    /// pair differs from the active one, and the cooldown has elapsed.
    /// Returns whether a switch happened.
    pub fn request(&mut self, pair: CameraPair, params: &ViewParams) -> bool {
        let want_rear = pair == CameraPair::Rear;
        if !params.rear_view_enabled || want_rear == self.rear || self.cooldown > 0.0 {
            return false;
        }
        self.rear = want_rear;
        self.cooldown = params.switch_cooldown;
        true
    }

    /// Back to the front pair, ignoring the cooldown.
    /// Returns whether the view actually changed.
    pub fn force_front(&mut self) -> bool {
        std::mem::replace(&mut self.rear, false)
    }

    /// Remaps a ground-frame command for the active camera pair.
    pub fn map(&self, command: NavigationCommand) -> NavigationCommand {
        match (self.rear, command) {
            (true, NavigationCommand::Left) => NavigationCommand::Right,
            (true, NavigationCommand::Right) => NavigationCommand::Left,
            (_, other) => other,
        }
    }

    /// Sign applied to forward travel.
    pub fn drive_sign(&self) -> f64 {
        if self.rear {
            -1.0
        } else {
            1.0
        }
    }
}
