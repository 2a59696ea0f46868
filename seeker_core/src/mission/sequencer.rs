// seeker_core/src/mission/sequencer.rs

use serde::{Deserialize, Serialize};

use crate::error::{SeekerError, SeekerResult};
use crate::types::NavigationCommand;
use crate::vision::VisionResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    Pending,
    Active,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionStep {
    pub target: String,
    pub reached: bool,
}

/// Outcome of feeding one vision report to the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum MissionEvent {
    /// Nothing changed.
    Ignored,
    /// `reached` was confirmed; `next` is now assigned.
    Advanced { reached: String, next: String },
    /// The last step was confirmed.
    Completed { reached: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    steps: Vec<MissionStep>,
    current: usize,
    status: MissionStatus,
    failure: Option<String>,
    /// A report must be strictly above this to confirm a step.
    pub confidence_threshold: f64,
}

impl MissionPlan {
    pub fn new(targets: Vec<String>, confidence_threshold: f64) -> SeekerResult<Self> {
        if targets.is_empty() {
            return Err(SeekerError::EmptyMission);
        }
        Ok(Self {
            steps: targets
                .into_iter()
                .map(|target| MissionStep {
                    target,
                    reached: false,
                })
                .collect(),
            current: 0,
            status: MissionStatus::Pending,
            failure: None,
            confidence_threshold,
        })
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn steps(&self) -> &[MissionStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Activates a pending plan and returns the first target.
    pub fn start(&mut self) -> Option<&str> {
        if self.status == MissionStatus::Pending {
            self.status = MissionStatus::Active;
        }
        self.current_target()
    }

    /// The assigned target, only while the mission is running.
    pub fn current_target(&self) -> Option<&str> {
        match self.status {
            MissionStatus::Active => self.steps.get(self.current).map(|s| s.target.as_str()),
            _ => None,
        }
    }

    /// Advances when the report confirms the current target: visible, STOP,
    /// and confidence above the threshold.
    pub fn report(&mut self, response: &VisionResponse) -> MissionEvent {
        if self.status != MissionStatus::Active
            || !response.target_visible
            || response.action != NavigationCommand::Stop
            || response.confidence <= self.confidence_threshold
        {
            return MissionEvent::Ignored;
        }

        let step = &mut self.steps[self.current];
        step.reached = true;
        let reached = step.target.clone();
        self.current += 1;

        match self.steps.get(self.current) {
            Some(next) => MissionEvent::Advanced {
                reached,
                next: next.target.clone(),
            },
            None => {
                self.status = MissionStatus::Completed;
                MissionEvent::Completed { reached }
            }
        }
    }

    /// Ends the mission unsuccessfully. Has no effect once finished.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if matches!(self.status, MissionStatus::Pending | MissionStatus::Active) {
            self.status = MissionStatus::Failed;
            self.failure = Some(reason.into());
        }
    }
}
