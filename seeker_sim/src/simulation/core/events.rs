// seeker_sim/src/simulation/core/events.rs

use bevy::prelude::Event;
use seeker_core::seeker::TickReport;
use seeker_core::types::AgentHandle;
use seeker_core::vision::{RequestToken, VisionResponse};

/// A vision reply that matched the agent's in-flight request.
#[derive(Event, Debug, Clone)]
pub struct VisionResultEvent {
    pub agent: AgentHandle,
    pub token: RequestToken,
    pub response: VisionResponse,
}

/// Everything the agent did on one tick.
#[derive(Event, Debug, Clone)]
pub struct TickReportEvent {
    pub agent: AgentHandle,
    pub timestamp: f64,
    pub report: TickReport,
}

/// Asks for the run to end.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum RunFinished {
    MissionCompleted,
    MissionFailed(String),
    OutOfTime,
}
