// seeker_core/src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeekerError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("mission has no steps")]
    EmptyMission,

    #[error("mission planner failed: {0}")]
    Planner(String),

    #[error("vision service failed: {0}")]
    VisionService(String),

    #[error("vision result for request {token} is stale")]
    StaleVisionResult { token: u64 },
}

pub type SeekerResult<T> = Result<T, SeekerError>;
