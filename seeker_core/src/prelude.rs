// seeker_core/src/prelude.rs

// --- Core data ---
pub use crate::error::{SeekerError, SeekerResult};
pub use crate::maze::{MazeHalf, MazeLayout};
pub use crate::params::SeekerParams;
pub use crate::types::{AgentHandle, AgentKinematics, AgentPose, NavigationCommand};

// --- The agent ---
pub use crate::behavior::{BehaviorMode, ModeKind, ReactiveReason, Transition};
pub use crate::collision::ContactKind;
pub use crate::seeker::{Seeker, TickInput, TickReport};
pub use crate::view::CameraPair;

// --- Vision and missions ---
pub use crate::mission::{plan_mission, MissionEvent, MissionPlan, MissionPlanner, MissionStatus};
pub use crate::vision::{
    respond, BoundingBoxPolicy, Detection, NavigationPolicy, RequestToken, StereoCameraModel, StereoPolicy,
    VisionRequestTracker, VisionResponse,
};
