// seeker_core/src/mission/mod.rs

//! Multi-target missions: turning instruction text into an ordered list of
//! targets, then walking that list as vision confirms each one.

pub mod parser;
pub mod sequencer;

pub use parser::{keyword_targets, plan_mission, MissionPlanner, PlanSource, PlannedMission};
pub use sequencer::{MissionEvent, MissionPlan, MissionStatus, MissionStep};
