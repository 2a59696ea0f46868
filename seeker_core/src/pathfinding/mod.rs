// seeker_core/src/pathfinding/mod.rs

//! Waypoint pathfinding between the two maze halves.

pub mod follower;
pub mod graph;
pub mod planner;

pub use follower::{advance_towards, FollowStep, PathFollower};
pub use graph::{breadth_first, room_sequence, MazeNode};
pub use planner::{plan_crossing, Route};
