// seeker_core/src/lib.rs

pub mod behavior;
pub mod collision;
pub mod error;
pub mod exploration;
pub mod maze;
pub mod mission;
pub mod params;
pub mod pathfinding;
pub mod physics;
pub mod prelude;
pub mod seeker;
pub mod types;
pub mod utils;
pub mod view;
pub mod vision;
