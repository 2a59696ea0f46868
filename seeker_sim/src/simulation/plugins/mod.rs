// seeker_sim/src/simulation/plugins/mod.rs

pub mod agent;
pub mod mission;
pub mod telemetry;
pub mod vision;
