// seeker_sim/src/simulation/core/prng.rs

use bevy::prelude::Resource;
use rand_chacha::ChaCha8Rng;

/// The one random source of a run. Vision noise and simulated service
/// failures both draw from it, so a seeded run is reproducible.
#[derive(Resource)]
pub struct SimulationRng(pub ChaCha8Rng);
