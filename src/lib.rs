//! Rocket Runner - an endless-runner jump-and-dodge mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions, effects)
//! - `session`: Single-writer driver that owns the state and runs fixed ticks
//! - `snapshot`: Serializable view for the presentation layer
//! - `tuning`: Data-driven game balance

pub mod highscore;
pub mod session;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use highscore::HighScore;
pub use session::Session;
pub use snapshot::Snapshot;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player box - the rocket never moves horizontally
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 50.0;

    /// Obstacle box
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;

    /// Power-up pickup box
    pub const PICKUP_SIZE: f32 = 30.0;
}

/// Convert a duration in seconds to whole simulation ticks (rounded)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs * consts::TICK_RATE as f32).round().max(0.0) as u64
}
