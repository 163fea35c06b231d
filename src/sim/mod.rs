//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Timed flags as tick stamps, never wall-clock timers
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, hits_obstacle, touches_powerup};
pub use input::{InputEvent, InputQueue, TickInput};
pub use spawn::{should_spawn, spawn_obstacle, spawn_powerup};
pub use state::{
    ActiveEffects, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player, PowerUp,
    PowerUpKind,
};
pub use tick::tick;
