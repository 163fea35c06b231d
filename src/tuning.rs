//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`Tuning`]. The defaults are the
//! classic values; a host may override any subset from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::secs_to_ticks;

/// Errors raised while loading a tuning file
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value parsed but is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "tuning parse error: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Simulation constants
///
/// Distances are pixels, speeds are pixels per tick, gravity is pixels per
/// tick squared. Screen y grows downward, so the ground line is the largest
/// y the player can reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Added to the player's vertical velocity every tick
    pub gravity: f32,
    /// Velocity set by a jump (negative = upward)
    pub jump_velocity: f32,
    /// Lowest point of the track (player top edge)
    pub ground_line: f32,
    /// Player height at the start of a run
    pub start_height: f32,
    /// Animation flag duration after a jump
    pub jump_anim_secs: f32,

    // === Scrolling ===
    /// Horizontal scroll speed of the world
    pub base_speed: f32,
    /// Multiplier applied to player motion and obstacle scroll under slow time
    pub slow_time_scale: f32,
    /// Where new entities appear
    pub spawn_x: f32,
    /// Entities left of this are discarded
    pub offscreen_cutoff: f32,

    // === Obstacles ===
    /// Per-tick spawn probability
    pub obstacle_spawn_chance: f32,
    pub max_obstacles: usize,
    /// Share of spawns that are moving obstacles
    pub moving_share: f32,
    /// Share of the remaining spawns that float
    pub floating_share: f32,
    /// Spawn height of floating obstacles
    pub floating_height: f32,
    /// Vertical swing of moving obstacles
    pub wave_amplitude: f32,
    /// Horizontal distance per radian of the moving obstacle wave
    pub wave_length: f32,

    // === Power-ups ===
    pub powerup_spawn_chance: f32,
    pub max_powerups: usize,
    /// Spawn height band [min, max)
    pub powerup_min_y: f32,
    pub powerup_max_y: f32,
    /// How long a collected effect stays on
    pub effect_duration_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_velocity: -15.0,
            ground_line: 400.0,
            start_height: 200.0,
            jump_anim_secs: 0.5,

            base_speed: 5.0,
            slow_time_scale: 0.5,
            spawn_x: 800.0,
            offscreen_cutoff: -50.0,

            obstacle_spawn_chance: 0.02,
            max_obstacles: 3,
            moving_share: 0.3,
            floating_share: 0.5,
            floating_height: 300.0,
            wave_amplitude: 20.0,
            wave_length: 50.0,

            powerup_spawn_chance: 0.01,
            max_powerups: 2,
            powerup_min_y: 50.0,
            powerup_max_y: 350.0,
            effect_duration_secs: 5.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let chances = [
            ("obstacle_spawn_chance", self.obstacle_spawn_chance),
            ("powerup_spawn_chance", self.powerup_spawn_chance),
            ("moving_share", self.moving_share),
            ("floating_share", self.floating_share),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return invalid(field, "must be a probability in [0, 1]");
            }
        }

        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity", "must be negative (upward)");
        }
        if !(self.ground_line > 0.0) {
            return invalid("ground_line", "must be positive");
        }
        if !(0.0..=self.ground_line).contains(&self.start_height) {
            return invalid("start_height", "must lie within [0, ground_line]");
        }
        if !(self.base_speed > 0.0) {
            return invalid("base_speed", "must be positive");
        }
        if !(self.slow_time_scale > 0.0 && self.slow_time_scale <= 1.0) {
            return invalid("slow_time_scale", "must be in (0, 1]");
        }
        if !(self.offscreen_cutoff < self.spawn_x) {
            return invalid("offscreen_cutoff", "must be left of spawn_x");
        }
        if self.max_obstacles == 0 {
            return invalid("max_obstacles", "must be at least 1");
        }
        if self.max_powerups == 0 {
            return invalid("max_powerups", "must be at least 1");
        }
        if !(self.wave_length > 0.0) {
            return invalid("wave_length", "must be positive");
        }
        if !(self.powerup_min_y < self.powerup_max_y) {
            return invalid("powerup_max_y", "must be above powerup_min_y");
        }
        if !(self.effect_duration_secs > 0.0) {
            return invalid("effect_duration_secs", "must be positive");
        }
        if !(self.jump_anim_secs >= 0.0) {
            return invalid("jump_anim_secs", "must not be negative");
        }
        Ok(())
    }

    /// Effect lifetime in ticks
    pub fn effect_duration_ticks(&self) -> u64 {
        secs_to_ticks(self.effect_duration_secs)
    }

    /// Jump animation lifetime in ticks
    pub fn jump_anim_ticks(&self) -> u64 {
        secs_to_ticks(self.jump_anim_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.effect_duration_ticks(), 300);
        assert_eq!(tuning.jump_anim_ticks(), 30);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 7.5, "max_obstacles": 5 }"#)
            .expect("valid overrides");
        assert_eq!(tuning.base_speed, 7.5);
        assert_eq!(tuning.max_obstacles, 5);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "obstacle_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid { field: "obstacle_spawn_chance", .. }
        ));
    }

    #[test]
    fn test_rejects_upward_gravity_and_downward_jump() {
        let tuning = Tuning { gravity: -1.0, ..Default::default() };
        assert!(tuning.validate().is_err());

        let tuning = Tuning { jump_velocity: 3.0, ..Default::default() };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid { field: "jump_velocity", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }

    #[test]
    fn test_rejects_empty_powerup_band() {
        let tuning = Tuning {
            powerup_min_y: 200.0,
            powerup_max_y: 200.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
