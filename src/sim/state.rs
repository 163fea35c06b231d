//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Timed flags are
//! stored as expiry tick stamps so the simulation never depends on wall-clock
//! timers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::highscore::HighScore;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended on an obstacle hit
    GameOver,
}

/// The rocket. Horizontal position is fixed at [`PLAYER_X`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge, screen space (grows downward)
    pub y: f32,
    /// Vertical velocity in pixels per tick
    pub vel_y: f32,
}

impl Player {
    pub fn new(start_height: f32) -> Self {
        Self {
            y: start_height,
            vel_y: 0.0,
        }
    }

    /// Standing exactly on the ground line. The integrator clamps to the
    /// ground value itself, so exact comparison is intended.
    pub fn is_grounded(&self, ground_line: f32) -> bool {
        self.y == ground_line
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(PLAYER_X, self.y), Vec2::splat(PLAYER_SIZE))
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObstacleKind {
    /// Sits on the ground
    #[default]
    Regular,
    /// Hangs at a fixed elevated height
    Floating,
    /// Bobs around ground level as it scrolls
    Moving,
}

impl ObstacleKind {
    /// Weighted variant draw from two uniform rolls in [0, 1):
    /// `moving_share` moving, the rest split by `floating_share`.
    pub fn from_rolls(kind_roll: f32, split_roll: f32, tuning: &Tuning) -> Self {
        if kind_roll < tuning.moving_share {
            ObstacleKind::Moving
        } else if split_roll < tuning.floating_share {
            ObstacleKind::Floating
        } else {
            ObstacleKind::Regular
        }
    }

    /// Spawn height for this variant
    pub fn spawn_height(&self, tuning: &Tuning) -> f32 {
        match self {
            ObstacleKind::Floating => tuning.floating_height,
            ObstacleKind::Regular | ObstacleKind::Moving => tuning.ground_line,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Regular => "regular",
            ObstacleKind::Floating => "floating",
            ObstacleKind::Moving => "moving",
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Height the obstacle spawned at (center line of the moving wave)
    pub base_y: f32,
    pub size: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, x: f32, tuning: &Tuning) -> Self {
        let base_y = kind.spawn_height(tuning);
        let mut obstacle = Self {
            id,
            kind,
            pos: Vec2::new(x, base_y),
            base_y,
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        };
        obstacle.follow_wave(tuning);
        obstacle
    }

    /// Moving obstacles sit on a sine of their x
    fn follow_wave(&mut self, tuning: &Tuning) {
        if self.kind == ObstacleKind::Moving {
            self.pos.y =
                self.base_y + (self.pos.x / tuning.wave_length).sin() * tuning.wave_amplitude;
        }
    }

    /// Scroll left by `dx`
    pub fn advance(&mut self, dx: f32, tuning: &Tuning) {
        self.pos.x -= dx;
        self.follow_wave(tuning);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Score +2 per tick
    DoublePoints,
    /// Obstacle hits are ignored
    Invincible,
    /// Player and obstacles move at half speed
    SlowTime,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::DoublePoints,
        PowerUpKind::Invincible,
        PowerUpKind::SlowTime,
    ];

    /// Uniform variant draw from one roll in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        let index = (roll * Self::ALL.len() as f32) as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::DoublePoints => "doublePoints",
            PowerUpKind::Invincible => "invincible",
            PowerUpKind::SlowTime => "slowTime",
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub pos: Vec2,
}

impl PowerUp {
    pub fn advance(&mut self, dx: f32) {
        self.pos.x -= dx;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(PICKUP_SIZE))
    }
}

/// Active power-up effects, one expiry stamp per kind
///
/// `Some(t)` means the effect is on through tick `t`. Re-collecting an active
/// effect only moves the stamp; effects never stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub double_points_until: Option<u64>,
    pub invincible_until: Option<u64>,
    pub slow_time_until: Option<u64>,
}

impl ActiveEffects {
    fn slot(&self, kind: PowerUpKind) -> Option<u64> {
        match kind {
            PowerUpKind::DoublePoints => self.double_points_until,
            PowerUpKind::Invincible => self.invincible_until,
            PowerUpKind::SlowTime => self.slow_time_until,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut Option<u64> {
        match kind {
            PowerUpKind::DoublePoints => &mut self.double_points_until,
            PowerUpKind::Invincible => &mut self.invincible_until,
            PowerUpKind::SlowTime => &mut self.slow_time_until,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn double_points(&self) -> bool {
        self.is_active(PowerUpKind::DoublePoints)
    }

    pub fn invincible(&self) -> bool {
        self.is_active(PowerUpKind::Invincible)
    }

    pub fn slow_time(&self) -> bool {
        self.is_active(PowerUpKind::SlowTime)
    }

    /// Turn an effect on (or restart its timer)
    pub fn activate(&mut self, kind: PowerUpKind, now: u64, duration_ticks: u64) {
        *self.slot_mut(kind) = Some(now + duration_ticks);
    }

    /// Switch off every effect whose last tick has passed; returns those kinds
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = self.slot_mut(kind);
            if slot.is_some_and(|until| now > until) {
                *slot = None;
                expired.push(kind);
            }
        }
        expired
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Gameplay events produced by the last tick (presentation feedback only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    PowerUpSpawned { id: u32, kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    EffectExpired { kind: PowerUpKind },
    GameOver { score: u64, new_high_score: bool },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance constants for this session
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Score of the current run
    pub score: u64,
    /// Best score this session, survives restarts
    pub high_score: HighScore,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// World scroll speed (pixels per tick)
    pub game_speed: f32,
    pub player: Player,
    /// Active obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Active power-ups (spawn order)
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Jump animation flag expiry
    pub jump_anim_until: Option<u64>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state on the title screen
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Ready,
            score: 0,
            high_score: HighScore::new(),
            time_ticks: 0,
            game_speed: tuning.base_speed,
            player: Player::new(tuning.start_height),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            jump_anim_until: None,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Return to the initial snapshot, keeping tuning and the high score
    pub fn reset(&mut self) {
        self.phase = GamePhase::Ready;
        self.score = 0;
        self.time_ticks = 0;
        self.game_speed = self.tuning.base_speed;
        self.player = Player::new(self.tuning.start_height);
        self.obstacles.clear();
        self.powerups.clear();
        self.effects.clear();
        self.jump_anim_until = None;
        self.events.clear();
        self.next_id = 1;
    }

    /// Reset and begin a run
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Run started");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_grounded(&self) -> bool {
        self.player.is_grounded(self.tuning.ground_line)
    }

    /// Apply a jump command. Only a grounded player can jump; otherwise
    /// nothing changes. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.player.vel_y = self.tuning.jump_velocity;
        self.jump_anim_until = Some(self.time_ticks + self.tuning.jump_anim_ticks());
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Jump animation flag for the renderer
    pub fn is_jumping(&self) -> bool {
        self.jump_anim_until.is_some()
    }

    /// Per-tick score increment
    pub fn score_increment(&self) -> u64 {
        if self.effects.double_points() { 2 } else { 1 }
    }

    /// End the run and fold the score into the high score
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        let new_high_score = self.high_score.record(self.score);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
        log::info!(
            "Game over at tick {} - score {} (best {})",
            self.time_ticks,
            self.score,
            self.high_score.best()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_snapshot() {
        let state = GameState::new(Tuning::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.y, 200.0);
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.obstacles.is_empty());
        assert!(state.powerups.is_empty());
        assert_eq!(state.effects, ActiveEffects::default());
        assert_eq!(state.game_speed, 5.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut state = GameState::new(Tuning::default());
        // Mid-air at the start height
        assert!(!state.jump());
        assert_eq!(state.player.vel_y, 0.0);
        assert!(!state.is_jumping());

        state.player.y = 400.0;
        assert!(state.jump());
        assert_eq!(state.player.vel_y, -15.0);
        assert!(state.is_jumping());
        assert_eq!(state.events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_effects_restart_without_stacking() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::SlowTime, 10, 300);
        effects.activate(PowerUpKind::SlowTime, 100, 300);
        assert_eq!(effects.slow_time_until, Some(400));
        assert!(effects.expire(400).is_empty());
        assert!(effects.slow_time());
        assert_eq!(effects.expire(401), vec![PowerUpKind::SlowTime]);
        assert!(!effects.slow_time());
    }

    #[test]
    fn test_obstacle_kind_weighting() {
        let tuning = Tuning::default();
        assert_eq!(ObstacleKind::from_rolls(0.1, 0.9, &tuning), ObstacleKind::Moving);
        assert_eq!(ObstacleKind::from_rolls(0.5, 0.2, &tuning), ObstacleKind::Floating);
        assert_eq!(ObstacleKind::from_rolls(0.5, 0.7, &tuning), ObstacleKind::Regular);
        assert_eq!(ObstacleKind::Floating.spawn_height(&tuning), 300.0);
        assert_eq!(ObstacleKind::Moving.spawn_height(&tuning), 400.0);
    }

    #[test]
    fn test_powerup_kind_uniform_draw() {
        assert_eq!(PowerUpKind::from_roll(0.0), PowerUpKind::DoublePoints);
        assert_eq!(PowerUpKind::from_roll(0.333), PowerUpKind::DoublePoints);
        assert_eq!(PowerUpKind::from_roll(1.0 / 3.0), PowerUpKind::Invincible);
        assert_eq!(PowerUpKind::from_roll(0.666), PowerUpKind::Invincible);
        assert_eq!(PowerUpKind::from_roll(2.0 / 3.0), PowerUpKind::SlowTime);
        assert_eq!(PowerUpKind::from_roll(0.999), PowerUpKind::SlowTime);
        assert_eq!(PowerUpKind::from_roll(1.0), PowerUpKind::SlowTime);
    }

    #[test]
    fn test_moving_obstacle_follows_wave() {
        let tuning = Tuning::default();
        let mut obstacle = Obstacle::new(1, ObstacleKind::Moving, 800.0, &tuning);
        obstacle.advance(5.0, &tuning);
        let expected = 400.0 + (795.0f32 / 50.0).sin() * 20.0;
        assert_eq!(obstacle.pos.x, 795.0);
        assert!((obstacle.pos.y - expected).abs() < 1e-4);

        // Spawns on the wave, not at its center line
        let fresh = Obstacle::new(3, ObstacleKind::Moving, 800.0, &tuning);
        let on_wave = 400.0 + (800.0f32 / 50.0).sin() * 20.0;
        assert!((fresh.pos.y - on_wave).abs() < 1e-4);
        assert_eq!(fresh.base_y, 400.0);

        let mut floating = Obstacle::new(2, ObstacleKind::Floating, 800.0, &tuning);
        floating.advance(5.0, &tuning);
        assert_eq!(floating.pos.y, 300.0);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = GameState::new(Tuning::default());
        state.start();
        state.score = 42;
        state.game_over();
        assert_eq!(state.phase, GamePhase::GameOver);
        state.start();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score.best(), 42);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
