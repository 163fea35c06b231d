//! Presentation snapshot
//!
//! A flat, serializable view of one frame. The renderer never sees
//! [`GameState`] directly.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, ObstacleKind, PowerUpKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub size: f32,
    /// Jump animation is playing
    pub jumping: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectFlags {
    pub double_points: bool,
    pub invincible: bool,
    pub slow_time: bool,
}

/// Everything the presentation layer draws
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub power_ups: Vec<PowerUpView>,
    pub score: u64,
    pub high_score: u64,
    pub active_effects: EffectFlags,
    pub is_playing: bool,
    pub is_game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            player: PlayerView {
                x: PLAYER_X,
                y: state.player.y,
                velocity: state.player.vel_y,
                size: PLAYER_SIZE,
                jumping: state.is_jumping(),
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    x: o.pos.x,
                    y: o.pos.y,
                    width: o.size.x,
                    height: o.size.y,
                })
                .collect(),
            power_ups: state
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    id: p.id,
                    kind: p.kind,
                    x: p.pos.x,
                    y: p.pos.y,
                    size: PICKUP_SIZE,
                })
                .collect(),
            score: state.score,
            high_score: state.high_score.best(),
            active_effects: EffectFlags {
                double_points: state.effects.double_points(),
                invincible: state.effects.invincible(),
                slow_time: state.effects.slow_time(),
            },
            is_playing: state.phase == GamePhase::Playing,
            is_game_over: state.phase == GamePhase::GameOver,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
