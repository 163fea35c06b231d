//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run by one 1/60 s step. The order of the
//! stages below is part of the game's behavior; collisions are evaluated
//! against the positions produced earlier in the same tick.

use rand::Rng;

use super::collision::{hits_obstacle, touches_powerup};
use super::input::TickInput;
use super::spawn::{spawn_obstacle, spawn_powerup};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one fixed timestep
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    // Don't tick on the title screen or after game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    expire_timers(state);

    if input.jump {
        state.jump();
    }

    integrate_player(state);
    advance_obstacles(state);
    advance_powerups(state);

    spawn_obstacle(state, rng);
    spawn_powerup(state, rng);

    state.score += state.score_increment();

    if check_obstacle_hit(state) {
        state.game_over();
        return;
    }

    collect_powerups(state);
}

/// Clear effects and the jump flag whose expiry stamp has been reached
fn expire_timers(state: &mut GameState) {
    let now = state.time_ticks;
    for kind in state.effects.expire(now) {
        log::debug!("{} expired at tick {now}", kind.as_str());
        state.events.push(GameEvent::EffectExpired { kind });
    }
    if state.jump_anim_until.is_some_and(|until| now >= until) {
        state.jump_anim_until = None;
    }
}

/// Gravity, then position (slowed under slow time), then clamp to the track
fn integrate_player(state: &mut GameState) {
    let time_scale = if state.effects.slow_time() {
        state.tuning.slow_time_scale
    } else {
        1.0
    };
    let player = &mut state.player;
    player.vel_y += state.tuning.gravity;
    player.y = (player.y + player.vel_y * time_scale).clamp(0.0, state.tuning.ground_line);
}

/// Scroll obstacles (slowed under slow time) and drop the ones off-screen
fn advance_obstacles(state: &mut GameState) {
    let speed = if state.effects.slow_time() {
        state.game_speed * state.tuning.slow_time_scale
    } else {
        state.game_speed
    };
    let tuning = &state.tuning;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.advance(speed, tuning);
    }
    state.obstacles.retain(|o| o.pos.x >= tuning.offscreen_cutoff);
}

/// Scroll power-ups at full speed and drop the ones off-screen
fn advance_powerups(state: &mut GameState) {
    let speed = state.game_speed;
    for powerup in state.powerups.iter_mut() {
        powerup.advance(speed);
    }
    let cutoff = state.tuning.offscreen_cutoff;
    state.powerups.retain(|p| p.pos.x >= cutoff);
}

/// Any obstacle overlapping the player, unless invincible
fn check_obstacle_hit(state: &GameState) -> bool {
    if state.effects.invincible() {
        return false;
    }
    state
        .obstacles
        .iter()
        .any(|obstacle| hits_obstacle(&state.player, obstacle))
}

/// Pick up every power-up touching the player
fn collect_powerups(state: &mut GameState) {
    let player = state.player;
    let mut collected = Vec::new();
    state.powerups.retain(|powerup| {
        if touches_powerup(&player, powerup) {
            collected.push(powerup.kind);
            false
        } else {
            true
        }
    });

    let now = state.time_ticks;
    let duration = state.tuning.effect_duration_ticks();
    for kind in collected {
        state.effects.activate(kind, now, duration);
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::debug!("Collected {} at tick {now}", kind.as_str());
    }
}
