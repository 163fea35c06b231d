//! Randomized obstacle and power-up spawning
//!
//! The random source is injected so runs can be replayed from a seed and
//! tests can force or suppress spawns through [`Tuning`] chances.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};

/// Spawn gate: below the cap and the roll landed under the chance
#[inline]
pub fn should_spawn(roll: f32, chance: f32, active: usize, cap: usize) -> bool {
    active < cap && roll < chance
}

/// Maybe add one obstacle at the right edge
pub fn spawn_obstacle<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<ObstacleKind> {
    let roll: f32 = rng.random();
    if !should_spawn(
        roll,
        state.tuning.obstacle_spawn_chance,
        state.obstacles.len(),
        state.tuning.max_obstacles,
    ) {
        return None;
    }

    let kind = ObstacleKind::from_rolls(rng.random(), rng.random(), &state.tuning);
    let id = state.next_entity_id();
    let obstacle = Obstacle::new(id, kind, state.tuning.spawn_x, &state.tuning);
    log::debug!("Spawned {} obstacle #{id} at y={}", kind.as_str(), obstacle.pos.y);
    state.obstacles.push(obstacle);
    state.events.push(GameEvent::ObstacleSpawned { id, kind });
    Some(kind)
}

/// Maybe add one power-up at the right edge, at a random height in the band
pub fn spawn_powerup<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Option<PowerUpKind> {
    let roll: f32 = rng.random();
    if !should_spawn(
        roll,
        state.tuning.powerup_spawn_chance,
        state.powerups.len(),
        state.tuning.max_powerups,
    ) {
        return None;
    }

    let kind = PowerUpKind::from_roll(rng.random());
    let y = rng.random_range(state.tuning.powerup_min_y..state.tuning.powerup_max_y);
    let id = state.next_entity_id();
    log::debug!("Spawned {} power-up #{id} at y={y:.1}", kind.as_str());
    state.powerups.push(PowerUp {
        id,
        kind,
        pos: Vec2::new(state.tuning.spawn_x, y),
    });
    state.events.push(GameEvent::PowerUpSpawned { id, kind });
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn always_spawn() -> Tuning {
        Tuning {
            obstacle_spawn_chance: 1.0,
            powerup_spawn_chance: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_should_spawn_gate() {
        assert!(should_spawn(0.01, 0.02, 0, 3));
        assert!(!should_spawn(0.02, 0.02, 0, 3));
        assert!(!should_spawn(0.0, 0.02, 3, 3));
        assert!(!should_spawn(0.0, 0.0, 0, 3));
    }

    #[test]
    fn test_obstacle_spawn_respects_cap() {
        let mut state = GameState::new(always_spawn());
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..10 {
            spawn_obstacle(&mut state, &mut rng);
        }
        assert_eq!(state.obstacles.len(), 3);
        for obstacle in &state.obstacles {
            assert_eq!(obstacle.pos.x, 800.0);
            assert_eq!(obstacle.base_y, obstacle.kind.spawn_height(&state.tuning));
            if obstacle.kind != ObstacleKind::Moving {
                assert_eq!(obstacle.pos.y, obstacle.base_y);
            }
        }
    }

    #[test]
    fn test_powerup_spawn_in_band() {
        let mut state = GameState::new(always_spawn());
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            state.powerups.clear();
            let kind = spawn_powerup(&mut state, &mut rng).expect("chance is 1");
            let p = &state.powerups[0];
            assert_eq!(p.kind, kind);
            assert_eq!(p.pos.x, 800.0);
            assert!((50.0..350.0).contains(&p.pos.y));
        }
        assert!(spawn_powerup(&mut state, &mut rng).is_some());
        assert!(spawn_powerup(&mut state, &mut rng).is_none());
        assert_eq!(state.powerups.len(), 2);
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let tuning = Tuning {
            obstacle_spawn_chance: 0.0,
            powerup_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(spawn_obstacle(&mut state, &mut rng).is_none());
            assert!(spawn_powerup(&mut state, &mut rng).is_none());
        }
    }

    #[test]
    fn test_all_variants_eventually_drawn() {
        let mut state = GameState::new(always_spawn());
        let mut rng = Pcg32::seed_from_u64(99);
        let mut obstacle_kinds = Vec::new();
        let mut powerup_kinds = Vec::new();
        for _ in 0..500 {
            state.obstacles.clear();
            state.powerups.clear();
            obstacle_kinds.extend(spawn_obstacle(&mut state, &mut rng));
            powerup_kinds.extend(spawn_powerup(&mut state, &mut rng));
        }
        for kind in [ObstacleKind::Regular, ObstacleKind::Floating, ObstacleKind::Moving] {
            assert!(obstacle_kinds.contains(&kind));
        }
        for kind in PowerUpKind::ALL {
            assert!(powerup_kinds.contains(&kind));
        }
    }
}
