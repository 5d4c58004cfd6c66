//! Fixed timestep simulation tick
//!
//! Advances every enemy and checks the left boundary.

use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one timestep.
///
/// Does nothing unless the session is playing. When one or more enemies reach
/// the boundary the session ends (a single `GameOver` event no matter how many
/// breached) and the breaching enemies are removed.
pub fn tick(state: &mut GameState, tuning: &Tuning, dt: f32) -> Vec<GameEvent> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    state.time_ticks += 1;

    for enemy in &mut state.enemies {
        enemy.advance(dt);
    }

    let before = state.enemies.len();
    state.enemies.retain(|e| !e.breached(tuning.boundary_x));
    let breached = before - state.enemies.len();

    if breached == 0 {
        return Vec::new();
    }

    state.phase = GamePhase::GameOver;
    state.final_score = Some(state.score);
    log::info!(
        "Boundary breached by {} enemies at tick {}, final score {}",
        breached,
        state.time_ticks,
        state.score
    );
    vec![GameEvent::GameOver {
        final_score: state.score,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{Enemy, EnemyColor};
    use glam::Vec2;

    fn playing_state(enemies: &[(f32, f32)]) -> GameState {
        let mut state = GameState::new(Vec2::new(600.0, 400.0));
        state.phase = GamePhase::Playing;
        state.enemies = enemies
            .iter()
            .map(|&(x, speed)| Enemy {
                pos: Vec2::new(x, 100.0),
                size: 40.0,
                color: EnemyColor::Green,
                speed,
            })
            .collect();
        state
    }

    #[test]
    fn test_tick_moves_enemies() {
        let tuning = Tuning::default();
        let mut state = playing_state(&[(300.0, 0.3), (500.0, 0.6)]);
        state.score = 700;
        state.combo = 4;

        let events = tick(&mut state, &tuning, SIM_DT);

        assert!(events.is_empty());
        assert!((state.enemies[0].pos.x - 299.7).abs() < 0.0001);
        assert!((state.enemies[1].pos.x - 499.4).abs() < 0.0001);
        assert_eq!(state.score, 700);
        assert_eq!(state.combo, 4);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_breach_ends_session_once() {
        let tuning = Tuning::default();
        let mut state = playing_state(&[(0.2, 0.5), (0.4, 0.5), (300.0, 0.5)]);
        state.score = 1200;

        let events = tick(&mut state, &tuning, SIM_DT);

        assert_eq!(events, vec![GameEvent::GameOver { final_score: 1200 }]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, Some(1200));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_exact_boundary_counts_as_breach() {
        let tuning = Tuning::default();
        let mut state = playing_state(&[(0.0, 0.0)]);
        tick(&mut state, &tuning, SIM_DT);
        assert!(state.is_game_over());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let tuning = Tuning::default();
        let mut state = playing_state(&[(0.1, 0.5), (200.0, 0.5)]);
        tick(&mut state, &tuning, SIM_DT);
        assert!(state.is_game_over());

        let x = state.enemies[0].pos.x;
        let ticks = state.time_ticks;
        let events = tick(&mut state, &tuning, SIM_DT);

        assert!(events.is_empty());
        assert_eq!(state.enemies[0].pos.x, x);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_tick_in_menu_is_noop() {
        let tuning = Tuning::default();
        let mut state = playing_state(&[(100.0, 0.5)]);
        state.phase = GamePhase::Menu;
        tick(&mut state, &tuning, SIM_DT);
        assert_eq!(state.enemies[0].pos.x, 100.0);
    }
}
