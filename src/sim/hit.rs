//! Hit resolution and color selection

use glam::Vec2;
use rand::Rng;

use super::spawn::{spawn_enemies, spawns_after_kill};
use super::state::{EnemyColor, GameEvent, GameState};
use crate::tuning::Tuning;

/// Resolve a pointer press at `point` (canvas space).
///
/// Only the frontmost (most recently spawned) enemy under the point is
/// resolved. A matching color destroys it and spawns its replacement, plus an
/// escalation spawn on every Nth kill. A mismatch resets the combo. Presses
/// outside every enemy, or outside of play, change nothing.
pub fn handle_hit<R: Rng>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
    point: Vec2,
) -> Vec<GameEvent> {
    if !state.is_playing() {
        return Vec::new();
    }

    let Some(index) = state.enemies.iter().rposition(|e| e.contains(point)) else {
        return Vec::new();
    };
    let color = state.enemies[index].color;

    if color != state.selected {
        log::debug!("Wrong color: hit {:?} while {:?} selected", color, state.selected);
        state.combo = 0;
        return vec![GameEvent::WrongColor {
            hit: color,
            selected: state.selected,
        }];
    }

    state.combo += 1;
    let points = tuning.base_points.saturating_mul(u64::from(state.combo));
    state.score = state.score.saturating_add(points);
    state.enemies_defeated += 1;
    state.enemies.remove(index);

    let mut events = vec![GameEvent::EnemyDestroyed {
        color,
        points,
        combo: state.combo,
    }];

    let owed = spawns_after_kill(state.enemies_defeated, tuning);
    spawn_enemies(state, tuning, rng, owed);
    if owed > 1 {
        log::info!(
            "Kill {} escalates, population now {}",
            state.enemies_defeated,
            state.enemies.len()
        );
        events.push(GameEvent::Escalated {
            population: state.enemies.len(),
        });
    }

    log::debug!(
        "Destroyed {:?} for {} (combo {}, score {})",
        color,
        points,
        state.combo,
        state.score
    );
    events
}

/// Switch the active color. Always resets the combo so it can't be carried
/// across colors. Ignored once the session is over.
pub fn select_color(state: &mut GameState, color: EnemyColor) -> Vec<GameEvent> {
    if state.is_game_over() {
        return Vec::new();
    }
    state.combo = 0;
    state.selected = color;
    vec![GameEvent::ColorSelected(color)]
}
