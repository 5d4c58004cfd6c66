//! Spawn and difficulty policy
//!
//! One enemy at session start, one replacement per kill, plus one extra on
//! every Nth cumulative kill. The extra spawn is what makes the population
//! (and the difficulty) grow without bound.

use rand::Rng;

use super::enemy::Enemy;
use super::state::{EnemyColor, GameState};
use crate::tuning::Tuning;

/// Enemies present when a session starts
pub const INITIAL_ENEMIES: usize = 1;

/// Append `count` enemies with random palette colors
pub fn spawn_enemies<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R, count: usize) {
    for _ in 0..count {
        let color = EnemyColor::random(rng);
        state.enemies.push(Enemy::spawn(color, state.field, tuning, rng));
    }
}

/// Whether the kill that brought the counter to `defeated` escalates
#[inline]
pub fn escalates(defeated: u32, tuning: &Tuning) -> bool {
    defeated > 0 && defeated.is_multiple_of(tuning.escalation_interval)
}

/// Spawns owed after a kill (replacement plus optional escalation)
pub fn spawns_after_kill(defeated: u32, tuning: &Tuning) -> usize {
    if escalates(defeated, tuning) { 2 } else { 1 }
}
