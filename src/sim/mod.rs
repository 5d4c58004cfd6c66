//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-driven timestep only
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod enemy;
pub mod hit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use enemy::Enemy;
pub use hit::{handle_hit, select_color};
pub use spawn::{INITIAL_ENEMIES, escalates, spawn_enemies, spawns_after_kill};
pub use state::{EnemyColor, GameEvent, GamePhase, GameState};
pub use tick::tick;
