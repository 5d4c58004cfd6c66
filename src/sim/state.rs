//! Game state and core simulation types
//!
//! Everything the presentation layer needs to draw a frame lives here.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Start screen, waiting for the start action
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// An enemy reached the boundary; terminal until restart
    GameOver,
}

/// Enemy/selection palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnemyColor {
    #[default]
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    /// Key used by the color buttons (`data-color`)
    pub fn key(&self) -> &'static str {
        match self {
            EnemyColor::Red => "red",
            EnemyColor::Green => "green",
            EnemyColor::Blue => "blue",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Fill color for rendering
    pub fn hex(&self) -> &'static str {
        match self {
            EnemyColor::Red => "#ff6347",
            EnemyColor::Green => "#3cb371",
            EnemyColor::Blue => "#4682b4",
        }
    }

    /// Uniform pick from the palette
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Menu -> Playing
    SessionStarted,
    /// Matching hit; `points` already added to the score
    EnemyDestroyed {
        color: EnemyColor,
        points: u64,
        combo: u32,
    },
    /// Enemy spawned beyond the replacement (every Nth kill)
    Escalated { population: usize },
    /// Wrong-color hit
    WrongColor { hit: EnemyColor, selected: EnemyColor },
    /// Player picked a color (combo resets)
    ColorSelected(EnemyColor),
    /// Playing -> GameOver
    GameOver { final_score: u64 },
    /// GameOver -> Menu
    ReturnedToMenu,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Score (never decreases within a session)
    pub score: u64,
    /// Consecutive correct hits
    pub combo: u32,
    /// Color the player is currently matching
    pub selected: EnemyColor,
    /// Cumulative kills this session (drives escalation)
    pub enemies_defeated: u32,
    /// Score captured at game over
    pub final_score: Option<u64>,
    /// Play field size (canvas space)
    pub field: Vec2,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh menu state for a field of the given size
    pub fn new(field: Vec2) -> Self {
        Self {
            phase: GamePhase::Menu,
            score: 0,
            combo: 0,
            selected: EnemyColor::default(),
            enemies_defeated: 0,
            final_score: None,
            field,
            enemies: Vec::new(),
            time_ticks: 0,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_palette_keys_round_trip() {
        for color in EnemyColor::ALL {
            assert_eq!(EnemyColor::from_key(color.key()), Some(color));
        }
        assert_eq!(EnemyColor::from_key("purple"), None);
        assert_eq!(EnemyColor::from_key("Red"), None);
    }

    #[test]
    fn test_random_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let color = EnemyColor::random(&mut rng);
            seen[EnemyColor::ALL.iter().position(|c| *c == color).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(Vec2::new(600.0, 600.0));
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.selected, EnemyColor::Red);
        assert!(state.enemies.is_empty());
        assert!(!state.is_game_over());
    }
}
