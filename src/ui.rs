//! Screen layout and presentation of simulation events
//!
//! The session emits `GameEvent`s; `present` turns them into calls on a
//! `Presenter` (DOM in the browser, a recorder in tests) and the audio cue.

use glam::Vec2;

use crate::audio::{AudioCue, SoundEffect};
use crate::consts::*;
use crate::renderer::Scene;
use crate::sim::{EnemyColor, GameEvent, GamePhase, GameState};

/// Which top-level screens are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub start_screen: bool,
    pub game_container: bool,
    pub score_display: bool,
    pub game_over_screen: bool,
}

impl ScreenLayout {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Menu => Self {
                start_screen: true,
                game_container: false,
                score_display: false,
                game_over_screen: false,
            },
            GamePhase::Playing => Self {
                start_screen: false,
                game_container: true,
                score_display: true,
                game_over_screen: false,
            },
            GamePhase::GameOver => Self {
                start_screen: false,
                game_container: false,
                score_display: false,
                game_over_screen: true,
            },
        }
    }
}

/// Container and canvas sizes for the current phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayLayout {
    /// Explicit container size; `None` while the container is hidden
    pub container: Option<Vec2>,
    /// Canvas size, which is also the play field
    pub canvas: Vec2,
}

/// While playing, the container fills the viewport minus padding and the
/// canvas takes 75% of its width. Otherwise the canvas has a fixed size.
pub fn play_layout(viewport: Vec2, phase: GamePhase) -> PlayLayout {
    if phase != GamePhase::Playing {
        return PlayLayout {
            container: None,
            canvas: Vec2::new(MENU_FIELD_WIDTH, MENU_FIELD_HEIGHT),
        };
    }

    let container = viewport * (1.0 - CONTAINER_PADDING);
    // Offset sizes are whole pixels, canvas dimensions truncate
    let offset = container.round();
    PlayLayout {
        container: Some(container),
        canvas: Vec2::new((offset.x * CANVAS_WIDTH_SHARE).floor(), offset.y),
    }
}

/// Sink for everything the player sees
pub trait Presenter {
    fn show_screens(&mut self, screens: ScreenLayout);
    fn apply_layout(&mut self, layout: &PlayLayout);
    fn set_hud(&mut self, score: u64, combo: u32);
    fn highlight_color(&mut self, color: EnemyColor);
    fn set_final_score(&mut self, score: u64);
    fn draw(&mut self, scene: &Scene);
    /// Blocking notice (start rejected)
    fn notify(&mut self, message: &str);
}

/// Push the whole visible state (screens, sizes, HUD, color highlight)
pub fn refresh<P: Presenter + ?Sized>(presenter: &mut P, state: &GameState, layout: &PlayLayout) {
    presenter.show_screens(ScreenLayout::for_phase(state.phase));
    presenter.apply_layout(layout);
    presenter.highlight_color(state.selected);
    presenter.set_hud(state.score, state.combo);
}

/// React to the events of one tick or input
pub fn present<P, A>(
    presenter: &mut P,
    audio: &A,
    state: &GameState,
    layout: &PlayLayout,
    events: &[GameEvent],
) where
    P: Presenter + ?Sized,
    A: AudioCue + ?Sized,
{
    if events.is_empty() {
        return;
    }

    for event in events {
        match event {
            GameEvent::SessionStarted | GameEvent::ReturnedToMenu => {
                refresh(presenter, state, layout);
            }
            GameEvent::EnemyDestroyed { .. } => audio.play(SoundEffect::Hit),
            GameEvent::ColorSelected(color) => presenter.highlight_color(*color),
            GameEvent::GameOver { final_score } => {
                presenter.set_final_score(*final_score);
                presenter.show_screens(ScreenLayout::for_phase(GamePhase::GameOver));
            }
            GameEvent::WrongColor { .. } | GameEvent::Escalated { .. } => {}
        }
    }

    presenter.set_hud(state.score, state.combo);
}
