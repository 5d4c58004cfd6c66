//! Session controller
//!
//! Owns the `GameState` and is the only thing allowed to mutate it. Drives the
//! Menu -> Playing -> GameOver -> Menu state machine and hands out tick-stream
//! ids so a host never runs two tick loops at once.

use std::error::Error;
use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::Viewport;
use crate::sim::{self, EnemyColor, GameEvent, GamePhase, GameState, INITIAL_ENEMIES};
use crate::tuning::Tuning;
use crate::ui::{PlayLayout, play_layout};

/// Identifies one tick loop. Only the current stream may keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(u64);

/// Why a start action was refused. The session stays in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// Mobile device held upright.
    PortraitOrientation,
    /// Start is only valid from the menu.
    NotInMenu(GamePhase),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PortraitOrientation => {
                write!(f, "rotate your device to landscape to play")
            }
            Self::NotInMenu(phase) => write!(f, "cannot start a session while in {phase:?}"),
        }
    }
}

impl Error for StartError {}

pub struct Session {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    viewport: Vec2,
    next_stream: u64,
    active_stream: Option<StreamId>,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let layout = play_layout(Vec2::ZERO, GamePhase::Menu);
        Self {
            state: GameState::new(layout.canvas),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            viewport: Vec2::ZERO,
            next_stream: 0,
            active_stream: None,
        }
    }

    /// Read-only snapshot for presentation
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Container/canvas sizes for the current phase and viewport
    pub fn layout(&self) -> PlayLayout {
        play_layout(self.viewport, self.state.phase)
    }

    pub fn active_stream(&self) -> Option<StreamId> {
        self.active_stream
    }

    /// Whether a loop holding `stream` should keep scheduling ticks
    pub fn is_current(&self, stream: StreamId) -> bool {
        self.active_stream == Some(stream)
    }

    fn open_stream(&mut self) -> StreamId {
        self.next_stream += 1;
        let stream = StreamId(self.next_stream);
        self.active_stream = Some(stream);
        stream
    }

    fn close_stream(&mut self) {
        if let Some(stream) = self.active_stream.take() {
            log::debug!("Tick stream {:?} closed", stream);
        }
    }

    /// Menu -> Playing. Rejected on a portrait mobile device.
    pub fn start<V: Viewport + ?Sized>(&mut self, viewport: &V) -> Result<Vec<GameEvent>, StartError> {
        if self.state.phase != GamePhase::Menu {
            return Err(StartError::NotInMenu(self.state.phase));
        }
        if !viewport.allows_play() {
            log::warn!("Start rejected: portrait orientation on mobile");
            return Err(StartError::PortraitOrientation);
        }

        self.viewport = viewport.size();
        self.state.phase = GamePhase::Playing;
        self.state.field = self.layout().canvas;
        sim::spawn_enemies(&mut self.state, &self.tuning, &mut self.rng, INITIAL_ENEMIES);
        let stream = self.open_stream();

        log::info!(
            "Session started on {}x{} field (stream {:?})",
            self.state.field.x,
            self.state.field.y,
            stream
        );
        Ok(vec![GameEvent::SessionStarted])
    }

    /// One simulation step. Closes the tick stream once the session is over.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        if !self.state.is_playing() {
            self.close_stream();
            return Vec::new();
        }
        let events = sim::tick(&mut self.state, &self.tuning, dt);
        if self.state.is_game_over() {
            self.close_stream();
        }
        events
    }

    /// Pointer press in canvas coordinates
    pub fn handle_hit(&mut self, x: f32, y: f32) -> Vec<GameEvent> {
        sim::handle_hit(&mut self.state, &self.tuning, &mut self.rng, Vec2::new(x, y))
    }

    pub fn select_color(&mut self, color: EnemyColor) -> Vec<GameEvent> {
        sim::select_color(&mut self.state, color)
    }

    /// Select by button key; unknown keys are ignored
    pub fn select_color_key(&mut self, key: &str) -> Vec<GameEvent> {
        match EnemyColor::from_key(key) {
            Some(color) => self.select_color(color),
            None => {
                log::debug!("Ignoring unknown color key {:?}", key);
                Vec::new()
            }
        }
    }

    /// GameOver -> Menu with a full reset
    pub fn restart(&mut self) -> Vec<GameEvent> {
        if !self.state.is_game_over() {
            return Vec::new();
        }
        self.close_stream();
        let field = play_layout(self.viewport, GamePhase::Menu).canvas;
        self.state = GameState::new(field);
        log::info!("Returned to menu");
        vec![GameEvent::ReturnedToMenu]
    }

    /// Viewport changed (resize/orientation). Enemies keep their positions.
    pub fn resize<V: Viewport + ?Sized>(&mut self, viewport: &V) {
        self.viewport = viewport.size();
        self.state.field = self.layout().canvas;
    }
}

/// Fixed timestep accumulator for variable-rate hosts (animation frames)
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add `dt` seconds and return how many `SIM_DT` ticks to run.
    /// Large gaps (tab in background) are clamped.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
