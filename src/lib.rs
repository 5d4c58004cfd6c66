//! Chroma Tap - a color-matching tap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemies, ticks, hit resolution, spawning)
//! - `session`: Menu/Playing/GameOver controller that owns the simulation
//! - `renderer`: Scene building and the Canvas 2D backend
//! - `platform`: Browser/native capability abstraction
//! - `ui`: Screen layout and presentation of simulation events
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::{Session, StartError, StreamId};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Canvas size while the start screen is showing
    pub const MENU_FIELD_WIDTH: f32 = 800.0 * 0.75;
    pub const MENU_FIELD_HEIGHT: f32 = 600.0;

    /// Fraction of the viewport left as padding around the game container
    pub const CONTAINER_PADDING: f32 = 0.1;
    /// Fraction of the container width taken by the canvas (rest is the color bar)
    pub const CANVAS_WIDTH_SHARE: f32 = 0.75;

    /// Hit tone (sine)
    pub const HIT_TONE_HZ: f32 = 440.0;
    pub const HIT_TONE_SECS: f64 = 0.1;
}
