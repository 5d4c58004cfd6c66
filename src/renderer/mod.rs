//! Rendering module
//!
//! `scene` builds draw commands from the game state; `canvas` replays them on
//! a Canvas 2D context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

pub use scene::{DrawCommand, Scene};
