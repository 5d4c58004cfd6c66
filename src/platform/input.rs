//! Input helpers
//!
//! Mobile browsers follow a tap with a synthesized `click` a few hundred ms
//! later. Color buttons listen to both, so the click is dropped when it comes
//! right after a touch.

use glam::Vec2;

/// Synthesized clicks arriving this soon after a touch are ignored
pub const TOUCH_CLICK_DEBOUNCE_MS: f64 = 500.0;

/// Where a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Drops mouse clicks that shadow a recent touch
#[derive(Debug, Clone)]
pub struct TouchDebounce {
    window_ms: f64,
    last_touch_ms: Option<f64>,
}

impl Default for TouchDebounce {
    fn default() -> Self {
        Self::new(TOUCH_CLICK_DEBOUNCE_MS)
    }
}

impl TouchDebounce {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last_touch_ms: None,
        }
    }

    /// Returns true if the press at `now_ms` should be handled
    pub fn accept(&mut self, source: PointerSource, now_ms: f64) -> bool {
        match source {
            PointerSource::Touch => {
                self.last_touch_ms = Some(now_ms);
                true
            }
            PointerSource::Mouse => match self.last_touch_ms {
                Some(t) if now_ms - t < self.window_ms => {
                    // One synthesized click per touch
                    self.last_touch_ms = None;
                    false
                }
                _ => true,
            },
        }
    }
}

/// Convert client coordinates to canvas-local coordinates
#[inline]
pub fn canvas_point(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_after_touch_dropped() {
        let mut debounce = TouchDebounce::default();
        assert!(debounce.accept(PointerSource::Touch, 1000.0));
        assert!(!debounce.accept(PointerSource::Mouse, 1300.0));
        // Only the one shadow click is eaten
        assert!(debounce.accept(PointerSource::Mouse, 1350.0));
    }

    #[test]
    fn test_late_click_accepted() {
        let mut debounce = TouchDebounce::default();
        debounce.accept(PointerSource::Touch, 1000.0);
        assert!(debounce.accept(PointerSource::Mouse, 1600.0));
    }

    #[test]
    fn test_mouse_only_always_accepted() {
        let mut debounce = TouchDebounce::default();
        assert!(debounce.accept(PointerSource::Mouse, 0.0));
        assert!(debounce.accept(PointerSource::Mouse, 10.0));
        assert!(debounce.accept(PointerSource::Touch, 20.0));
        assert!(debounce.accept(PointerSource::Touch, 30.0));
    }

    #[test]
    fn test_canvas_point() {
        assert_eq!(canvas_point(150.0, 90.0, 50.0, 40.0), Vec2::new(100.0, 50.0));
    }
}
