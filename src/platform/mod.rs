//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Viewport size and device class (orientation gate)
//! - Input events (touch/click debouncing, canvas coordinates)
//! - DOM presentation (wasm only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

pub use input::{PointerSource, TOUCH_CLICK_DEBOUNCE_MS, TouchDebounce, canvas_point};

/// Device orientation derived from the viewport size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Viewport/device queries the session depends on
pub trait Viewport {
    /// Inner size of the browser window (CSS pixels)
    fn size(&self) -> Vec2;

    /// Phone/tablet class device
    fn is_mobile(&self) -> bool;

    fn orientation(&self) -> Orientation {
        let size = self.size();
        if size.y > size.x {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Mobile devices have to be held in landscape to play
    fn allows_play(&self) -> bool {
        !(self.is_mobile() && self.orientation() == Orientation::Portrait)
    }
}

/// User agent fragments that mark a mobile-class device (matched case-insensitively)
const MOBILE_MARKERS: [&str; 5] = ["android", "iphone", "ipad", "ipod", "windows phone"];

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// A viewport with a fixed size, for native runs and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub size: Vec2,
    pub mobile: bool,
}

impl FixedViewport {
    pub fn desktop(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            mobile: false,
        }
    }

    pub fn mobile(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            mobile: true,
        }
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn is_mobile(&self) -> bool {
        self.mobile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Windows Phone 10.0)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36"
        ));
    }

    #[test]
    fn test_orientation_gate() {
        assert!(FixedViewport::desktop(600.0, 900.0).allows_play());
        assert!(FixedViewport::mobile(900.0, 400.0).allows_play());
        assert!(FixedViewport::mobile(500.0, 500.0).allows_play());
        assert!(!FixedViewport::mobile(400.0, 900.0).allows_play());
        assert_eq!(
            FixedViewport::mobile(400.0, 900.0).orientation(),
            Orientation::Portrait
        );
    }
}
