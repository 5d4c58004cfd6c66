//! Player preferences
//!
//! Persisted in LocalStorage on the web; defaults on native.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "chroma_tap_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Parse a stored blob; `None` means fall back to defaults
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(err) => {
                log::warn!("Discarding stored settings: {}", err);
                None
            }
        }
    }

    /// Stored preferences, or defaults when absent or unreadable
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten())
            .and_then(|json| Self::decode(&json));
        match stored {
            Some(settings) => {
                log::info!("Preferences restored (muted: {})", settings.muted);
                settings
            }
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::debug!("LocalStorage unavailable; preferences not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to write preferences");
                }
            }
            Err(err) => log::warn!("Failed to encode preferences: {}", err),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}
