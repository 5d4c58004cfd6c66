//! Audio cues
//!
//! Procedurally generated tones via the Web Audio API - no external files.
//! Browsers only allow an `AudioContext` after a user gesture, so the context
//! is created on `unlock()` (the start button) and every cue is a no-op before.

use std::cell::Cell;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Enemy destroyed
    Hit,
}

/// Fire-and-forget audio sink
pub trait AudioCue {
    /// Called from a user gesture; initializes the backend
    fn unlock(&mut self);
    fn play(&self, effect: SoundEffect);
}

/// Mix levels shared by every backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Mix {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl Mix {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

/// Audio sink for native runs: counts cues instead of playing them
#[derive(Debug, Default)]
pub struct SilentAudio {
    unlocked: bool,
    played: Cell<u32>,
}

impl SilentAudio {
    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Cues played since unlock
    pub fn played(&self) -> u32 {
        self.played.get()
    }
}

impl AudioCue for SilentAudio {
    fn unlock(&mut self) {
        self.unlocked = true;
    }

    fn play(&self, effect: SoundEffect) {
        if !self.unlocked {
            return;
        }
        log::trace!("cue {:?}", effect);
        self.played.set(self.played.get() + 1);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, Mix, SoundEffect};
    use crate::consts::{HIT_TONE_HZ, HIT_TONE_SECS};

    /// Audio manager for the game
    #[derive(Default)]
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        mix: Mix,
    }

    impl AudioManager {
        pub fn new(mix: Mix) -> Self {
            Self { ctx: None, mix }
        }

        pub fn set_mix(&mut self, mix: Mix) {
            self.mix = mix;
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Hit - short sine beep
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, HIT_TONE_HZ, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + HIT_TONE_SECS)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + HIT_TONE_SECS).ok();
        }
    }

    impl AudioCue for AudioManager {
        fn unlock(&mut self) {
            if self.ctx.is_some() {
                return;
            }
            // May fail outside a secure context
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
        }

        fn play(&self, effect: SoundEffect) {
            let vol = self.mix.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Hit => self.play_hit(ctx, vol),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_before_unlock() {
        let mut audio = SilentAudio::default();
        audio.play(SoundEffect::Hit);
        assert_eq!(audio.played(), 0);

        audio.unlock();
        audio.play(SoundEffect::Hit);
        assert!(audio.is_unlocked());
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_mix_volume() {
        let mut settings = Settings::default();
        settings.master_volume = 0.5;
        settings.sfx_volume = 0.5;
        assert!((Mix::from_settings(&settings).effective_volume() - 0.25).abs() < 0.0001);

        settings.muted = true;
        assert_eq!(Mix::from_settings(&settings).effective_volume(), 0.0);

        settings.muted = false;
        settings.master_volume = 3.0;
        settings.sfx_volume = 1.0;
        assert_eq!(Mix::from_settings(&settings).effective_volume(), 1.0);
    }
}
