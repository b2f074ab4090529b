//! Sound cues for world events
//!
//! `SoundBoard` listens to the world and queues cues; the host drains them
//! each frame. On the web, `AudioManager` plays them procedurally.

use serde::{Deserialize, Serialize};

use crate::sim::{DestroyedObject, Player, RandomSource, SeededRandom, Target, WorldListener};

/// Delay before the player cheers after a pop (ms)
pub const HAPPY_CHEER_DELAY_MS: f64 = 500.0;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A target appeared
    Appear,
    /// A target was popped
    Destroyed,
    /// A player cheers after popping
    PlayerHappy,
    /// A target faded away unpopped
    DiedNaturally,
}

impl SoundCue {
    /// Number of interchangeable variants per cue
    pub fn variants(&self) -> usize {
        match self {
            SoundCue::Appear => 6,
            SoundCue::Destroyed => 7,
            SoundCue::PlayerHappy => 8,
            SoundCue::DiedNaturally => 1,
        }
    }
}

/// A cue waiting to be played
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingCue {
    pub cue: SoundCue,
    /// Which variant of the cue (0-based)
    pub variant: usize,
    /// Play this long after draining (ms)
    pub delay_ms: f64,
}

/// Event-to-cue mapping with a mute switch
pub struct SoundBoard {
    muted: bool,
    rng: Box<dyn RandomSource>,
    pending: Vec<PendingCue>,
}

impl SoundBoard {
    pub fn new(rng: impl RandomSource + 'static) -> Self {
        Self {
            muted: false,
            rng: Box::new(rng),
            pending: Vec::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SeededRandom::new(seed))
    }

    /// Muting also drops anything already queued
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.pending.clear();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Take every queued cue, oldest first
    pub fn drain(&mut self) -> Vec<PendingCue> {
        std::mem::take(&mut self.pending)
    }

    fn queue(&mut self, cue: SoundCue, delay_ms: f64) {
        if self.muted {
            return;
        }
        let variant = self.rng.index(cue.variants());
        self.pending.push(PendingCue {
            cue,
            variant,
            delay_ms,
        });
    }
}

impl WorldListener for SoundBoard {
    fn on_object_created(&mut self, _target: &Target) {
        self.queue(SoundCue::Appear, 0.0);
    }

    fn on_object_destroyed(&mut self, _record: &DestroyedObject, _player: &Player) {
        self.queue(SoundCue::Destroyed, 0.0);
        self.queue(SoundCue::PlayerHappy, HAPPY_CHEER_DELAY_MS);
    }

    fn on_object_died_naturally(&mut self, _target: &Target) {
        self.queue(SoundCue::DiedNaturally, 0.0);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{PendingCue, SoundCue};

    /// Web Audio player for cues
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Set volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        pub fn play(&self, pending: &PendingCue) {
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let t = ctx.current_time() + pending.delay_ms / 1000.0;
            // Variants shift pitch by a semitone each
            let pitch = 2f32.powf(pending.variant as f32 / 12.0);
            let vol = self.volume;

            match pending.cue {
                SoundCue::Appear => self.sweep(ctx, t, 300.0 * pitch, 900.0 * pitch, 0.15, vol * 0.4),
                SoundCue::Destroyed => {
                    self.sweep(ctx, t, 1200.0 * pitch, 80.0, 0.12, vol * 0.5);
                    self.sweep(ctx, t, 60.0, 40.0, 0.1, vol * 0.3);
                }
                SoundCue::PlayerHappy => {
                    for (i, note) in [523.25, 659.25, 783.99].iter().enumerate() {
                        self.sweep(ctx, t + i as f64 * 0.08, note * pitch, note * pitch, 0.12, vol * 0.3);
                    }
                }
                SoundCue::DiedNaturally => self.sweep(ctx, t, 400.0, 100.0, 0.4, vol * 0.3),
            }
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

        /// Single tone gliding from `from` to `to` Hz over `duration` seconds
        fn sweep(&self, ctx: &AudioContext, t: f64, from: f32, to: f32, duration: f64, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Triangle) else {
                return;
            };

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }
    }
}
