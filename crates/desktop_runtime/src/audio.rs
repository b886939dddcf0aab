//! UI sound engine: mute/volume policy in front of a [`platform_host::AudioBackend`].
//!
//! Sounds are fire and forget. Backend failures are logged and dropped so a broken audio stack
//! never interrupts window management.

use std::{cell::Cell, rc::Rc};

use leptos::logging::warn;
use platform_host::{plan_sound, recipe, AudioBackend, AudioError, SoundKind};

use crate::model::AudioSettings;

pub struct SoundEngine {
    backend: Rc<dyn AudioBackend>,
    settings: Cell<AudioSettings>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine")
            .field("settings", &self.settings.get())
            .finish_non_exhaustive()
    }
}

impl SoundEngine {
    pub fn new(backend: Rc<dyn AudioBackend>, settings: AudioSettings) -> Self {
        let engine = Self {
            backend,
            settings: Cell::new(settings),
        };
        engine.push_master_gain();
        engine
    }

    pub fn settings(&self) -> AudioSettings {
        self.settings.get()
    }

    /// Plays `kind` at the optional per-call `volume` (defaults to full).
    ///
    /// Does nothing while muted or when the effective volume is zero.
    pub fn play_sound(&self, kind: SoundKind, volume: Option<f32>) {
        if self.settings.get().muted {
            return;
        }
        let volume = volume.unwrap_or(1.0).clamp(0.0, 1.0);
        if volume <= 0.0 {
            return;
        }
        if let Err(err) = self.try_play(kind, volume) {
            warn!("failed to play `{}` sound: {err}", kind.token());
        }
    }

    /// Sets the master volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&self, volume: f32) {
        self.apply(AudioSettings {
            volume: volume.clamp(0.0, 1.0),
            ..self.settings.get()
        });
    }

    pub fn set_muted(&self, muted: bool) {
        self.apply(AudioSettings {
            muted,
            ..self.settings.get()
        });
    }

    /// Replaces both settings at once and updates the master gain.
    pub fn apply(&self, settings: AudioSettings) {
        let settings = AudioSettings {
            volume: settings.volume.clamp(0.0, 1.0),
            ..settings
        };
        if self.settings.replace(settings) != settings {
            self.push_master_gain();
        }
    }

    fn try_play(&self, kind: SoundKind, volume: f32) -> Result<(), AudioError> {
        let start = self.backend.current_time()?;
        let sound = plan_sound(recipe(kind), start, volume);
        self.backend.play(&sound)
    }

    fn push_master_gain(&self) {
        let gain = self.settings.get().master_gain();
        if let Err(err) = self.backend.set_master_gain(gain) {
            warn!("failed to set master gain to {gain}: {err}");
        }
    }
}
