//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Effect execution and viewport queries sit behind [`DesktopHostContext`] so the reducer stays
//! pure and the audio backend can be swapped at the entry layer.

use std::rc::Rc;

use desktop_app_contract::SystemEventSink;
use platform_host::{AudioBackend, SoundKind};
use platform_host_web::audio_backend;

use crate::{
    audio::SoundEngine,
    model::{AudioSettings, WindowRect},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

/// Height reserved for the floating taskbar when it is visible.
pub const TASKBAR_HEIGHT_PX: i32 = 80;

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    sounds: Rc<SoundEngine>,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        let settings = AudioSettings::default();
        Self::new(Rc::new(audio_backend(settings.master_gain())), settings)
    }
}

impl DesktopHostContext {
    /// Builds a host around an explicit audio backend.
    pub fn new(backend: Rc<dyn AudioBackend>, settings: AudioSettings) -> Self {
        Self {
            sounds: Rc::new(SoundEngine::new(backend, settings)),
        }
    }

    /// Plays a UI sound at full per-call volume.
    pub fn play_sound(&self, kind: SoundKind) {
        self.sounds.play_sound(kind, None);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PlaySound(kind) => self.play_sound(kind),
            RuntimeEffect::LogSystemEvent {
                app_name,
                icon,
                action,
            } => runtime.event_sink().log_event(&app_name, &icon, &action),
            RuntimeEffect::ApplyAudioSettings(settings) => self.apply_audio_settings(settings),
        }
    }

    /// Pushes volume/mute changes to the sound engine.
    pub fn apply_audio_settings(&self, settings: AudioSettings) {
        self.sounds.apply(settings);
    }

    /// Desktop area above the taskbar, used for placing and organizing windows.
    pub fn desktop_viewport_rect(&self, taskbar_height_px: i32) -> WindowRect {
        browser_viewport_rect(taskbar_height_px)
    }
}

fn browser_viewport_rect(taskbar_height_px: i32) -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);

            return WindowRect {
                x: 0,
                y: 0,
                w: width.max(320),
                h: (height - taskbar_height_px).max(220),
            };
        }
    }

    WindowRect {
        x: 0,
        y: 0,
        w: 1024,
        h: 768 - taskbar_height_px,
    }
}
