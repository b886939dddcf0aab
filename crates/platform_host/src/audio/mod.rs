//! Procedural UI sound contracts: recipe types, the recipe table, the schedule planner, and the
//! backend trait that turns a [`ScheduledSound`] into a live audio graph.
//!
//! Nothing in this module touches an audio device. Concrete backends live in
//! `platform_host_web`.

mod recipes;
mod schedule;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use recipes::{recipe, recipe_table};
pub use schedule::{plan_sound, ParamEvent, ScheduledFilter, ScheduledOscillator, ScheduledSound};

/// Gain value exponential ramps decay toward; Web Audio cannot ramp exponentially to zero.
pub const GAIN_FLOOR: f32 = 0.001;

/// UI event a sound is synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundKind {
    /// Pointer entering an interactive element.
    Hover,
    /// Button press.
    Click,
    /// Window opened.
    Open,
    /// Window closed.
    Close,
    /// Window minimized.
    Minimize,
    /// Window maximized or restored from maximized.
    Maximize,
    /// Session start.
    Login,
    /// Positive confirmation.
    Success,
    /// Failure or rejection.
    Error,
    /// Passive attention cue.
    Notification,
}

impl SoundKind {
    /// Every kind, in declaration order.
    pub const ALL: [SoundKind; 10] = [
        Self::Hover,
        Self::Click,
        Self::Open,
        Self::Close,
        Self::Minimize,
        Self::Maximize,
        Self::Login,
        Self::Success,
        Self::Error,
        Self::Notification,
    ];

    /// Returns a stable string token.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Click => "click",
            Self::Open => "open",
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Login => "login",
            Self::Success => "success",
            Self::Error => "error",
            Self::Notification => "notification",
        }
    }
}

/// Periodic oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    /// Pure tone.
    Sine,
    /// Soft odd-harmonic tone.
    Triangle,
    /// Bright all-harmonic tone.
    Sawtooth,
    /// Hollow odd-harmonic tone.
    Square,
}

/// Biquad filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Attenuates above the cutoff.
    LowPass,
    /// Attenuates below the cutoff.
    HighPass,
    /// Keeps a band around the cutoff.
    BandPass,
}

/// Shape of a parameter change from its start value to its end value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ramp {
    /// Straight-line interpolation.
    Linear,
    /// Constant-ratio interpolation; both endpoints must be positive.
    Exponential,
    /// Jump to the end value at the end time.
    Step,
}

/// Parameter trajectory from `start_hz` to `end_hz`, reaching the end at `until` (fraction of the
/// sound duration).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySweep {
    /// Value at the sound start.
    pub start_hz: f32,
    /// Value at `until`.
    pub end_hz: f32,
    /// Interpolation shape.
    pub ramp: Ramp,
    /// End of the sweep as a fraction of duration.
    pub until: f64,
}

impl FrequencySweep {
    /// Returns `true` when the sweep never changes value.
    pub fn is_constant(&self) -> bool {
        self.start_hz == self.end_hz
    }

    /// Returns `true` when the end value is above the start value.
    pub fn is_ascending(&self) -> bool {
        self.end_hz > self.start_hz
    }
}

/// One oscillator of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Frequency trajectory.
    pub frequency: FrequencySweep,
}

/// Filter shared by all voices of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Filter mode.
    pub kind: FilterKind,
    /// Cutoff trajectory in Hz.
    pub cutoff: FrequencySweep,
    /// Resonance.
    pub q: f32,
}

/// Attack-decay-sustain-release amplitude envelope.
///
/// `attack`, `decay`, `sustain` and `release` are fractions of the recipe duration and are laid
/// out back to back from the sound start; their sum must not exceed 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Peak gain before master volume.
    pub peak: f32,
    /// Gain at the sound start as a fraction of `peak`.
    pub start_level: f32,
    /// Linear rise to `peak`.
    pub attack: f64,
    /// Exponential fall to `sustain_level`.
    pub decay: f64,
    /// Sustain level as a fraction of `peak`.
    pub sustain_level: f32,
    /// Hold at the sustain level.
    pub sustain: f64,
    /// Exponential fall to [`GAIN_FLOOR`].
    pub release: f64,
}

impl Envelope {
    /// Returns the fraction of duration covered by all segments.
    pub fn total(&self) -> f64 {
        self.attack + self.decay + self.sustain + self.release
    }
}

/// Complete declarative description of one sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundRecipe {
    /// Sound this recipe renders.
    pub kind: SoundKind,
    /// Total length in seconds; oscillators stop at the end.
    pub duration_s: f64,
    /// Oscillators summed into the filter.
    pub voices: &'static [Voice],
    /// Filter between the voices and the per-sound gain.
    pub filter: FilterSpec,
    /// Per-sound gain envelope.
    pub envelope: Envelope,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failures raised while building or driving an audio graph.
pub enum AudioError {
    /// The platform has no usable audio subsystem.
    #[error("audio subsystem unavailable: {0}")]
    Unavailable(String),
    /// A node could not be created or connected.
    #[error("audio graph construction failed: {0}")]
    Graph(String),
    /// A parameter automation event was rejected.
    #[error("audio parameter scheduling failed: {0}")]
    Scheduling(String),
}

/// Host service that realizes planned sounds on an audio device.
pub trait AudioBackend {
    /// Returns the backend clock in seconds used as the schedule origin.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::Unavailable`] when no audio context can be created.
    fn current_time(&self) -> Result<f64, AudioError>;

    /// Builds the oscillator graph for `sound`, connects it into the master gain, and starts it.
    ///
    /// # Errors
    ///
    /// Returns an [`AudioError`] when any node or automation event is rejected.
    fn play(&self, sound: &ScheduledSound) -> Result<(), AudioError>;

    /// Sets the master gain every sound is routed through.
    ///
    /// # Errors
    ///
    /// Returns an [`AudioError`] when the master node is unavailable.
    fn set_master_gain(&self, gain: f32) -> Result<(), AudioError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent backend for targets without audio.
pub struct NoopAudioBackend;

impl AudioBackend for NoopAudioBackend {
    fn current_time(&self) -> Result<f64, AudioError> {
        Ok(0.0)
    }

    fn play(&self, _sound: &ScheduledSound) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_master_gain(&self, _gain: f32) -> Result<(), AudioError> {
        Ok(())
    }
}
