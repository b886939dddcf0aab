//! Typed host-domain contracts shared by the desktop runtime and the browser adapters.
//!
//! This crate is the API-first boundary for platform services: the procedural audio contract
//! (recipes, planner, backend trait) and wall-clock helpers. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod audio;
pub mod time;

pub use audio::{
    plan_sound, recipe, recipe_table, AudioBackend, AudioError, Envelope, FilterKind, FilterSpec,
    FrequencySweep, NoopAudioBackend, ParamEvent, Ramp, ScheduledFilter, ScheduledOscillator,
    ScheduledSound, SoundKind, SoundRecipe, Voice, Waveform, GAIN_FLOOR,
};
pub use time::{clock_time_at, unix_time_ms_now, ClockTime};
