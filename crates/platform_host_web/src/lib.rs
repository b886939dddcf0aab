//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Today this is the Web Audio backend behind [`platform_host::AudioBackend`], plus the
//! compile-time host strategy that swaps it for a silent stub.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod audio;

pub use adapters::{
    audio_backend, host_strategy_name, selected_host_strategy, AudioBackendAdapter, HostStrategy,
};
pub use audio::WebAudioBackend;
