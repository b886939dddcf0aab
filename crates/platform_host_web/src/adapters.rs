use platform_host::{AudioBackend, AudioError, NoopAudioBackend, ScheduledSound};

use crate::WebAudioBackend;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters from `platform_host_web`.
    Browser,
    /// Silent placeholder adapters for headless or non-browser hosts.
    DesktopStub,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::DesktopStub
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::DesktopStub => "desktop-stub",
    }
}

/// Adapter enum that erases the concrete audio backend behind [`AudioBackend`].
#[derive(Debug, Clone)]
pub enum AudioBackendAdapter {
    /// Web Audio graph owned by the page.
    Browser(WebAudioBackend),
    /// Silent fallback used when the host has no audio output.
    DesktopStub(NoopAudioBackend),
}

impl AudioBackend for AudioBackendAdapter {
    fn current_time(&self) -> Result<f64, AudioError> {
        match self {
            Self::Browser(backend) => backend.current_time(),
            Self::DesktopStub(backend) => backend.current_time(),
        }
    }

    fn play(&self, sound: &ScheduledSound) -> Result<(), AudioError> {
        match self {
            Self::Browser(backend) => backend.play(sound),
            Self::DesktopStub(backend) => backend.play(sound),
        }
    }

    fn set_master_gain(&self, gain: f32) -> Result<(), AudioError> {
        match self {
            Self::Browser(backend) => backend.set_master_gain(gain),
            Self::DesktopStub(backend) => backend.set_master_gain(gain),
        }
    }
}

/// Builds the audio backend for the selected host strategy with `initial_gain` as master gain.
pub fn audio_backend(initial_gain: f32) -> AudioBackendAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => AudioBackendAdapter::Browser(WebAudioBackend::new(initial_gain)),
        HostStrategy::DesktopStub => AudioBackendAdapter::DesktopStub(NoopAudioBackend),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn host_strategy_name_matches_selected_strategy() {
        let expected = match selected_host_strategy() {
            HostStrategy::Browser => "browser",
            HostStrategy::DesktopStub => "desktop-stub",
        };
        assert_eq!(host_strategy_name(), expected);
    }

    #[test]
    fn audio_backend_follows_selected_strategy() {
        let backend = audio_backend(0.5);
        match selected_host_strategy() {
            HostStrategy::Browser => {
                assert!(matches!(backend, AudioBackendAdapter::Browser(_)))
            }
            HostStrategy::DesktopStub => {
                assert!(matches!(backend, AudioBackendAdapter::DesktopStub(_)))
            }
        }
    }

    #[test]
    fn adapter_forwards_master_gain() {
        let backend = audio_backend(0.5);
        assert_eq!(backend.set_master_gain(0.25), Ok(()));
        if let AudioBackendAdapter::Browser(web) = &backend {
            assert_eq!(web.master_gain(), 0.25);
        }
    }
}
