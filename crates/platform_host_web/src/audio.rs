//! Web Audio adapter for the [`platform_host::AudioBackend`] contract.
//!
//! The `AudioContext` and the master gain node are created lazily on first use because browsers
//! only allow audio after a user gesture. Every [`ScheduledSound`] gets its own oscillators,
//! filter and gain node; all of them sum into the shared master gain.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use platform_host::{AudioBackend, AudioError, ScheduledSound};

#[cfg(target_arch = "wasm32")]
struct MasterGraph {
    context: web_sys::AudioContext,
    master: web_sys::GainNode,
}

#[derive(Clone, Default)]
/// Browser audio backend built on `web_sys::AudioContext`.
pub struct WebAudioBackend {
    #[cfg(target_arch = "wasm32")]
    graph: Rc<RefCell<Option<MasterGraph>>>,
    #[cfg(not(target_arch = "wasm32"))]
    graph: Rc<RefCell<Option<()>>>,
    master_gain: Rc<Cell<f32>>,
}

impl std::fmt::Debug for WebAudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebAudioBackend")
            .field("initialized", &self.graph.borrow().is_some())
            .field("master_gain", &self.master_gain.get())
            .finish()
    }
}

impl WebAudioBackend {
    /// Creates a backend whose master gain starts at `initial_gain`.
    pub fn new(initial_gain: f32) -> Self {
        let backend = Self::default();
        backend.master_gain.set(initial_gain.clamp(0.0, 1.0));
        backend
    }

    /// Returns the last master gain requested, whether or not the context exists yet.
    pub fn master_gain(&self) -> f32 {
        self.master_gain.get()
    }
}

/// One connection in a per-sound voice graph.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphLink {
    OscillatorToFilter(usize),
    FilterToGain,
    GainToMaster,
}

/// Wiring order for a sound with `oscillators` voices: sources first, master output last.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn graph_links(oscillators: usize) -> Vec<GraphLink> {
    (0..oscillators)
        .map(GraphLink::OscillatorToFilter)
        .chain([GraphLink::FilterToGain, GraphLink::GainToMaster])
        .collect()
}

#[cfg(target_arch = "wasm32")]
mod web {
    use platform_host::{AudioError, FilterKind, ParamEvent, ScheduledSound, Waveform};
    use wasm_bindgen::JsValue;
    use web_sys::{
        AudioContext, AudioContextState, AudioParam, BiquadFilterType, GainNode, OscillatorType,
    };

    use super::{graph_links, GraphLink, MasterGraph};

    fn graph_err(stage: &str, err: JsValue) -> AudioError {
        AudioError::Graph(format!("{stage}: {err:?}"))
    }

    fn schedule_err(err: JsValue) -> AudioError {
        AudioError::Scheduling(format!("{err:?}"))
    }

    pub(super) fn create_master(initial_gain: f32) -> Result<MasterGraph, AudioError> {
        let context = AudioContext::new()
            .map_err(|err| AudioError::Unavailable(format!("{err:?}")))?;
        let master = context
            .create_gain()
            .map_err(|err| graph_err("create master gain", err))?;
        master
            .connect_with_audio_node(&context.destination())
            .map_err(|err| graph_err("connect master gain", err))?;
        master.gain().set_value(initial_gain);
        Ok(MasterGraph { context, master })
    }

    /// Browsers start contexts suspended until a user gesture; a failed resume means the context
    /// is closed and nothing can play.
    pub(super) fn resume_if_suspended(context: &AudioContext) -> Result<(), AudioError> {
        if context.state() == AudioContextState::Suspended {
            context
                .resume()
                .map_err(|err| AudioError::Unavailable(format!("resume: {err:?}")))?;
        }
        Ok(())
    }

    fn apply_events(param: &AudioParam, events: &[ParamEvent]) -> Result<(), AudioError> {
        for event in events {
            match *event {
                ParamEvent::SetValueAt { value, time } => {
                    param.set_value_at_time(value, time).map_err(schedule_err)?;
                }
                ParamEvent::LinearRampTo { value, time } => {
                    param
                        .linear_ramp_to_value_at_time(value, time)
                        .map_err(schedule_err)?;
                }
                ParamEvent::ExponentialRampTo { value, time } => {
                    param
                        .exponential_ramp_to_value_at_time(value, time)
                        .map_err(schedule_err)?;
                }
            }
        }
        Ok(())
    }

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Square => OscillatorType::Square,
        }
    }

    fn filter_type(kind: FilterKind) -> BiquadFilterType {
        match kind {
            FilterKind::LowPass => BiquadFilterType::Lowpass,
            FilterKind::HighPass => BiquadFilterType::Highpass,
            FilterKind::BandPass => BiquadFilterType::Bandpass,
        }
    }

    /// Nodes are created and scheduled first; they are wired in `graph_links` order, which joins
    /// the master output last.
    pub(super) fn build_and_start(
        graph: &MasterGraph,
        sound: &ScheduledSound,
    ) -> Result<(), AudioError> {
        let context = &graph.context;

        let gain: GainNode = context
            .create_gain()
            .map_err(|err| graph_err("create gain", err))?;
        apply_events(&gain.gain(), &sound.gain)?;

        let filter = context
            .create_biquad_filter()
            .map_err(|err| graph_err("create filter", err))?;
        filter.set_type(filter_type(sound.filter.kind));
        filter.q().set_value(sound.filter.q);
        apply_events(&filter.frequency(), &sound.filter.cutoff)?;

        let mut oscillators = Vec::with_capacity(sound.oscillators.len());
        for scheduled in &sound.oscillators {
            let osc = context
                .create_oscillator()
                .map_err(|err| graph_err("create oscillator", err))?;
            osc.set_type(oscillator_type(scheduled.waveform));
            apply_events(&osc.frequency(), &scheduled.frequency)?;
            oscillators.push((osc, scheduled));
        }

        for link in graph_links(oscillators.len()) {
            match link {
                GraphLink::OscillatorToFilter(index) => {
                    if let Some((osc, _)) = oscillators.get(index) {
                        osc.connect_with_audio_node(&filter)
                            .map_err(|err| graph_err("connect oscillator", err))?;
                    }
                }
                GraphLink::FilterToGain => {
                    filter
                        .connect_with_audio_node(&gain)
                        .map_err(|err| graph_err("connect filter", err))?;
                }
                GraphLink::GainToMaster => {
                    gain.connect_with_audio_node(&graph.master)
                        .map_err(|err| graph_err("connect gain", err))?;
                }
            }
        }

        for (osc, scheduled) in &oscillators {
            osc.start_with_when(scheduled.start).map_err(schedule_err)?;
            osc.stop_with_when(scheduled.stop).map_err(schedule_err)?;
        }
        Ok(())
    }
}

impl WebAudioBackend {
    #[cfg(target_arch = "wasm32")]
    fn with_graph<T>(
        &self,
        f: impl FnOnce(&MasterGraph) -> Result<T, AudioError>,
    ) -> Result<T, AudioError> {
        let mut slot = self.graph.borrow_mut();
        if slot.is_none() {
            *slot = Some(web::create_master(self.master_gain.get())?);
        }
        match slot.as_ref() {
            Some(graph) => {
                web::resume_if_suspended(&graph.context)?;
                f(graph)
            }
            None => Err(AudioError::Unavailable("audio context missing".to_string())),
        }
    }
}

impl AudioBackend for WebAudioBackend {
    fn current_time(&self) -> Result<f64, AudioError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.with_graph(|graph| Ok(graph.context.current_time()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(0.0)
        }
    }

    fn play(&self, sound: &ScheduledSound) -> Result<(), AudioError> {
        #[cfg(target_arch = "wasm32")]
        {
            self.with_graph(|graph| web::build_and_start(graph, sound))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = sound;
            Ok(())
        }
    }

    fn set_master_gain(&self, gain: f32) -> Result<(), AudioError> {
        let gain = gain.clamp(0.0, 1.0);
        self.master_gain.set(gain);

        #[cfg(target_arch = "wasm32")]
        if let Some(graph) = self.graph.borrow().as_ref() {
            graph.master.gain().set_value(gain);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use platform_host::{plan_sound, recipe, SoundKind};

    use super::*;

    #[test]
    fn master_gain_is_clamped_and_remembered_before_first_sound() {
        let backend = WebAudioBackend::new(0.5);
        assert_eq!(backend.master_gain(), 0.5);

        backend.set_master_gain(1.7).expect("set gain");
        assert_eq!(backend.master_gain(), 1.0);

        backend.set_master_gain(-0.2).expect("set gain");
        assert_eq!(backend.master_gain(), 0.0);
    }

    #[test]
    fn clones_share_master_gain_state() {
        let backend = WebAudioBackend::new(0.3);
        let clone = backend.clone();
        clone.set_master_gain(0.8).expect("set gain");
        assert_eq!(backend.master_gain(), 0.8);
    }

    #[test]
    fn native_targets_accept_sounds_silently() {
        let backend = WebAudioBackend::new(0.5);
        let sound = plan_sound(recipe(SoundKind::Click), 0.0, 1.0);
        assert_eq!(backend.play(&sound), Ok(()));
        assert_eq!(backend.current_time(), Ok(0.0));
    }

    #[test]
    fn voice_graph_joins_the_master_output_last() {
        let voices = plan_sound(recipe(SoundKind::Open), 0.0, 1.0).oscillators.len();
        let links = graph_links(voices);

        assert_eq!(links.len(), voices + 2);
        assert_eq!(links.last(), Some(&GraphLink::GainToMaster));
        assert_eq!(
            links
                .iter()
                .filter(|link| **link == GraphLink::GainToMaster)
                .count(),
            1
        );
        assert_eq!(
            graph_links(0),
            vec![GraphLink::FilterToGain, GraphLink::GainToMaster]
        );
    }
}
