//! Pure planner from a [`SoundRecipe`] to absolute-time automation events.

use serde::{Deserialize, Serialize};

use super::{FilterKind, FrequencySweep, Ramp, SoundKind, SoundRecipe, Waveform, GAIN_FLOOR};

/// One automation event on an audio parameter, in backend clock seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamEvent {
    /// Jump to `value` at `time`.
    SetValueAt {
        /// Target value.
        value: f32,
        /// Absolute time.
        time: f64,
    },
    /// Linear ramp reaching `value` at `time`.
    LinearRampTo {
        /// Target value.
        value: f32,
        /// Absolute time.
        time: f64,
    },
    /// Exponential ramp reaching `value` at `time`.
    ExponentialRampTo {
        /// Target value.
        value: f32,
        /// Absolute time.
        time: f64,
    },
}

impl ParamEvent {
    /// Returns the target value.
    pub fn value(&self) -> f32 {
        match *self {
            Self::SetValueAt { value, .. }
            | Self::LinearRampTo { value, .. }
            | Self::ExponentialRampTo { value, .. } => value,
        }
    }

    /// Returns the absolute time.
    pub fn time(&self) -> f64 {
        match *self {
            Self::SetValueAt { time, .. }
            | Self::LinearRampTo { time, .. }
            | Self::ExponentialRampTo { time, .. } => time,
        }
    }
}

/// Oscillator node with its frequency automation and lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledOscillator {
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Frequency automation in Hz.
    pub frequency: Vec<ParamEvent>,
    /// Start time.
    pub start: f64,
    /// Stop time.
    pub stop: f64,
}

/// Filter node with its cutoff automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledFilter {
    /// Filter mode.
    pub kind: FilterKind,
    /// Resonance.
    pub q: f32,
    /// Cutoff automation in Hz.
    pub cutoff: Vec<ParamEvent>,
}

/// Fully timed graph for one sound invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSound {
    /// Sound being rendered.
    pub kind: SoundKind,
    /// Oscillators feeding the filter.
    pub oscillators: Vec<ScheduledOscillator>,
    /// Filter feeding the per-sound gain.
    pub filter: ScheduledFilter,
    /// Per-sound gain automation; the node feeds the master gain.
    pub gain: Vec<ParamEvent>,
    /// Time the first node starts.
    pub start: f64,
    /// Time the last node stops.
    pub stop: f64,
}

/// Lays out `recipe` starting at `start` (backend clock seconds) with the per-call `volume`
/// scaling the envelope peak.
///
/// `volume` is clamped to `0.0..=1.0`; callers skip the sound entirely when it is zero.
pub fn plan_sound(recipe: &SoundRecipe, start: f64, volume: f32) -> ScheduledSound {
    let duration = recipe.duration_s;
    let stop = start + duration;

    let oscillators = recipe
        .voices
        .iter()
        .map(|voice| ScheduledOscillator {
            waveform: voice.waveform,
            frequency: sweep_events(voice.frequency, start, duration),
            start,
            stop,
        })
        .collect();

    let filter = ScheduledFilter {
        kind: recipe.filter.kind,
        q: recipe.filter.q,
        cutoff: sweep_events(recipe.filter.cutoff, start, duration),
    };

    ScheduledSound {
        kind: recipe.kind,
        oscillators,
        filter,
        gain: envelope_events(recipe, start, volume.clamp(0.0, 1.0)),
        start,
        stop,
    }
}

fn sweep_events(sweep: FrequencySweep, start: f64, duration: f64) -> Vec<ParamEvent> {
    let mut events = vec![ParamEvent::SetValueAt {
        value: sweep.start_hz,
        time: start,
    }];
    if sweep.is_constant() {
        return events;
    }

    let time = start + sweep.until * duration;
    let value = sweep.end_hz;
    events.push(match sweep.ramp {
        Ramp::Linear => ParamEvent::LinearRampTo { value, time },
        Ramp::Exponential => ParamEvent::ExponentialRampTo { value, time },
        Ramp::Step => ParamEvent::SetValueAt { value, time },
    });
    events
}

fn envelope_events(recipe: &SoundRecipe, start: f64, volume: f32) -> Vec<ParamEvent> {
    let env = recipe.envelope;
    let duration = recipe.duration_s;
    let peak = env.peak * volume;
    let sustain_level = (peak * env.sustain_level).max(GAIN_FLOOR);

    let mut events = vec![ParamEvent::SetValueAt {
        value: peak * env.start_level,
        time: start,
    }];
    let mut cursor = start;

    if env.attack > 0.0 {
        cursor += env.attack * duration;
        events.push(ParamEvent::LinearRampTo {
            value: peak,
            time: cursor,
        });
    }
    if env.decay > 0.0 {
        cursor += env.decay * duration;
        events.push(ParamEvent::ExponentialRampTo {
            value: sustain_level,
            time: cursor,
        });
    }
    if env.sustain > 0.0 {
        cursor += env.sustain * duration;
        events.push(ParamEvent::SetValueAt {
            value: sustain_level,
            time: cursor,
        });
    }
    cursor += env.release * duration;
    events.push(ParamEvent::ExponentialRampTo {
        value: GAIN_FLOOR,
        time: cursor,
    });
    events
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::audio::recipe;

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn open_plan_matches_attack_hold_release_shape() {
        let plan = plan_sound(recipe(SoundKind::Open), 10.0, 1.0);

        assert_eq!(plan.oscillators.len(), 3);
        assert!(close_to(plan.start, 10.0));
        assert!(close_to(plan.stop, 10.55));
        assert_eq!(plan.gain.len(), 4);
        assert_eq!(plan.gain[0].value(), 0.0);
        assert!(matches!(plan.gain[1], ParamEvent::LinearRampTo { .. }));
        assert!(close_to(plan.gain[1].time(), 10.1));
        assert!(matches!(plan.gain[2], ParamEvent::SetValueAt { .. }));
        assert!(close_to(plan.gain[2].time(), 10.2));
        assert_eq!(plan.gain[3].value(), GAIN_FLOOR);
        assert!(close_to(plan.gain[3].time(), 10.5));
    }

    #[test]
    fn frequency_sweeps_end_at_the_recipe_fraction() {
        let plan = plan_sound(recipe(SoundKind::Open), 0.0, 1.0);
        let first = &plan.oscillators[0];

        assert_eq!(
            first.frequency[0],
            ParamEvent::SetValueAt {
                value: 261.63,
                time: 0.0
            }
        );
        assert!(matches!(
            first.frequency[1],
            ParamEvent::ExponentialRampTo { value, .. } if value == 523.25
        ));
        assert!(close_to(first.frequency[1].time(), 0.35));
    }

    #[test]
    fn constant_cutoff_emits_a_single_set_value() {
        let plan = plan_sound(recipe(SoundKind::Hover), 0.0, 1.0);
        assert_eq!(plan.filter.kind, FilterKind::BandPass);
        assert_eq!(plan.filter.q, 10.0);
        assert_eq!(plan.filter.cutoff.len(), 1);
    }

    #[test]
    fn notification_steps_between_notes() {
        let plan = plan_sound(recipe(SoundKind::Notification), 0.0, 1.0);
        assert!(plan
            .oscillators
            .iter()
            .all(|osc| matches!(osc.frequency[1], ParamEvent::SetValueAt { .. })));
    }

    #[test]
    fn per_call_volume_scales_the_peak() {
        let full = plan_sound(recipe(SoundKind::Click), 0.0, 1.0);
        let half = plan_sound(recipe(SoundKind::Click), 0.0, 0.5);
        let louder = plan_sound(recipe(SoundKind::Click), 0.0, 4.0);

        assert!((half.gain[0].value() - full.gain[0].value() * 0.5).abs() < 1e-6);
        assert_eq!(louder.gain[0].value(), full.gain[0].value());
    }

    #[test]
    fn every_plan_ends_at_the_gain_floor_before_stop() {
        for kind in SoundKind::ALL {
            let plan = plan_sound(recipe(kind), 1.0, 1.0);
            let last = plan.gain.last().copied().expect("gain events");
            assert_eq!(last.value(), GAIN_FLOOR, "{}", kind.token());
            assert!(last.time() <= plan.stop + 1e-9);
            assert!(plan
                .gain
                .windows(2)
                .all(|pair| pair[0].time() <= pair[1].time()));
        }
    }
}
