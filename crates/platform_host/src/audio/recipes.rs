//! Declarative recipe table for every [`SoundKind`].
//!
//! Timings are fractions of the recipe duration so a recipe can be scaled without touching the
//! planner.

use super::{
    Envelope, FilterKind, FilterSpec, FrequencySweep, Ramp, SoundKind, SoundRecipe, Voice,
    Waveform,
};

const fn sweep(start_hz: f32, end_hz: f32, ramp: Ramp, until: f64) -> FrequencySweep {
    FrequencySweep {
        start_hz,
        end_hz,
        ramp,
        until,
    }
}

const fn voice(waveform: Waveform, frequency: FrequencySweep) -> Voice {
    Voice {
        waveform,
        frequency,
    }
}

const fn fixed(hz: f32) -> FrequencySweep {
    sweep(hz, hz, Ramp::Step, 0.0)
}

const HOVER: SoundRecipe = SoundRecipe {
    kind: SoundKind::Hover,
    duration_s: 0.1,
    voices: &[voice(
        Waveform::Sine,
        sweep(600.0, 1200.0, Ramp::Exponential, 0.6),
    )],
    filter: FilterSpec {
        kind: FilterKind::BandPass,
        cutoff: fixed(2000.0),
        q: 10.0,
    },
    envelope: Envelope {
        peak: 0.015,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.8,
    },
};

const CLICK: SoundRecipe = SoundRecipe {
    kind: SoundKind::Click,
    duration_s: 0.15,
    voices: &[
        voice(
            Waveform::Triangle,
            sweep(2400.0, 1200.0, Ramp::Exponential, 0.08 / 0.15),
        ),
        voice(
            Waveform::Sine,
            sweep(3600.0, 1800.0, Ramp::Exponential, 0.06 / 0.15),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::HighPass,
        cutoff: fixed(800.0),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.08,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.8,
    },
};

// C4-E4-G4 rising an octave.
const OPEN: SoundRecipe = SoundRecipe {
    kind: SoundKind::Open,
    duration_s: 0.55,
    voices: &[
        voice(
            Waveform::Sine,
            sweep(261.63, 523.25, Ramp::Exponential, 0.35 / 0.55),
        ),
        voice(
            Waveform::Sine,
            sweep(329.63, 659.25, Ramp::Exponential, 0.35 / 0.55),
        ),
        voice(
            Waveform::Sine,
            sweep(392.0, 783.99, Ramp::Exponential, 0.35 / 0.55),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::LowPass,
        cutoff: fixed(3000.0),
        q: 2.0,
    },
    envelope: Envelope {
        peak: 0.06,
        start_level: 0.0,
        attack: 0.1 / 0.55,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.1 / 0.55,
        release: 0.3 / 0.55,
    },
};

const CLOSE: SoundRecipe = SoundRecipe {
    kind: SoundKind::Close,
    duration_s: 0.35,
    voices: &[
        voice(
            Waveform::Sine,
            sweep(800.0, 200.0, Ramp::Exponential, 0.25 / 0.35),
        ),
        voice(
            Waveform::Triangle,
            sweep(1200.0, 300.0, Ramp::Exponential, 0.25 / 0.35),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::LowPass,
        cutoff: sweep(2000.0, 200.0, Ramp::Exponential, 0.3 / 0.35),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.05,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.3 / 0.35,
    },
};

const MINIMIZE: SoundRecipe = SoundRecipe {
    kind: SoundKind::Minimize,
    duration_s: 0.3,
    voices: &[voice(
        Waveform::Sine,
        sweep(800.0, 300.0, Ramp::Exponential, 0.2 / 0.3),
    )],
    filter: FilterSpec {
        kind: FilterKind::LowPass,
        cutoff: fixed(1500.0),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.04,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.25 / 0.3,
    },
};

const MAXIMIZE: SoundRecipe = SoundRecipe {
    kind: SoundKind::Maximize,
    duration_s: 0.35,
    voices: &[
        voice(
            Waveform::Sine,
            sweep(400.0, 1000.0, Ramp::Exponential, 0.2 / 0.35),
        ),
        voice(
            Waveform::Sine,
            sweep(600.0, 1500.0, Ramp::Exponential, 0.2 / 0.35),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::HighPass,
        cutoff: fixed(400.0),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.05,
        start_level: 0.6,
        attack: 0.1 / 0.35,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.2 / 0.35,
    },
};

// Sub bass, mid and shimmer voices all rise one octave under an opening low-pass.
const LOGIN: SoundRecipe = SoundRecipe {
    kind: SoundKind::Login,
    duration_s: 2.5,
    voices: &[
        voice(Waveform::Sawtooth, sweep(55.0, 110.0, Ramp::Linear, 0.6)),
        voice(Waveform::Sine, sweep(220.0, 440.0, Ramp::Linear, 0.6)),
        voice(Waveform::Sine, sweep(440.0, 880.0, Ramp::Linear, 0.6)),
    ],
    filter: FilterSpec {
        kind: FilterKind::LowPass,
        cutoff: sweep(400.0, 2000.0, Ramp::Exponential, 0.6),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.08,
        start_level: 0.0,
        attack: 0.2,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.2,
        release: 0.6,
    },
};

const SUCCESS: SoundRecipe = SoundRecipe {
    kind: SoundKind::Success,
    duration_s: 0.45,
    voices: &[
        voice(
            Waveform::Sine,
            sweep(523.25, 1046.5, Ramp::Linear, 0.15 / 0.45),
        ),
        voice(
            Waveform::Sine,
            sweep(659.25, 1318.5, Ramp::Linear, 0.15 / 0.45),
        ),
        voice(
            Waveform::Sine,
            sweep(783.99, 1567.98, Ramp::Linear, 0.15 / 0.45),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::HighPass,
        cutoff: fixed(300.0),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.06,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.4 / 0.45,
    },
};

// 200 Hz against 185 Hz beats audibly while both fall.
const ERROR: SoundRecipe = SoundRecipe {
    kind: SoundKind::Error,
    duration_s: 0.55,
    voices: &[
        voice(
            Waveform::Sawtooth,
            sweep(200.0, 60.0, Ramp::Exponential, 0.4 / 0.55),
        ),
        voice(
            Waveform::Sine,
            sweep(185.0, 55.0, Ramp::Exponential, 0.4 / 0.55),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::LowPass,
        cutoff: sweep(800.0, 100.0, Ramp::Exponential, 0.4 / 0.55),
        q: 1.0,
    },
    envelope: Envelope {
        peak: 0.08,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.0,
        release: 0.5 / 0.55,
    },
};

const NOTIFICATION: SoundRecipe = SoundRecipe {
    kind: SoundKind::Notification,
    duration_s: 0.55,
    voices: &[
        voice(
            Waveform::Sine,
            sweep(880.0, 1174.66, Ramp::Step, 0.15 / 0.55),
        ),
        voice(
            Waveform::Sine,
            sweep(1318.51, 1760.0, Ramp::Step, 0.15 / 0.55),
        ),
    ],
    filter: FilterSpec {
        kind: FilterKind::BandPass,
        cutoff: fixed(1500.0),
        q: 5.0,
    },
    envelope: Envelope {
        peak: 0.04,
        start_level: 1.0,
        attack: 0.0,
        decay: 0.0,
        sustain_level: 1.0,
        sustain: 0.14 / 0.55,
        release: 0.36 / 0.55,
    },
};

static RECIPES: [SoundRecipe; 10] = [
    HOVER,
    CLICK,
    OPEN,
    CLOSE,
    MINIMIZE,
    MAXIMIZE,
    LOGIN,
    SUCCESS,
    ERROR,
    NOTIFICATION,
];

/// Returns every recipe in [`SoundKind::ALL`] order.
pub fn recipe_table() -> &'static [SoundRecipe] {
    &RECIPES
}

/// Returns the recipe for `kind`.
pub fn recipe(kind: SoundKind) -> &'static SoundRecipe {
    // Table order mirrors the enum declaration order.
    &RECIPES[kind as usize]
}
