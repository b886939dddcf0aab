//! Drains reducer-emitted [`RuntimeEffect`]s through the host in emission order.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the executor that runs queued effects whenever the reducer appends to the queue.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        if runtime.effects.with(Vec::is_empty) {
            return;
        }

        // Take the batch first so effects that dispatch again queue into a fresh one.
        let batch = runtime.effects.try_update(std::mem::take).unwrap_or_default();
        let host = runtime.host.get_value();
        for effect in coalesce_batch(batch) {
            host.run_runtime_effect(runtime, effect);
        }
    });
}

/// Collapses each run of back-to-back audio settings into its last value.
///
/// Volume slider drags emit one settings effect per input event; only the final value of a run
/// needs to reach the master gain. Runs split by any other effect are kept apart so a sound queued
/// between them plays with the settings in force at that point.
fn coalesce_batch(batch: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    let mut drained: Vec<RuntimeEffect> = Vec::with_capacity(batch.len());
    for effect in batch {
        if let (
            RuntimeEffect::ApplyAudioSettings(next),
            Some(RuntimeEffect::ApplyAudioSettings(previous)),
        ) = (&effect, drained.last_mut())
        {
            *previous = *next;
            continue;
        }
        drained.push(effect);
    }
    drained
}

#[cfg(test)]
mod tests {
    use platform_host::SoundKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AudioSettings;

    fn volume(volume: f32, muted: bool) -> RuntimeEffect {
        RuntimeEffect::ApplyAudioSettings(AudioSettings { volume, muted })
    }

    #[test]
    fn back_to_back_settings_keep_only_the_last() {
        let drained = coalesce_batch(vec![
            volume(0.1, false),
            volume(0.2, false),
            volume(0.3, false),
        ]);
        assert_eq!(drained, vec![volume(0.3, false)]);
    }

    #[test]
    fn sounds_split_settings_runs_and_keep_their_order() {
        let click = RuntimeEffect::PlaySound(SoundKind::Click);
        let drained = coalesce_batch(vec![
            volume(0.5, true),
            volume(0.5, false),
            click.clone(),
            volume(0.7, false),
        ]);
        assert_eq!(drained, vec![volume(0.5, false), click, volume(0.7, false)]);
    }

    #[test]
    fn empty_batch_stays_empty() {
        assert!(coalesce_batch(Vec::new()).is_empty());
    }
}
