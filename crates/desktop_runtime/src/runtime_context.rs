//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, runtime effect queue, the system event log
//! and the app catalog. UI composition stays in [`crate::components`].

use desktop_app_contract::{AppIcon, SystemEventSink};
use leptos::*;
use platform_host::{unix_time_ms_now, SoundKind};

use crate::{
    apps::{builtin_catalog, AppCatalog},
    effect_executor,
    host::{DesktopHostContext, TASKBAR_HEIGHT_PX},
    model::{DesktopState, InteractionState, WindowRect},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    system_events::SystemEventLog,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Apps available to the start menu and desktop icons.
    pub catalog: StoredValue<AppCatalog>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Activity log shown in the taskbar flyout.
    pub events: RwSignal<SystemEventLog>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Plays a UI sound outside the reducer, for hover and other view-local feedback.
    pub fn play_sound(&self, kind: SoundKind) {
        self.host.with_value(|host| host.play_sound(kind));
    }

    /// Desktop area above the taskbar.
    pub fn desktop_viewport(&self) -> WindowRect {
        self.host
            .with_value(|host| host.desktop_viewport_rect(TASKBAR_HEIGHT_PX))
    }

    /// Sink that appends to this runtime's [`SystemEventLog`].
    pub fn event_sink(&self) -> SignalEventSink {
        SignalEventSink(self.events)
    }
}

#[derive(Clone, Copy)]
/// [`SystemEventSink`] backed by the runtime's reactive event log.
pub struct SignalEventSink(RwSignal<SystemEventLog>);

impl SystemEventSink for SignalEventSink {
    fn log_event(&self, app_name: &str, icon: &AppIcon, action: &str) {
        let now = unix_time_ms_now();
        self.0
            .update(|log| log.record(app_name, icon, action, now));
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Host bundle assembled by the entry layer; defaults to the browser audio host.
    #[prop(optional)]
    host: Option<DesktopHostContext>,
    children: Children,
) -> impl IntoView {
    let host = store_value(host.unwrap_or_default());
    let catalog = store_value(builtin_catalog());
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let events = create_rw_signal(SystemEventLog::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        let new_effects = reduce_desktop(&mut desktop, &mut ui, action);
        if desktop != previous_desktop {
            state.set(desktop);
        }
        if ui != previous_ui {
            interaction.set(ui);
        }
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        catalog,
        state,
        interaction,
        effects,
        events,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
