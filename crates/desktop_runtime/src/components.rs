//! Desktop shell UI composition and interaction surfaces.

mod login;
mod search;
mod start_menu;
mod taskbar;
mod window;

use desktop_app_contract::Renderable;
use leptos::{leptos_dom::helpers::WindowListenerHandle, *};
use platform_host::SoundKind;

use self::{
    login::LoginScreen, search::SearchOverlay, start_menu::StartMenu, taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    model::{InteractionState, PointerPosition, WindowId},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

/// Stacking base for window layers; the start menu and taskbar sit above every window.
const WINDOW_Z_BASE: i32 = 10;

type PointerListeners = [WindowListenerHandle; 3];

#[component]
/// Root desktop shell: the login gate, then the desktop surface with windows and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <div
            id="desktop-shell-root"
            class=move || format!("desktop-shell {}", state.with(|s| s.theme.css_class()))
        >
            <Show
                when=move || state.with(|s| s.session.logged_in)
                fallback=|| view! { <LoginScreen /> }
            >
                <DesktopSurface />
            </Show>
        </div>
    }
}

#[component]
fn DesktopSurface() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    install_pointer_tracking(runtime);

    let window_ids = move || {
        state.with(|s| {
            s.registry
                .windows()
                .iter()
                .map(|win| win.id)
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="desktop-backdrop">
            <div
                class="desktop-dismiss-layer"
                on:mousedown=move |_| {
                    runtime.dispatch_action(DesktopAction::CloseStartMenu);
                    runtime.dispatch_action(DesktopAction::CloseSearch);
                }
            />
            <DesktopIconGrid />
            <div class="desktop-window-layer">
                <For each=window_ids key=|window_id| window_id.0 let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <StartMenu />
            <SearchOverlay />
        </div>
        <Taskbar />
    }
}

#[component]
fn DesktopIconGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let apps = runtime.catalog.with_value(|catalog| {
        catalog
            .desktop_apps()
            .map(|app| app.app_summary())
            .collect::<Vec<_>>()
    });

    view! {
        <div class="desktop-icon-grid">
            {apps
                .into_iter()
                .map(|app| {
                    let label = app.name.clone();
                    let icon = app.icon.render();
                    let color = app.color.as_str().to_string();
                    view! {
                        <button
                            class="desktop-icon"
                            aria-label=format!("Open {label}")
                            on:mouseenter=move |_| runtime.play_sound(SoundKind::Hover)
                            on:click=move |_| {
                                runtime.play_sound(SoundKind::Click);
                                runtime
                                    .dispatch_action(DesktopAction::OpenApp {
                                        app: app.clone(),
                                        viewport: runtime.desktop_viewport(),
                                    });
                            }
                        >
                            <span class=format!("desktop-icon-tile {color}")>{icon}</span>
                            <span class="desktop-icon-label">{label.clone()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Attaches `window` pointer listeners while a drag or resize is active and drops them as soon as
/// it ends.
fn install_pointer_tracking(runtime: DesktopRuntimeContext) {
    let listeners = store_value(None::<PointerListeners>);
    let active = create_memo(move |_| runtime.interaction.with(InteractionState::is_active));

    create_effect(move |_| {
        if active.get() {
            if listeners.with_value(Option::is_none) {
                listeners.set_value(Some(attach_pointer_listeners(runtime, listeners)));
            }
        } else {
            detach_pointer_listeners(listeners);
        }
    });

    on_cleanup(move || detach_pointer_listeners(listeners));
}

fn attach_pointer_listeners(
    runtime: DesktopRuntimeContext,
    listeners: StoredValue<Option<PointerListeners>>,
) -> PointerListeners {
    let on_move = window_event_listener(ev::pointermove, move |ev| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();
        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    });
    let on_up = window_event_listener(ev::pointerup, move |_| {
        end_active_pointer_interaction(runtime, listeners)
    });
    let on_cancel = window_event_listener(ev::pointercancel, move |_| {
        end_active_pointer_interaction(runtime, listeners)
    });
    [on_move, on_up, on_cancel]
}

fn detach_pointer_listeners(listeners: StoredValue<Option<PointerListeners>>) {
    if let Some(Some(handles)) = listeners.try_update_value(Option::take) {
        for handle in handles {
            handle.remove();
        }
    }
}

fn end_active_pointer_interaction(
    runtime: DesktopRuntimeContext,
    listeners: StoredValue<Option<PointerListeners>>,
) {
    detach_pointer_listeners(listeners);
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary-button mouse presses and primary touch/pen contacts only.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn window_z_index(stack_position: Option<usize>) -> i32 {
    WINDOW_Z_BASE + stack_position.map(|index| index as i32).unwrap_or(0)
}

fn taskbar_window_button_dom_id(window_id: WindowId) -> String {
    format!("taskbar-window-button-{}", window_id.0)
}
