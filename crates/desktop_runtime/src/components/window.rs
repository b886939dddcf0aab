use std::time::Duration;

use super::*;
use crate::{
    model::ResizeEdge,
    window_lifecycle::{LifecycleEffect, LifecycleEvent, WindowLifecycle},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Length of the window entrance animation.
const ENTRANCE_ANIMATION_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerGesture {
    Drag,
    Resize,
}

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn run_lifecycle(
    runtime: DesktopRuntimeContext,
    lifecycle: RwSignal<WindowLifecycle>,
    window_id: WindowId,
    event: LifecycleEvent,
) {
    let Some(effects) = lifecycle.try_update(|machine| machine.handle(event)) else {
        return;
    };
    for effect in effects {
        match effect {
            LifecycleEffect::PlaySound(kind) => runtime.play_sound(kind),
            LifecycleEffect::SetMaximized(maximized) => {
                runtime.dispatch_action(DesktopAction::SetMaximized {
                    window_id,
                    maximized,
                })
            }
            commit @ LifecycleEffect::CommitMinimize { after_ms } => {
                commit_after(lifecycle, after_ms, commit, move || {
                    runtime.dispatch_action(DesktopAction::ToggleMinimize { window_id })
                })
            }
            commit @ LifecycleEffect::CommitClose { after_ms } => {
                commit_after(lifecycle, after_ms, commit, move || {
                    runtime.dispatch_action(DesktopAction::CloseWindow { window_id })
                })
            }
        }
    }
}

/// Runs `apply` once the exit animation has played, unless the window stopped awaiting `commit`.
fn commit_after(
    lifecycle: RwSignal<WindowLifecycle>,
    after_ms: u32,
    commit: LifecycleEffect,
    apply: impl FnOnce() + 'static,
) {
    set_timeout(
        move || {
            if lifecycle.try_with_untracked(|machine| machine.commit_due(commit)) == Some(true) {
                apply();
            }
        },
        Duration::from_millis(u64::from(after_ms)),
    );
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let lifecycle = create_rw_signal(WindowLifecycle::new());
    let run = move |event| run_lifecycle(runtime, lifecycle, window_id, event);

    let window = create_memo(move |_| runtime.state.with(|s| s.window(window_id).cloned()));
    let minimized =
        create_memo(move |_| window.with(|win| win.as_ref().is_some_and(|w| w.minimized)));
    let maximized =
        create_memo(move |_| runtime.state.with(|s| s.registry.is_maximized(window_id)));
    let z_index = create_memo(move |_| {
        runtime.state.with(|s| {
            window_z_index(
                s.registry
                    .render_order()
                    .iter()
                    .position(|win| win.id == window_id),
            )
        })
    });
    let gesture = create_memo(move |_| {
        runtime.interaction.with(|ui| {
            if ui.dragging.as_ref().is_some_and(|d| d.window_id == window_id) {
                Some(PointerGesture::Drag)
            } else if ui.resizing.as_ref().is_some_and(|r| r.window_id == window_id) {
                Some(PointerGesture::Resize)
            } else {
                None
            }
        })
    });

    run(LifecycleEvent::Mounted);
    set_timeout(
        move || run(LifecycleEvent::EntranceFinished),
        Duration::from_millis(ENTRANCE_ANIMATION_MS),
    );

    create_effect(move |previous: Option<(bool, bool)>| {
        let current = (minimized.get(), maximized.get());
        if let Some((was_minimized, was_maximized)) = previous {
            if was_minimized && !current.0 {
                run(LifecycleEvent::Shown {
                    maximized: current.1,
                });
            }
            if was_maximized != current.1 {
                run(LifecycleEvent::MaximizedChanged(current.1));
            }
        }
        current
    });

    create_effect(move |previous: Option<Option<PointerGesture>>| {
        let current = gesture.get();
        match (previous.flatten(), current) {
            (None, Some(PointerGesture::Drag)) => run(LifecycleEvent::DragStarted),
            (None, Some(PointerGesture::Resize)) => run(LifecycleEvent::ResizeStarted),
            (Some(_), None) => run(LifecycleEvent::PointerReleased),
            _ => {}
        }
        current
    });

    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) || maximized.get_untracked() {
            return;
        }
        if !lifecycle.with_untracked(WindowLifecycle::can_drag) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    let class_name = move || {
        let mut class = format!(
            "desktop-window window-{}",
            lifecycle.with(WindowLifecycle::css_state)
        );
        if minimized.get() {
            class.push_str(" minimized");
        }
        if maximized.get() {
            class.push_str(" maximized");
        }
        class
    };
    let style = move || {
        let z = z_index.get();
        if minimized.get() {
            return "display:none;".to_string();
        }
        if maximized.get() {
            return format!("left:0;top:0;width:100%;height:100%;z-index:{z};");
        }
        window.with(|win| {
            win.as_ref()
                .map(|w| {
                    format!(
                        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{z};",
                        w.rect.x, w.rect.y, w.rect.w, w.rect.h
                    )
                })
                .unwrap_or_default()
        })
    };

    let Some(record) = window.get_untracked() else {
        return ().into_view();
    };
    let title = record.app.name.clone();
    let icon = record.app.icon.render();
    let body = runtime
        .catalog
        .with_value(|catalog| catalog.render_content(&record.app.id));

    view! {
        <section
            class=class_name
            style=style
            role="dialog"
            aria-label=title.clone()
            aria-hidden=move || minimized.get().to_string()
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev: web_sys::MouseEvent| {
                    stop_mouse_event(&ev);
                    run(LifecycleEvent::MaximizeToggled);
                }
            >
                <div class="titlebar-title">
                    <span class="titlebar-app-icon">{icon}</span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <WindowControl
                        label=Signal::derive(|| "Minimize window")
                        glyph="_"
                        on_press=Callback::new(move |_| run(LifecycleEvent::MinimizeRequested))
                    />
                    <WindowControl
                        label=Signal::derive(move || {
                            if maximized.get() { "Restore window" } else { "Maximize window" }
                        })
                        glyph="□"
                        on_press=Callback::new(move |_| run(LifecycleEvent::MaximizeToggled))
                    />
                    <WindowControl
                        label=Signal::derive(|| "Close window")
                        glyph="×"
                        on_press=Callback::new(move |_| run(LifecycleEvent::CloseRequested))
                    />
                </div>
            </header>
            <div class="window-body">{body}</div>
            <Show when=move || !maximized.get() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id lifecycle edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
    .into_view()
}

#[component]
fn WindowControl(
    label: Signal<&'static str>,
    glyph: &'static str,
    on_press: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="titlebar-button"
            aria-label=move || label.get()
            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
            on:dblclick=move |ev| stop_mouse_event(&ev)
            on:click=move |ev| {
                stop_mouse_event(&ev);
                on_press.call(());
            }
        >
            {glyph}
        </button>
    }
}

#[component]
fn WindowResizeHandle(
    window_id: WindowId,
    lifecycle: RwSignal<WindowLifecycle>,
    edge: ResizeEdge,
) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) || !lifecycle.with_untracked(WindowLifecycle::can_resize) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div
            class=format!("window-resize-handle edge-{}", edge.token())
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}
