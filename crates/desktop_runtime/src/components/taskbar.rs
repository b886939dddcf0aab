use std::time::Duration;

use platform_host::{clock_time_at, unix_time_ms_now};

use super::*;
use crate::system_events::SystemEvent;

fn clock_text_now() -> String {
    clock_time_at(unix_time_ms_now()).hh_mm()
}

fn taskbar_window_aria_label(name: &str, minimized: bool) -> String {
    if minimized {
        format!("{name} (minimized)")
    } else {
        name.to_string()
    }
}

/// Reads the slider position (`0..=100`) as a master volume.
fn volume_from_slider(raw: &str) -> Option<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| (value / 100.0).clamp(0.0, 1.0))
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let hidden = create_memo(move |_| state.with(|s| s.taskbar_hidden()));

    let taskbar_windows = move || {
        state.with(|s| {
            s.registry
                .windows()
                .iter()
                .map(|win| (win.id, win.app.clone(), win.minimized))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <footer
            class=move || if hidden.get() { "taskbar taskbar-hidden" } else { "taskbar" }
            style=move || if hidden.get() { "transform:translateY(calc(100% - 4px));" } else { "" }
            role="toolbar"
            aria-label="Taskbar"
        >
            <button
                class=move || {
                    if state.with(|s| s.start_menu_open) {
                        "taskbar-start open"
                    } else {
                        "taskbar-start"
                    }
                }
                aria-label="Start"
                aria-expanded=move || state.with(|s| s.start_menu_open).to_string()
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
            >
                "◆"
            </button>
            <button
                class=move || {
                    if state.with(|s| s.search_open) { "taskbar-search open" } else { "taskbar-search" }
                }
                aria-label="Search apps"
                aria-expanded=move || state.with(|s| s.search_open).to_string()
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleSearch)
            >
                "⌕"
            </button>

            <div class="taskbar-windows">
                <For
                    each=taskbar_windows
                    key=|(window_id, _, minimized)| (window_id.0, *minimized)
                    let:entry
                >
                    {{
                        let (window_id, app, minimized) = entry;
                        view! {
                            <button
                                id=taskbar_window_button_dom_id(window_id)
                                class=if minimized {
                                    "taskbar-window minimized"
                                } else {
                                    "taskbar-window"
                                }
                                aria-label=taskbar_window_aria_label(&app.name, minimized)
                                on:click=move |_| {
                                    runtime
                                        .dispatch_action(DesktopAction::ActivateTaskbarWindow {
                                            window_id,
                                        })
                                }
                            >
                                {app.icon.render()}
                                <span class="taskbar-window-label">{app.name.clone()}</span>
                            </button>
                        }
                    }}
                </For>
            </div>

            <div class="taskbar-tray">
                <button
                    class="taskbar-tray-button"
                    aria-label="Organize windows"
                    on:click=move |_| {
                        runtime
                            .dispatch_action(DesktopAction::OrganizeWindows {
                                viewport: runtime.desktop_viewport(),
                            })
                    }
                >
                    "▦"
                </button>
                <button
                    class="taskbar-tray-button"
                    aria-label=move || {
                        format!(
                            "Switch to {} theme",
                            state.with(|s| s.theme.toggled().label()),
                        )
                    }
                    on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleTheme)
                >
                    {move || state.with(|s| s.theme.label())}
                </button>
                <AudioControl />
                <ActivityFlyout />
                <TaskbarClock />
            </div>
        </footer>
    }
}

#[component]
fn AudioControl() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let audio = create_memo(move |_| runtime.state.with(|s| s.audio));

    view! {
        <div class="taskbar-audio">
            <button
                class="taskbar-tray-button"
                aria-label=move || if audio.get().muted { "Unmute" } else { "Mute" }
                aria-pressed=move || audio.get().muted.to_string()
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleMuted)
            >
                {move || if audio.get().muted { "🔇" } else { "🔊" }}
            </button>
            <input
                type="range"
                min="0"
                max="100"
                step="1"
                aria-label="Volume"
                prop:value=move || audio.get().volume_percent().to_string()
                prop:disabled=move || audio.get().muted
                on:input=move |ev| {
                    if let Some(volume) = volume_from_slider(&event_target_value(&ev)) {
                        runtime.dispatch_action(DesktopAction::SetVolume { volume });
                    }
                }
            />
            <span class="taskbar-audio-value">
                {move || format!("{}%", audio.get().volume_percent())}
            </span>
        </div>
    }
}

#[component]
fn ActivityFlyout() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let open = create_rw_signal(false);
    let recent = move || {
        runtime
            .events
            .with(|log| log.events().rev().cloned().collect::<Vec<SystemEvent>>())
    };

    view! {
        <div class="taskbar-activity">
            <button
                class="taskbar-tray-button"
                aria-label="Recent activity"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|value| *value = !*value)
            >
                {move || runtime.events.with(|log| log.len())}
            </button>
            <Show when=move || open.get() fallback=|| ()>
                <div class="activity-flyout" role="log">
                    <Show
                        when=move || runtime.events.with(|log| !log.is_empty())
                        fallback=|| view! { <p class="activity-empty">"No recent activity"</p> }
                    >
                        <ul>
                            {move || {
                                recent()
                                    .into_iter()
                                    .map(|event| {
                                        view! {
                                            <li class="activity-entry">
                                                <span class="activity-time">{event.time.clone()}</span>
                                                {event.icon.render()}
                                                <span class="activity-app">{event.app.clone()}</span>
                                                <span class="activity-action">{event.action.clone()}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn TaskbarClock() -> impl IntoView {
    let now = create_rw_signal(clock_text_now());

    if let Ok(interval) = set_interval_with_handle(
        move || now.set(clock_text_now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <time class="taskbar-clock" aria-label=move || format!("Time {}", now.get())>
            {move || now.get()}
        </time>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn slider_values_map_to_clamped_volume() {
        assert_eq!(volume_from_slider("50"), Some(0.5));
        assert_eq!(volume_from_slider(" 100 "), Some(1.0));
        assert_eq!(volume_from_slider("250"), Some(1.0));
        assert_eq!(volume_from_slider("-4"), Some(0.0));
        assert_eq!(volume_from_slider("loud"), None);
        assert_eq!(volume_from_slider("NaN"), None);
    }

    #[test]
    fn minimized_windows_are_labelled_in_the_taskbar() {
        assert_eq!(taskbar_window_aria_label("Mail", false), "Mail");
        assert_eq!(taskbar_window_aria_label("Mail", true), "Mail (minimized)");
    }
}
