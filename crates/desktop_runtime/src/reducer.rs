//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppIcon, AppSummary};
use platform_host::SoundKind;

use crate::{
    model::{
        AudioSettings, DesktopState, DragSession, InteractionState, PointerPosition, ResizeEdge,
        ResizeSession, WindowId, WindowRect,
    },
    registry::{RegistryChange, Transition},
    window_manager::{drag_rect, resize_rect},
};

const DEFAULT_USER_NAME: &str = "user";

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Enter the desktop from the login screen.
    Login {
        /// Name shown in the start menu; blank names fall back to a default.
        user_name: String,
    },
    /// Return to the login screen, closing every window.
    Logout,
    /// Open an app or restore its minimized window.
    OpenApp {
        /// App being launched.
        app: AppSummary,
        /// Desktop area used for default placement.
        viewport: WindowRect,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Flip a window between minimized and visible.
    ToggleMinimize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Set or clear the maximized flag.
    SetMaximized {
        /// Window to update.
        window_id: WindowId,
        /// New flag value.
        maximized: bool,
    },
    /// Taskbar button press: restores a minimized window, otherwise does nothing.
    ActivateTaskbarWindow {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Lay out every visible window inside the viewport.
    OrganizeWindows {
        /// Desktop area to arrange into.
        viewport: WindowRect,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Toggle the app search launcher open/closed.
    ToggleSearch,
    /// Close the app search launcher if open.
    CloseSearch,
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
    /// Switch between dark and light themes.
    ToggleTheme,
    /// Set the master volume (`0.0..=1.0`).
    SetVolume {
        /// Requested volume.
        volume: f32,
    },
    /// Flip the mute switch.
    ToggleMuted,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Play a UI sound effect.
    PlaySound(SoundKind),
    /// Append an entry to the system event log.
    LogSystemEvent {
        /// App display name.
        app_name: String,
        /// App icon.
        icon: AppIcon,
        /// Action label.
        action: String,
    },
    /// Push new volume/mute settings to the sound engine.
    ApplyAudioSettings(AudioSettings),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the authoritative state transition engine for desktop window management and
/// shell-level preferences. Every action is total: unknown window ids leave the state unchanged.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Login { user_name } => {
            let user_name = user_name.trim();
            state.session.logged_in = true;
            state.session.user_name = if user_name.is_empty() {
                DEFAULT_USER_NAME.to_string()
            } else {
                user_name.to_string()
            };
            effects.push(RuntimeEffect::PlaySound(SoundKind::Login));
        }
        DesktopAction::Logout => {
            state.registry = Default::default();
            state.start_menu_open = false;
            state.search_open = false;
            state.session = Default::default();
            *interaction = InteractionState::default();
            effects.push(RuntimeEffect::PlaySound(SoundKind::Close));
        }
        DesktopAction::OpenApp { app, viewport } => {
            let transition = state.registry.open(&app, &mut state.ids, viewport);
            apply_transition(state, transition, &mut effects);
            state.start_menu_open = false;
            state.search_open = false;
        }
        DesktopAction::CloseWindow { window_id } => {
            clear_interaction_for(interaction, window_id);
            let transition = state.registry.close(window_id);
            apply_transition(state, transition, &mut effects);
        }
        DesktopAction::ToggleMinimize { window_id } => {
            clear_interaction_for(interaction, window_id);
            let transition = state.registry.toggle_minimize(window_id);
            apply_transition(state, transition, &mut effects);
        }
        DesktopAction::SetMaximized {
            window_id,
            maximized,
        } => {
            if maximized {
                clear_interaction_for(interaction, window_id);
            }
            let transition = state.registry.set_maximized(window_id, maximized);
            apply_transition(state, transition, &mut effects);
        }
        DesktopAction::ActivateTaskbarWindow { window_id } => {
            let minimized = state
                .registry
                .get(window_id)
                .map(|w| w.minimized)
                .unwrap_or(false);
            if minimized {
                let transition = state.registry.toggle_minimize(window_id);
                apply_transition(state, transition, &mut effects);
                effects.push(RuntimeEffect::PlaySound(SoundKind::Click));
            }
        }
        DesktopAction::OrganizeWindows { viewport } => {
            let transition = state.registry.organize(viewport);
            let changed = transition.change != RegistryChange::Unchanged;
            apply_transition(state, transition, &mut effects);
            if changed {
                effects.push(RuntimeEffect::PlaySound(SoundKind::Success));
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
            if state.start_menu_open {
                state.search_open = false;
            }
            effects.push(RuntimeEffect::PlaySound(SoundKind::Click));
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::ToggleSearch => {
            state.search_open = !state.search_open;
            if state.search_open {
                state.start_menu_open = false;
            }
            effects.push(RuntimeEffect::PlaySound(SoundKind::Click));
        }
        DesktopAction::CloseSearch => {
            state.search_open = false;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.registry.get(window_id) else {
                return effects;
            };
            if window.maximized || window.minimized || interaction.resizing.is_some() {
                return effects;
            }
            interaction.dragging = Some(DragSession {
                window_id,
                grab_offset: PointerPosition {
                    x: pointer.x - window.rect.x,
                    y: pointer.y - window.rect.y,
                },
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                if let Some(window) = state.registry.get(session.window_id) {
                    let rect = drag_rect(window.rect, pointer, session.grab_offset);
                    state.registry = state.registry.move_to(session.window_id, rect).registry;
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.registry.get(window_id) else {
                return effects;
            };
            if window.maximized || window.minimized || interaction.dragging.is_some() {
                return effects;
            }
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start: window.rect,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let rect = resize_rect(session.rect_start, session.edge, dx, dy);
                state.registry = state.registry.resize_to(session.window_id, rect).registry;
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::ToggleTheme => {
            state.theme = state.theme.toggled();
            effects.push(RuntimeEffect::PlaySound(SoundKind::Click));
        }
        DesktopAction::SetVolume { volume } => {
            let volume = volume.clamp(0.0, 1.0);
            if state.audio.volume != volume {
                state.audio.volume = volume;
                effects.push(RuntimeEffect::ApplyAudioSettings(state.audio));
            }
        }
        DesktopAction::ToggleMuted => {
            state.audio.muted = !state.audio.muted;
            effects.push(RuntimeEffect::ApplyAudioSettings(state.audio));
            if !state.audio.muted {
                effects.push(RuntimeEffect::PlaySound(SoundKind::Click));
            }
        }
    }

    effects
}

fn apply_transition(
    state: &mut DesktopState,
    transition: Transition,
    effects: &mut Vec<RuntimeEffect>,
) {
    state.registry = transition.registry;
    if let Some(event) = transition.event {
        effects.push(RuntimeEffect::LogSystemEvent {
            app_name: event.app.name,
            icon: event.app.icon,
            action: event.action.to_string(),
        });
    }
}

fn clear_interaction_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.resizing = None;
    }
}
