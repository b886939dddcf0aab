//! Per-window interaction state machine.
//!
//! The registry owns what a window *is*; this machine owns what a mounted window is *doing*
//! (entrance animation, drag, resize, exit animations). It emits [`LifecycleEffect`] values that
//! the window component executes: sounds, delayed registry commits, and maximize toggles.

use platform_host::SoundKind;

/// Exit animation length before a minimize is committed to the registry.
pub const MINIMIZE_ANIMATION_MS: u32 = 250;
/// Exit animation length before a close is committed to the registry.
pub const CLOSE_ANIMATION_MS: u32 = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    Opening,
    Idle,
    Dragging,
    Resizing,
    Minimizing,
    Closing,
    Maximized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Component mounted.
    Mounted,
    /// Entrance animation ended.
    EntranceFinished,
    /// Pointer-down on the title bar.
    DragStarted,
    /// Pointer-down on a resize hit-zone.
    ResizeStarted,
    /// Pointer-up anywhere while dragging or resizing.
    PointerReleased,
    MinimizeRequested,
    CloseRequested,
    MaximizeToggled,
    /// The registry shows the window again after a committed minimize.
    Shown {
        /// Current maximized flag in the registry.
        maximized: bool,
    },
    /// The registry changed the maximized flag on its own (for example through organize).
    MaximizedChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEffect {
    PlaySound(SoundKind),
    /// Toggle the registry minimized flag once `after_ms` elapse.
    CommitMinimize { after_ms: u32 },
    /// Remove the window from the registry once `after_ms` elapse.
    CommitClose { after_ms: u32 },
    SetMaximized(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLifecycle {
    phase: WindowPhase,
    open_sound_played: bool,
}

impl Default for WindowLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowLifecycle {
    pub fn new() -> Self {
        Self {
            phase: WindowPhase::Opening,
            open_sound_played: false,
        }
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    /// Whether a delayed commit emitted earlier still matches the current phase.
    ///
    /// A pending minimize is dropped once a close takes over, and neither commit survives a
    /// return to idle. Effects that are not delayed commits are never due.
    pub fn commit_due(&self, commit: LifecycleEffect) -> bool {
        match commit {
            LifecycleEffect::CommitMinimize { .. } => self.phase == WindowPhase::Minimizing,
            LifecycleEffect::CommitClose { .. } => self.phase == WindowPhase::Closing,
            LifecycleEffect::PlaySound(_) | LifecycleEffect::SetMaximized(_) => false,
        }
    }

    pub fn can_drag(&self) -> bool {
        matches!(self.phase, WindowPhase::Opening | WindowPhase::Idle)
    }

    pub fn can_resize(&self) -> bool {
        self.can_drag()
    }

    /// CSS state token for the window frame.
    pub fn css_state(&self) -> &'static str {
        match self.phase {
            WindowPhase::Opening => "opening",
            WindowPhase::Idle => "idle",
            WindowPhase::Dragging => "dragging",
            WindowPhase::Resizing => "resizing",
            WindowPhase::Minimizing => "minimizing",
            WindowPhase::Closing => "closing",
            WindowPhase::Maximized => "maximized",
        }
    }

    pub fn handle(&mut self, event: LifecycleEvent) -> Vec<LifecycleEffect> {
        use LifecycleEvent as E;
        use WindowPhase as P;

        let mut effects = Vec::new();
        match (self.phase, event) {
            (_, E::Mounted) => {
                if !self.open_sound_played {
                    self.open_sound_played = true;
                    effects.push(LifecycleEffect::PlaySound(SoundKind::Open));
                }
            }
            (P::Opening, E::EntranceFinished) => self.phase = P::Idle,
            (P::Opening | P::Idle, E::DragStarted) => self.phase = P::Dragging,
            (P::Opening | P::Idle, E::ResizeStarted) => self.phase = P::Resizing,
            (P::Dragging | P::Resizing, E::PointerReleased) => self.phase = P::Idle,
            (P::Minimizing | P::Closing, E::MinimizeRequested) => {}
            (_, E::MinimizeRequested) => {
                self.phase = P::Minimizing;
                effects.push(LifecycleEffect::PlaySound(SoundKind::Minimize));
                effects.push(LifecycleEffect::CommitMinimize {
                    after_ms: MINIMIZE_ANIMATION_MS,
                });
            }
            (P::Closing, E::CloseRequested) => {}
            (_, E::CloseRequested) => {
                self.phase = P::Closing;
                effects.push(LifecycleEffect::PlaySound(SoundKind::Close));
                effects.push(LifecycleEffect::CommitClose {
                    after_ms: CLOSE_ANIMATION_MS,
                });
            }
            (P::Opening | P::Idle, E::MaximizeToggled) => {
                self.phase = P::Maximized;
                effects.push(LifecycleEffect::PlaySound(SoundKind::Maximize));
                effects.push(LifecycleEffect::SetMaximized(true));
            }
            (P::Maximized, E::MaximizeToggled) => {
                self.phase = P::Idle;
                effects.push(LifecycleEffect::PlaySound(SoundKind::Maximize));
                effects.push(LifecycleEffect::SetMaximized(false));
            }
            (P::Minimizing, E::Shown { maximized }) => {
                self.phase = if maximized { P::Maximized } else { P::Idle };
            }
            (P::Maximized, E::MaximizedChanged(false)) => self.phase = P::Idle,
            (P::Opening | P::Idle, E::MaximizedChanged(true)) => self.phase = P::Maximized,
            _ => {}
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn idle() -> WindowLifecycle {
        let mut lifecycle = WindowLifecycle::new();
        lifecycle.handle(LifecycleEvent::Mounted);
        lifecycle.handle(LifecycleEvent::EntranceFinished);
        lifecycle
    }

    #[test]
    fn open_sound_plays_once_per_mount() {
        let mut lifecycle = WindowLifecycle::new();
        assert_eq!(
            lifecycle.handle(LifecycleEvent::Mounted),
            vec![LifecycleEffect::PlaySound(SoundKind::Open)]
        );
        assert!(lifecycle.handle(LifecycleEvent::Mounted).is_empty());
        assert_eq!(lifecycle.phase(), WindowPhase::Opening);
    }

    #[test]
    fn drag_and_resize_return_to_idle_on_release() {
        let mut lifecycle = idle();
        lifecycle.handle(LifecycleEvent::DragStarted);
        assert_eq!(lifecycle.phase(), WindowPhase::Dragging);
        assert!(!lifecycle.can_resize());
        lifecycle.handle(LifecycleEvent::PointerReleased);
        assert_eq!(lifecycle.phase(), WindowPhase::Idle);

        lifecycle.handle(LifecycleEvent::ResizeStarted);
        assert_eq!(lifecycle.phase(), WindowPhase::Resizing);
        lifecycle.handle(LifecycleEvent::PointerReleased);
        assert_eq!(lifecycle.phase(), WindowPhase::Idle);
    }

    #[test]
    fn minimize_plays_sound_then_commits_after_animation() {
        let mut lifecycle = idle();
        assert_eq!(
            lifecycle.handle(LifecycleEvent::MinimizeRequested),
            vec![
                LifecycleEffect::PlaySound(SoundKind::Minimize),
                LifecycleEffect::CommitMinimize { after_ms: 250 },
            ]
        );
        assert!(lifecycle.handle(LifecycleEvent::MinimizeRequested).is_empty());
        assert!(!lifecycle.can_drag());

        lifecycle.handle(LifecycleEvent::Shown { maximized: false });
        assert_eq!(lifecycle.phase(), WindowPhase::Idle);
    }

    #[test]
    fn close_wins_over_pending_minimize_and_commits_once() {
        let mut lifecycle = idle();
        lifecycle.handle(LifecycleEvent::MinimizeRequested);
        assert_eq!(
            lifecycle.handle(LifecycleEvent::CloseRequested),
            vec![
                LifecycleEffect::PlaySound(SoundKind::Close),
                LifecycleEffect::CommitClose { after_ms: 280 },
            ]
        );
        assert!(lifecycle.handle(LifecycleEvent::CloseRequested).is_empty());
        assert_eq!(lifecycle.phase(), WindowPhase::Closing);
    }

    #[test]
    fn close_after_minimize_cancels_the_pending_minimize_commit() {
        let mut lifecycle = idle();
        let minimize = LifecycleEffect::CommitMinimize { after_ms: 250 };
        let close = LifecycleEffect::CommitClose { after_ms: 280 };

        assert!(lifecycle
            .handle(LifecycleEvent::MinimizeRequested)
            .contains(&minimize));
        assert!(lifecycle.commit_due(minimize));

        lifecycle.handle(LifecycleEvent::CloseRequested);
        assert!(!lifecycle.commit_due(minimize));
        assert!(lifecycle.commit_due(close));
    }

    #[test]
    fn commits_are_not_due_outside_exit_phases() {
        let lifecycle = idle();
        assert!(!lifecycle.commit_due(LifecycleEffect::CommitMinimize { after_ms: 250 }));
        assert!(!lifecycle.commit_due(LifecycleEffect::CommitClose { after_ms: 280 }));
        assert!(!lifecycle.commit_due(LifecycleEffect::SetMaximized(true)));
    }

    #[test]
    fn maximize_round_trip_reenables_drag_and_resize() {
        let mut lifecycle = idle();
        assert_eq!(
            lifecycle.handle(LifecycleEvent::MaximizeToggled),
            vec![
                LifecycleEffect::PlaySound(SoundKind::Maximize),
                LifecycleEffect::SetMaximized(true),
            ]
        );
        assert!(!lifecycle.can_drag());
        assert!(!lifecycle.can_resize());
        lifecycle.handle(LifecycleEvent::DragStarted);
        assert_eq!(lifecycle.phase(), WindowPhase::Maximized);

        assert_eq!(
            lifecycle.handle(LifecycleEvent::MaximizeToggled),
            vec![
                LifecycleEffect::PlaySound(SoundKind::Maximize),
                LifecycleEffect::SetMaximized(false),
            ]
        );
        assert!(lifecycle.can_drag());
        assert!(lifecycle.can_resize());
    }

    #[test]
    fn external_unmaximize_returns_to_idle_silently() {
        let mut lifecycle = idle();
        lifecycle.handle(LifecycleEvent::MaximizeToggled);
        assert!(lifecycle.handle(LifecycleEvent::MaximizedChanged(false)).is_empty());
        assert_eq!(lifecycle.phase(), WindowPhase::Idle);
    }

    #[test]
    fn restoring_a_minimized_maximized_window_keeps_it_maximized() {
        let mut lifecycle = idle();
        lifecycle.handle(LifecycleEvent::MaximizeToggled);
        lifecycle.handle(LifecycleEvent::MinimizeRequested);
        lifecycle.handle(LifecycleEvent::Shown { maximized: true });
        assert_eq!(lifecycle.phase(), WindowPhase::Maximized);
        assert_eq!(lifecycle.css_state(), "maximized");
    }
}
