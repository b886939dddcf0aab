use desktop_app_contract::AppSummary;
use serde::{Deserialize, Serialize};

use crate::registry::WindowRegistry;

pub const DEFAULT_WINDOW_WIDTH: i32 = 640;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 460;
pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

/// Source of fresh window ids. Ids handed out are never reused.
pub trait WindowIdSource {
    fn next_id(&mut self) -> WindowId;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonotonicWindowIds {
    next: u64,
}

impl MonotonicWindowIds {
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }
}

impl Default for MonotonicWindowIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl WindowIdSource for MonotonicWindowIds {
    fn next_id(&mut self) -> WindowId {
        let id = WindowId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app: AppSummary,
    pub rect: WindowRect,
    pub minimized: bool,
    /// Rendered as viewport-filling while set; `rect` keeps the restore geometry.
    pub maximized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesktopTheme {
    #[default]
    Dark,
    Light,
}

impl DesktopTheme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master volume in `0.0..=1.0`.
    pub volume: f32,
    pub muted: bool,
}

impl AudioSettings {
    /// Gain applied to the master node.
    pub fn master_gain(self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn volume_percent(self) -> u8 {
        (self.volume.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub logged_in: bool,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesktopState {
    pub registry: WindowRegistry,
    pub ids: MonotonicWindowIds,
    pub start_menu_open: bool,
    pub search_open: bool,
    pub session: SessionState,
    pub theme: DesktopTheme,
    pub audio: AudioSettings,
}

impl DesktopState {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.registry.get(window_id)
    }

    /// Taskbar hides itself while a maximized window is on screen.
    pub fn taskbar_hidden(&self) -> bool {
        self.registry.maximized_window_visible()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    SouthEast,
}

impl ResizeEdge {
    pub const ALL: [Self; 5] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::SouthEast,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::SouthEast => "se",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position relative to the window origin at grab time.
    pub grab_offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn is_active(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn monotonic_ids_never_repeat() {
        let mut ids = MonotonicWindowIds::default();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_eq!(first, WindowId(1));
        assert_eq!(second, WindowId(2));
        assert_eq!(MonotonicWindowIds::starting_at(0).next_id(), WindowId(1));
    }

    #[test]
    fn muted_audio_has_zero_master_gain() {
        let mut audio = AudioSettings::default();
        assert_eq!(audio.master_gain(), DEFAULT_VOLUME);
        assert_eq!(audio.volume_percent(), 50);
        audio.muted = true;
        assert_eq!(audio.master_gain(), 0.0);
    }

    #[test]
    fn theme_toggles_between_dark_and_light() {
        assert_eq!(DesktopTheme::default(), DesktopTheme::Dark);
        assert_eq!(DesktopTheme::Dark.toggled(), DesktopTheme::Light);
        assert_eq!(DesktopTheme::Light.toggled().css_class(), "theme-dark");
    }
}
