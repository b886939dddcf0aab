//! Authoritative collection of open windows.
//!
//! Every mutation is a pure transform from `&WindowRegistry` to a [`Transition`] holding the next
//! registry, a description of what changed, and the system event (if any) to report. Unknown
//! window ids are silent no-ops.

use std::collections::BTreeSet;

use desktop_app_contract::AppSummary;

use crate::{
    model::{WindowId, WindowIdSource, WindowRecord, WindowRect},
    window_manager::{default_window_rect, organize_layout, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Ordered window records plus the set of maximized window ids.
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    maximized: BTreeSet<WindowId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a registry transform did.
pub enum RegistryChange {
    /// A new window was appended.
    Opened(WindowId),
    /// A minimized window was made visible again.
    Restored(WindowId),
    /// A window was removed.
    Closed(WindowId),
    /// A window was hidden.
    Minimized(WindowId),
    /// The maximized flag was set.
    Maximized(WindowId),
    /// The maximized flag was cleared.
    Unmaximized(WindowId),
    /// Window geometry changed.
    Geometry(WindowId),
    /// Visible windows were laid out again.
    Organized(Vec<WindowId>),
    /// Nothing changed.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Audit-trail entry produced by a transform, forwarded to the system event sink.
pub struct WindowEvent {
    /// App the window belongs to.
    pub app: AppSummary,
    /// Human-readable action label.
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a pure registry transform.
pub struct Transition {
    /// Registry after the transform.
    pub registry: WindowRegistry,
    /// Summary of the change.
    pub change: RegistryChange,
    /// System event to log, if the transform is user-visible.
    pub event: Option<WindowEvent>,
}

impl Transition {
    fn unchanged(registry: &WindowRegistry) -> Self {
        Self {
            registry: registry.clone(),
            change: RegistryChange::Unchanged,
            event: None,
        }
    }

    fn with_event(
        registry: WindowRegistry,
        change: RegistryChange,
        app: AppSummary,
        action: &'static str,
    ) -> Self {
        Self {
            registry,
            change,
            event: Some(WindowEvent { app, action }),
        }
    }
}

impl WindowRegistry {
    /// Windows in insertion order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn find_by_app(&self, app_id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app.id.as_str() == app_id)
    }

    pub fn is_maximized(&self, window_id: WindowId) -> bool {
        self.maximized.contains(&window_id)
    }

    /// `true` while a maximized window is on screen; drives taskbar auto-hide.
    ///
    /// A minimized window keeps its maximized mark so restoring it returns to full size, but it
    /// no longer hides the taskbar.
    pub fn maximized_window_visible(&self) -> bool {
        self.windows
            .iter()
            .any(|w| !w.minimized && self.maximized.contains(&w.id))
    }

    /// Windows drawn on the desktop, back to front.
    ///
    /// Minimized windows are skipped; maximized windows are drawn above all others while keeping
    /// their relative insertion order.
    pub fn render_order(&self) -> Vec<&WindowRecord> {
        let visible = self.windows.iter().filter(|w| !w.minimized);
        let (maximized, normal): (Vec<_>, Vec<_>) = visible.partition(|w| w.maximized);
        normal.into_iter().chain(maximized).collect()
    }

    /// Opens `app`, restores its minimized window, or leaves a visible window alone.
    pub fn open(
        &self,
        app: &AppSummary,
        ids: &mut impl WindowIdSource,
        viewport: WindowRect,
    ) -> Transition {
        if let Some(existing) = self.find_by_app(app.id.as_str()) {
            if !existing.minimized {
                return Transition::unchanged(self);
            }
            let window_id = existing.id;
            let mut next = self.clone();
            if let Some(record) = next.record_mut(window_id) {
                record.minimized = false;
            }
            return Transition::with_event(
                next,
                RegistryChange::Restored(window_id),
                app.clone(),
                "Restored",
            );
        }

        let window_id = ids.next_id();
        let mut next = self.clone();
        next.windows.push(WindowRecord {
            id: window_id,
            app: app.clone(),
            rect: default_window_rect(window_id, viewport),
            minimized: false,
            maximized: false,
        });
        Transition::with_event(
            next,
            RegistryChange::Opened(window_id),
            app.clone(),
            "Opened",
        )
    }

    /// Removes the window and its maximized mark.
    pub fn close(&self, window_id: WindowId) -> Transition {
        let Some(record) = self.get(window_id) else {
            return Transition::unchanged(self);
        };
        let app = record.app.clone();
        let mut next = self.clone();
        next.windows.retain(|w| w.id != window_id);
        next.maximized.remove(&window_id);
        Transition::with_event(next, RegistryChange::Closed(window_id), app, "Closed")
    }

    /// Flips the minimized flag.
    pub fn toggle_minimize(&self, window_id: WindowId) -> Transition {
        let mut next = self.clone();
        let Some(record) = next.record_mut(window_id) else {
            return Transition::unchanged(self);
        };
        record.minimized = !record.minimized;
        let (change, action) = if record.minimized {
            (RegistryChange::Minimized(window_id), "Minimized")
        } else {
            (RegistryChange::Restored(window_id), "Restored")
        };
        let app = record.app.clone();
        Transition::with_event(next, change, app, action)
    }

    /// Sets the maximized flag; reports an event only when the flag actually changes.
    pub fn set_maximized(&self, window_id: WindowId, maximized: bool) -> Transition {
        let mut next = self.clone();
        let Some(record) = next.record_mut(window_id) else {
            return Transition::unchanged(self);
        };
        if record.maximized == maximized {
            return Transition::unchanged(self);
        }
        record.maximized = maximized;
        let app = record.app.clone();
        let (change, action) = if maximized {
            next.maximized.insert(window_id);
            (RegistryChange::Maximized(window_id), "Maximized")
        } else {
            next.maximized.remove(&window_id);
            (RegistryChange::Unmaximized(window_id), "Restored size")
        };
        Transition::with_event(next, change, app, action)
    }

    /// Commits a dragged position.
    pub fn move_to(&self, window_id: WindowId, rect: WindowRect) -> Transition {
        self.commit_rect(window_id, rect)
    }

    /// Commits a resized rectangle, clamped to the minimum window size.
    pub fn resize_to(&self, window_id: WindowId, rect: WindowRect) -> Transition {
        self.commit_rect(
            window_id,
            rect.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
        )
    }

    /// Lays out visible windows inside `viewport`; organized windows lose their maximized flag.
    pub fn organize(&self, viewport: WindowRect) -> Transition {
        let visible: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| !w.minimized)
            .map(|w| w.id)
            .collect();
        if visible.is_empty() {
            return Transition::unchanged(self);
        }

        let mut next = self.clone();
        for (window_id, rect) in visible
            .iter()
            .zip(organize_layout(visible.len(), viewport))
        {
            if let Some(record) = next.record_mut(*window_id) {
                record.rect = rect;
                record.maximized = false;
            }
            next.maximized.remove(window_id);
        }
        if next == *self {
            return Transition::unchanged(self);
        }
        Transition {
            registry: next,
            change: RegistryChange::Organized(visible),
            event: None,
        }
    }

    fn commit_rect(&self, window_id: WindowId, rect: WindowRect) -> Transition {
        let mut next = self.clone();
        let Some(record) = next.record_mut(window_id) else {
            return Transition::unchanged(self);
        };
        if record.rect == rect {
            return Transition::unchanged(self);
        }
        record.rect = rect;
        Transition {
            registry: next,
            change: RegistryChange::Geometry(window_id),
            event: None,
        }
    }

    fn record_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppIcon, ApplicationId, StyleToken};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::MonotonicWindowIds;

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 0,
        w: 1440,
        h: 860,
    };

    fn app(id: &str) -> AppSummary {
        AppSummary {
            id: ApplicationId::trusted(id),
            name: id.to_uppercase(),
            icon: AppIcon::new(id, "*"),
            color: StyleToken(format!("accent-{id}")),
        }
    }

    fn open(
        registry: &WindowRegistry,
        ids: &mut MonotonicWindowIds,
        app_id: &str,
    ) -> (WindowRegistry, WindowId) {
        let transition = registry.open(&app(app_id), ids, VIEWPORT);
        let window_id = transition
            .registry
            .find_by_app(app_id)
            .expect("window for app")
            .id;
        (transition.registry, window_id)
    }

    fn ids_of(registry: &WindowRegistry) -> Vec<WindowId> {
        registry.windows().iter().map(|w| w.id).collect()
    }

    #[test]
    fn repeated_open_keeps_one_window_per_app() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, first) = open(&WindowRegistry::default(), &mut ids, "files");

        let again = registry.open(&app("files"), &mut ids, VIEWPORT);
        assert_eq!(again.change, RegistryChange::Unchanged);
        assert_eq!(again.event, None);
        assert_eq!(again.registry.len(), 1);
        assert_eq!(again.registry.windows()[0].id, first);
    }

    #[test]
    fn open_restores_a_minimized_window_without_duplicating_it() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, window_id) = open(&WindowRegistry::default(), &mut ids, "mail");
        let registry = registry.toggle_minimize(window_id).registry;
        assert!(registry.get(window_id).expect("window").minimized);

        let transition = registry.open(&app("mail"), &mut ids, VIEWPORT);
        assert_eq!(transition.change, RegistryChange::Restored(window_id));
        assert_eq!(transition.registry.len(), 1);
        assert!(!transition.registry.get(window_id).expect("window").minimized);
        assert_eq!(
            transition.event.map(|event| event.action),
            Some("Restored")
        );
    }

    #[test]
    fn reopening_after_close_assigns_a_fresh_id() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, first) = open(&WindowRegistry::default(), &mut ids, "music");
        let registry = registry.close(first).registry;
        assert!(registry.is_empty());

        let (registry, second) = open(&registry, &mut ids, "music");
        assert_ne!(first, second);
        assert_eq!(ids_of(&registry), vec![second]);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, _) = open(&WindowRegistry::default(), &mut ids, "docs");
        let ghost = WindowId(999);

        for transition in [
            registry.close(ghost),
            registry.toggle_minimize(ghost),
            registry.set_maximized(ghost, true),
            registry.move_to(ghost, WindowRect::default()),
            registry.resize_to(ghost, WindowRect::default()),
        ] {
            assert_eq!(transition.change, RegistryChange::Unchanged);
            assert_eq!(transition.event, None);
            assert_eq!(transition.registry, registry);
        }
    }

    #[test]
    fn three_window_scenario_tracks_minimize_close_and_restore() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let (registry, b) = open(&registry, &mut ids, "bravo");
        let (registry, c) = open(&registry, &mut ids, "charlie");
        assert_eq!(ids_of(&registry), vec![a, b, c]);

        let registry = registry.toggle_minimize(b).registry;
        assert!(registry.get(b).expect("b").minimized);
        let rendered: Vec<WindowId> = registry.render_order().iter().map(|w| w.id).collect();
        assert_eq!(rendered, vec![a, c]);

        let registry = registry.close(a).registry;
        assert_eq!(ids_of(&registry), vec![b, c]);
        assert!(registry.get(b).expect("b").minimized);

        let registry = registry.toggle_minimize(b).registry;
        assert!(!registry.get(b).expect("b").minimized);
        let rendered: Vec<WindowId> = registry.render_order().iter().map(|w| w.id).collect();
        assert_eq!(rendered, vec![b, c]);
    }

    #[test]
    fn maximized_windows_render_last_and_hide_the_taskbar() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let (registry, b) = open(&registry, &mut ids, "bravo");

        let maximized = registry.set_maximized(a, true);
        assert_eq!(maximized.change, RegistryChange::Maximized(a));
        let registry = maximized.registry;
        assert!(registry.maximized_window_visible());
        let rendered: Vec<WindowId> = registry.render_order().iter().map(|w| w.id).collect();
        assert_eq!(rendered, vec![b, a]);

        let repeat = registry.set_maximized(a, true);
        assert_eq!(repeat.change, RegistryChange::Unchanged);
        assert_eq!(repeat.event, None);

        let restored = registry.set_maximized(a, false);
        assert_eq!(
            restored.event.map(|event| event.action),
            Some("Restored size")
        );
        assert!(!restored.registry.maximized_window_visible());
    }

    #[test]
    fn maximize_keeps_rect_for_restore() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let before = registry.get(a).expect("a").rect;

        let registry = registry.set_maximized(a, true).registry;
        assert_eq!(registry.get(a).expect("a").rect, before);
        let registry = registry.set_maximized(a, false).registry;
        assert_eq!(registry.get(a).expect("a").rect, before);
    }

    #[test]
    fn closing_a_maximized_window_clears_its_mark() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let registry = registry.set_maximized(a, true).registry;
        let closed = registry.close(a);
        assert_eq!(closed.event.map(|event| event.action), Some("Closed"));
        assert!(!closed.registry.is_maximized(a));
    }

    #[test]
    fn minimizing_a_maximized_window_reveals_the_taskbar_but_keeps_the_mark() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let registry = registry.set_maximized(a, true).registry;

        let minimized = registry.toggle_minimize(a).registry;
        assert!(!minimized.maximized_window_visible());
        assert!(minimized.is_maximized(a));

        let restored = minimized.toggle_minimize(a).registry;
        assert!(restored.maximized_window_visible());
    }

    #[test]
    fn resize_to_clamps_to_minimum_size() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let registry = registry
            .resize_to(
                a,
                WindowRect {
                    x: 10,
                    y: 10,
                    w: 50,
                    h: 50,
                },
            )
            .registry;
        let rect = registry.get(a).expect("a").rect;
        assert_eq!((rect.w, rect.h), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn organize_repositions_visible_windows_only() {
        let mut ids = MonotonicWindowIds::default();
        let (registry, a) = open(&WindowRegistry::default(), &mut ids, "alpha");
        let (registry, b) = open(&registry, &mut ids, "bravo");
        let (registry, c) = open(&registry, &mut ids, "charlie");
        let registry = registry.toggle_minimize(b).registry;
        let registry = registry.set_maximized(c, true).registry;
        let b_rect = registry.get(b).expect("b").rect;

        let transition = registry.organize(VIEWPORT);
        assert_eq!(transition.change, RegistryChange::Organized(vec![a, c]));
        let registry = transition.registry;
        assert_eq!(registry.get(a).expect("a").rect.x, 0);
        assert_eq!(registry.get(c).expect("c").rect.x, 720);
        assert!(!registry.get(c).expect("c").maximized);
        assert!(!registry.maximized_window_visible());
        assert_eq!(registry.get(b).expect("b").rect, b_rect);

        let again = registry.organize(VIEWPORT);
        assert_eq!(again.change, RegistryChange::Unchanged);
        assert_eq!(again.registry, registry);
    }
}
