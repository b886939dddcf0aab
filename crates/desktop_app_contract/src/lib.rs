//! Shared contract types between the desktop window manager runtime and the apps it hosts.
//!
//! The window manager only ever sees an [`AppDescriptor`]: stable metadata plus two opaque
//! [`Renderable`] handles (icon and content). It mounts the content inside a window body and never
//! interprets it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{fmt, rc::Rc};

use leptos::{IntoView, View};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted length of an [`ApplicationId`].
pub const MAX_APPLICATION_ID_LEN: usize = 48;

/// Stable identifier for an app descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Rejection reasons for [`ApplicationId::new`].
pub enum ApplicationIdError {
    /// The identifier was empty or longer than [`MAX_APPLICATION_ID_LEN`].
    #[error("application id must be 1..={MAX_APPLICATION_ID_LEN} characters, got {0}")]
    Length(usize),
    /// The identifier contained characters outside `[a-z0-9-]` or did not start with a letter.
    #[error("invalid application id `{0}`; expected a lowercase slug")]
    Charset(String),
}

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lowercase slug (`files`, `cloud-drive`).
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationIdError`] when `raw` violates the slug policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, ApplicationIdError> {
        let raw = raw.into();
        if raw.is_empty() || raw.len() > MAX_APPLICATION_ID_LEN {
            return Err(ApplicationIdError::Length(raw.len()));
        }
        if !is_valid_slug(&raw) {
            return Err(ApplicationIdError::Charset(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_slug(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') || raw.contains("--") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Capability for anything the shell can mount without knowing what it is.
pub trait Renderable {
    /// Builds a fresh view for the current mount point.
    fn render(&self) -> View;
}

impl<F, V> Renderable for F
where
    F: Fn() -> V,
    V: IntoView,
{
    fn render(&self) -> View {
        (self)().into_view()
    }
}

/// Style token applied to app chrome (for example the icon tile gradient class).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleToken(pub String);

impl StyleToken {
    /// Returns the raw class/token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// App icon reference: a stable token for logs plus the glyph that is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIcon {
    /// Stable icon token (`folder`, `terminal`, ...).
    pub token: String,
    /// Text glyph drawn inside the icon tile.
    pub glyph: String,
}

impl AppIcon {
    /// Creates an icon from a token and glyph.
    pub fn new(token: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            glyph: glyph.into(),
        }
    }
}

impl Renderable for AppIcon {
    fn render(&self) -> View {
        use leptos::view;

        let token = self.token.clone();
        let glyph = self.glyph.clone();
        view! {
            <span class="app-icon-glyph" data-icon=token aria-hidden="true">
                {glyph}
            </span>
        }
        .into_view()
    }
}

/// Serializable, content-free part of an [`AppDescriptor`] that window records keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSummary {
    /// App id; unique within the catalog.
    pub id: ApplicationId,
    /// Display name.
    pub name: String,
    /// Icon reference.
    pub icon: AppIcon,
    /// Chrome style token.
    pub color: StyleToken,
}

/// External, read-only description of one application.
#[derive(Clone)]
pub struct AppDescriptor {
    /// App id; unique within the catalog.
    pub id: ApplicationId,
    /// Display name.
    pub name: String,
    /// Icon reference.
    pub icon: AppIcon,
    /// Chrome style token.
    pub color: StyleToken,
    /// Window body renderer.
    pub content: Rc<dyn Renderable>,
}

impl AppDescriptor {
    /// Creates a descriptor from its parts.
    pub fn new(
        id: ApplicationId,
        name: impl Into<String>,
        icon: AppIcon,
        color: StyleToken,
        content: Rc<dyn Renderable>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            icon,
            color,
            content,
        }
    }

    /// Returns the content-free summary stored on window records.
    pub fn summary(&self) -> AppSummary {
        AppSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
        }
    }
}

impl fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Sink for the shell's audit trail of app lifecycle actions.
pub trait SystemEventSink {
    /// Records one event. Fire and forget.
    fn log_event(&self, app_name: &str, icon: &AppIcon, action: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_id_requires_lowercase_slug() {
        assert!(ApplicationId::new("files").is_ok());
        assert!(ApplicationId::new("cloud-drive").is_ok());
        assert!(ApplicationId::new("app2").is_ok());
        assert_eq!(
            ApplicationId::new(""),
            Err(ApplicationIdError::Length(0))
        );
        assert!(ApplicationId::new("Files").is_err());
        assert!(ApplicationId::new("2files").is_err());
        assert!(ApplicationId::new("cloud--drive").is_err());
        assert!(ApplicationId::new("cloud-").is_err());
        assert!(ApplicationId::new("a".repeat(MAX_APPLICATION_ID_LEN + 1)).is_err());
    }

    #[test]
    fn summary_drops_content_but_keeps_metadata() {
        let descriptor = AppDescriptor::new(
            ApplicationId::trusted("terminal"),
            "Terminal",
            AppIcon::new("terminal", ">_"),
            StyleToken("tile-slate".to_string()),
            Rc::new(|| "body"),
        );

        let summary = descriptor.summary();
        assert_eq!(summary.id.as_str(), "terminal");
        assert_eq!(summary.name, "Terminal");
        assert_eq!(summary.icon.token, "terminal");
        assert_eq!(summary.color.as_str(), "tile-slate");
    }
}
