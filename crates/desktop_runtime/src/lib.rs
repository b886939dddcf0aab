//! Browser desktop runtime: window registry, window lifecycle, UI sounds, and the Leptos shell.
//!
//! The pure core (`registry`, `window_manager`, `window_lifecycle`, `reducer`) holds every window
//! rule; `components` and `runtime_context` only wire it to the DOM.

pub mod apps;
pub mod audio;
pub mod components;
mod effect_executor;
pub mod host;
pub mod model;
pub mod reducer;
pub mod registry;
pub mod runtime_context;
pub mod system_events;
pub mod window_lifecycle;
pub mod window_manager;

pub use apps::{builtin_catalog, AppCatalog, CatalogApp, CatalogError};
pub use audio::SoundEngine;
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use registry::{RegistryChange, Transition, WindowEvent, WindowRegistry};
pub use system_events::{SystemEvent, SystemEventLog};
