//! App catalog: the build-time embedded `apps/catalog.toml` turned into [`AppDescriptor`]s.
//!
//! Every catalog app is a plain window-manager client whose body is static placeholder content.

use std::{collections::BTreeSet, rc::Rc};

use desktop_app_contract::{
    AppDescriptor, AppIcon, AppSummary, ApplicationId, ApplicationIdError, Renderable, StyleToken,
};
use leptos::{logging::warn, *};
use serde::Deserialize;
use thiserror::Error;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));
}

pub const CATALOG_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
/// Failures while loading the embedded app catalog.
pub enum CatalogError {
    /// The catalog JSON could not be decoded.
    #[error("app catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The catalog was written for another schema version.
    #[error("unsupported app catalog schema version {found} (expected {expected})")]
    SchemaVersion {
        /// Version found in the catalog.
        found: u32,
        /// Version this runtime understands.
        expected: u32,
    },
    /// An app id is not a valid slug.
    #[error("invalid app id `{id}`: {source}")]
    InvalidId {
        /// Raw id from the catalog.
        id: String,
        /// Validation failure.
        #[source]
        source: ApplicationIdError,
    },
    /// Two entries share an id.
    #[error("duplicate app id `{0}`")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct CatalogEntry {
    id: String,
    name: String,
    icon: String,
    glyph: String,
    color: String,
    summary: String,
    show_on_desktop: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    apps: Vec<CatalogEntry>,
}

#[derive(Debug, Clone)]
pub struct CatalogApp {
    pub descriptor: AppDescriptor,
    /// One-line description for the start menu.
    pub summary: String,
    pub show_on_desktop: bool,
}

impl CatalogApp {
    pub fn app_summary(&self) -> AppSummary {
        self.descriptor.summary()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    apps: Vec<CatalogApp>,
}

impl AppCatalog {
    /// Apps in catalog order, for the start menu.
    pub fn apps(&self) -> &[CatalogApp] {
        &self.apps
    }

    /// Apps flagged for the desktop icon grid.
    pub fn desktop_apps(&self) -> impl Iterator<Item = &CatalogApp> {
        self.apps.iter().filter(|app| app.show_on_desktop)
    }

    pub fn get(&self, app_id: &ApplicationId) -> Option<&CatalogApp> {
        self.apps.iter().find(|app| &app.descriptor.id == app_id)
    }

    /// Apps whose display name contains `query`, ignoring case and surrounding whitespace.
    ///
    /// A blank query matches every app. Results keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&CatalogApp> {
        let needle = query.trim().to_lowercase();
        self.apps
            .iter()
            .filter(|app| {
                needle.is_empty() || app.descriptor.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Renders the window body for `app_id`; unknown ids render nothing.
    pub fn render_content(&self, app_id: &ApplicationId) -> View {
        match self.get(app_id) {
            Some(app) => app.descriptor.content.render(),
            None => ().into_view(),
        }
    }
}

/// Parses and validates catalog JSON.
pub fn parse_catalog(json: &str) -> Result<AppCatalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    if file.schema_version != CATALOG_SCHEMA_VERSION {
        return Err(CatalogError::SchemaVersion {
            found: file.schema_version,
            expected: CATALOG_SCHEMA_VERSION,
        });
    }

    let mut seen = BTreeSet::new();
    let mut apps = Vec::with_capacity(file.apps.len());
    for entry in file.apps {
        let id = ApplicationId::new(entry.id.clone()).map_err(|source| {
            CatalogError::InvalidId {
                id: entry.id.clone(),
                source,
            }
        })?;
        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateId(entry.id));
        }
        apps.push(catalog_app(id, entry));
    }
    Ok(AppCatalog { apps })
}

/// Loads the catalog embedded at build time, falling back to an empty catalog on failure.
pub fn builtin_catalog() -> AppCatalog {
    parse_catalog(generated::APP_CATALOG_JSON).unwrap_or_else(|err| {
        warn!("failed to load app catalog: {err}");
        AppCatalog::default()
    })
}

fn catalog_app(id: ApplicationId, entry: CatalogEntry) -> CatalogApp {
    let content = PlaceholderContent {
        name: entry.name.clone(),
        summary: entry.summary.clone(),
    };
    CatalogApp {
        descriptor: AppDescriptor::new(
            id,
            entry.name,
            AppIcon::new(entry.icon, entry.glyph),
            StyleToken(entry.color),
            Rc::new(content),
        ),
        summary: entry.summary,
        show_on_desktop: entry.show_on_desktop,
    }
}

const PLACEHOLDER_FEATURES: [&str; 4] = [
    "Automatic real-time sync",
    "Built-in assistant",
    "Adaptive multi-device layout",
    "Runs fully in the cloud",
];

struct PlaceholderContent {
    name: String,
    summary: String,
}

impl Renderable for PlaceholderContent {
    fn render(&self) -> View {
        let name = self.name.clone();
        let summary = self.summary.clone();
        view! {
            <div class="app-placeholder">
                <h2 class="app-placeholder-title">{name.clone()}</h2>
                <p class="app-placeholder-summary">{summary}</p>
                <p class="app-placeholder-note">
                    {format!("This is a simulation of {name}.")}
                </p>
                <div class="app-placeholder-card">
                    <span class="status-dot" aria-hidden="true"></span>
                    <span>"Status: Online"</span>
                </div>
                <div class="app-placeholder-card">
                    <strong>"Coming soon"</strong>
                    <ul>
                        {PLACEHOLDER_FEATURES
                            .iter()
                            .map(|feature| view! { <li>{*feature}</li> })
                            .collect_view()}
                    </ul>
                </div>
            </div>
        }
        .into_view()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_catalog_loads_every_app() {
        let catalog = parse_catalog(generated::APP_CATALOG_JSON).expect("catalog parses");
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.desktop_apps().count(), 6);

        let files = catalog
            .get(&ApplicationId::trusted("files"))
            .expect("files app");
        assert_eq!(files.descriptor.name, "Files");
        assert_eq!(files.app_summary().icon.token, "folder");
    }

    fn matched_names(catalog: &AppCatalog, query: &str) -> Vec<String> {
        catalog
            .search(query)
            .into_iter()
            .map(|app| app.descriptor.name.clone())
            .collect()
    }

    #[test]
    fn blank_search_lists_every_app_in_catalog_order() {
        let catalog = parse_catalog(generated::APP_CATALOG_JSON).expect("catalog parses");
        let all: Vec<String> = catalog
            .apps()
            .iter()
            .map(|app| app.descriptor.name.clone())
            .collect();
        assert_eq!(matched_names(&catalog, ""), all);
        assert_eq!(matched_names(&catalog, "   "), all);
    }

    #[test]
    fn search_matches_names_case_insensitively() {
        let catalog = parse_catalog(generated::APP_CATALOG_JSON).expect("catalog parses");
        assert_eq!(matched_names(&catalog, "  cAL "), vec!["Calendar"]);
        assert_eq!(matched_names(&catalog, "DO"), vec!["Documents", "Videos"]);
    }

    #[test]
    fn search_without_matches_is_empty() {
        let catalog = parse_catalog(generated::APP_CATALOG_JSON).expect("catalog parses");
        assert!(catalog.search("spreadsheet").is_empty());
    }

    #[test]
    fn rejects_other_schema_versions() {
        let err = parse_catalog(r#"{"schema_version": 2, "apps": []}"#).expect_err("schema");
        assert!(matches!(
            err,
            CatalogError::SchemaVersion {
                found: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn rejects_duplicate_and_invalid_ids() {
        let entry = |id: &str| {
            format!(
                r#"{{"id":"{id}","name":"X","icon":"x","glyph":"x","color":"c","summary":"s","show_on_desktop":false}}"#
            )
        };
        let duplicate = format!(
            r#"{{"schema_version":1,"apps":[{},{}]}}"#,
            entry("mail"),
            entry("mail")
        );
        assert!(matches!(
            parse_catalog(&duplicate),
            Err(CatalogError::DuplicateId(id)) if id == "mail"
        ));

        let invalid = format!(r#"{{"schema_version":1,"apps":[{}]}}"#, entry("Mail App"));
        assert!(matches!(
            parse_catalog(&invalid),
            Err(CatalogError::InvalidId { .. })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            parse_catalog("{not json"),
            Err(CatalogError::Malformed(_))
        ));
    }
}
