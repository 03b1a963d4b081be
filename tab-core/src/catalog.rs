//! Page configuration catalog.
//!
//! Pages are described in TOML, one `[[page]]` table per calculator page
//! with its `[[page.tab]]` entries in display order:
//!
//! ```toml
//! [[page]]
//! name = "oa-perpetuity"
//!
//! [[page.tab]]
//! button_id = "lhs-button1"
//! field_id = "fd1-interest"
//!
//! [[page.tab]]
//! button_id = "lhs-button2"
//! field_id = "fd2-interest"
//! ```
//!
//! Optional keys:
//!
//! | Key | On | Meaning |
//! |-----|----|---------|
//! | `token` | page | `{ kind = "param", key = "cb" }` (default) or `{ kind = "injected", variable = "currentButton" }` |
//! | `notify_sound` | page | Sound URL played for tabs with `notify = true` |
//! | `locked` | tab | Button is disabled whatever tab is selected |
//! | `notify` | tab | Selecting the tab fires the notification |
//! | `[[page.checkbox]]` | page | `param`, `element_id`, `on_value` (default `"on"`) |

use std::collections::HashSet;

use serde::Deserialize;
use tracing::debug;

pub use crate::models::ConfigError;
use crate::models::PageConfig;

const BUILTIN_PAGES: &str = include_str!("../pages.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "page")]
    pages: Vec<PageConfig>,
}

/// Validated set of page configurations, looked up by page name.
#[derive(Debug, Clone, Default)]
pub struct PageCatalog {
    pages: Vec<PageConfig>,
}

impl PageCatalog {
    /// The catalog of calculator pages shipped with this crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_PAGES)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::from_pages(file.pages)
    }

    pub fn from_pages(pages: Vec<PageConfig>) -> Result<Self, ConfigError> {
        let mut names = HashSet::new();
        for page in &pages {
            page.validate()?;
            if !names.insert(page.name.as_str()) {
                return Err(ConfigError::DuplicatePage(page.name.clone()));
            }
        }
        debug!(pages = pages.len(), "page catalog loaded");
        Ok(Self { pages })
    }

    pub fn page(
        &self,
        name: &str,
    ) -> Result<&PageConfig, ConfigError> {
        self.pages
            .iter()
            .find(|page| page.name == name)
            .ok_or_else(|| ConfigError::UnknownPage(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageConfig> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
