use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TabEntry;

/// Errors raised while loading or validating page configurations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("page configuration has an empty name")]
    EmptyName,

    #[error("page '{0}' has no tabs")]
    NoTabs(String),

    #[error("page '{page}' has an empty {what} id")]
    EmptyId { page: String, what: &'static str },

    #[error("page '{page}' lists button '{button}' more than once")]
    DuplicateButton { page: String, button: String },

    #[error("page '{0}' is defined more than once")]
    DuplicatePage(String),

    #[error("no page named '{0}'")]
    UnknownPage(String),
}

/// Where a page gets its selected-tab token from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenSource {
    /// A wrapped parameter on the hosting script's URL.
    Param {
        #[serde(default = "default_param_key")]
        key: String,
    },
    /// A page-scoped variable rendered into the page by the server.
    Injected {
        #[serde(default = "default_injected_variable")]
        variable: String,
    },
}

impl Default for TokenSource {
    fn default() -> Self {
        Self::Param {
            key: default_param_key(),
        }
    }
}

fn default_param_key() -> String {
    "cb".to_string()
}

fn default_injected_variable() -> String {
    "currentButton".to_string()
}

/// A checkbox whose checked state mirrors one script parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxBinding {
    pub param: String,
    pub element_id: String,
    #[serde(default = "default_on_value")]
    pub on_value: String,
}

fn default_on_value() -> String {
    "on".to_string()
}

impl CheckboxBinding {
    pub fn new(
        param: impl Into<String>,
        element_id: impl Into<String>,
    ) -> Self {
        Self {
            param: param.into(),
            element_id: element_id.into(),
            on_value: default_on_value(),
        }
    }

    /// Checked iff the parameter is present and equal to `on_value`.
    pub fn checked_for(
        &self,
        value: Option<&str>,
    ) -> bool {
        value == Some(self.on_value.as_str())
    }
}

/// Static description of one calculator page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub name: String,

    #[serde(default)]
    pub token: TokenSource,

    #[serde(rename = "tab")]
    pub tabs: Vec<TabEntry>,

    #[serde(default, rename = "checkbox")]
    pub checkboxes: Vec<CheckboxBinding>,

    /// Sound played when a tab marked `notify` is selected.
    #[serde(default)]
    pub notify_sound: Option<String>,
}

impl PageConfig {
    pub fn new(
        name: impl Into<String>,
        tabs: Vec<TabEntry>,
    ) -> Self {
        Self {
            name: name.into(),
            token: TokenSource::default(),
            tabs,
            checkboxes: Vec::new(),
            notify_sound: None,
        }
    }

    pub fn with_token(
        mut self,
        token: TokenSource,
    ) -> Self {
        self.token = token;
        self
    }

    pub fn with_checkbox(
        mut self,
        binding: CheckboxBinding,
    ) -> Self {
        self.checkboxes.push(binding);
        self
    }

    /// The tab whose button id equals `token`.
    pub fn entry(
        &self,
        token: &str,
    ) -> Option<&TabEntry> {
        self.tabs.iter().find(|tab| tab.button_id == token)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.tabs.is_empty() {
            return Err(ConfigError::NoTabs(self.name.clone()));
        }

        let empty_id = |what| ConfigError::EmptyId {
            page: self.name.clone(),
            what,
        };

        let mut buttons = HashSet::new();
        for tab in &self.tabs {
            if tab.button_id.is_empty() {
                return Err(empty_id("button"));
            }
            if tab.field_id.is_empty() {
                return Err(empty_id("field"));
            }
            if !buttons.insert(tab.button_id.as_str()) {
                return Err(ConfigError::DuplicateButton {
                    page: self.name.clone(),
                    button: tab.button_id.clone(),
                });
            }
        }

        if self.checkboxes.iter().any(|c| c.element_id.is_empty()) {
            return Err(empty_id("checkbox"));
        }

        Ok(())
    }
}
