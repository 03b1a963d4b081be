//! Tab-state controller.
//!
//! Applies one selected tab to a page: the selected button is disabled and
//! every other button enabled (locked buttons stay disabled), then the
//! selected tab's input field is focused with its whole value selected.
//!
//! Nothing here aborts page initialization. An absent or unknown token, or
//! an id missing from the document, is returned in the [`TabReport`] and
//! logged as a warning.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::document::{DocumentError, TabDocument};
use crate::models::{PageConfig, SelectedTab, TabEntry};

/// Why a step of the tab pass could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabStateError {
    #[error("no tab token was supplied")]
    MissingToken,

    #[error("no tab matches token '{0}'")]
    UnmatchedTab(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// The focus step found no field to focus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "no field to focus for tab {}: {}",
    .token.as_deref().unwrap_or("<none>"),
    .cause
)]
pub struct FieldNotFound {
    pub token: Option<String>,
    pub cause: TabStateError,
}

/// The field that received focus and the range selected in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedField {
    pub button_id: String,
    pub field_id: String,
    pub selection: (u32, u32),
}

/// Called when a tab marked `notify` becomes the selected tab.
pub trait TabNotifier {
    fn tab_activated(
        &self,
        entry: &TabEntry,
    );
}

impl<F> TabNotifier for F
where
    F: Fn(&TabEntry),
{
    fn tab_activated(
        &self,
        entry: &TabEntry,
    ) {
        self(entry)
    }
}

/// What one invocation did to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabReport {
    pub selected: Option<SelectedTab>,

    /// Buttons left disabled by the pass, in page order. Empty when the
    /// pass was skipped.
    pub disabled: Vec<String>,

    /// Set when the enable/disable pass was skipped.
    pub button_issue: Option<TabStateError>,

    pub focus: Result<FocusedField, FieldNotFound>,

    /// Checkbox bindings that could not be applied.
    pub checkbox_issues: Vec<DocumentError>,
}

impl TabReport {
    /// True when every step was applied.
    pub fn is_clean(&self) -> bool {
        self.button_issue.is_none() && self.focus.is_ok() && self.checkbox_issues.is_empty()
    }
}

/// Applies a page's tab state against a document.
pub struct TabStateController<'a> {
    config: &'a PageConfig,
    notifier: Option<Box<dyn TabNotifier + 'a>>,
}

impl<'a> TabStateController<'a> {
    pub fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            notifier: None,
        }
    }

    pub fn with_notifier(
        self,
        notifier: impl TabNotifier + 'a,
    ) -> Self {
        self.with_boxed_notifier(Box::new(notifier))
    }

    pub fn with_boxed_notifier(
        mut self,
        notifier: Box<dyn TabNotifier + 'a>,
    ) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn config(&self) -> &PageConfig {
        self.config
    }

    pub fn apply(
        &self,
        doc: &mut impl TabDocument,
        selected: Option<&SelectedTab>,
    ) -> TabReport {
        let entry = self.lookup(selected);

        let (disabled, button_issue) = match &entry {
            Ok(entry) => match self.apply_buttons(doc, &entry.button_id) {
                Ok(disabled) => (disabled, None),
                Err(err) => (Vec::new(), Some(err)),
            },
            Err(err) => (Vec::new(), Some(err.clone())),
        };
        if let Some(err) = &button_issue {
            warn!(page = %self.config.name, error = %err, "tab buttons left unchanged");
        }

        if let (Ok(entry), Some(notifier)) = (&entry, &self.notifier) {
            if entry.notify {
                debug!(button = %entry.button_id, "notifying tab activation");
                notifier.tab_activated(entry);
            }
        }

        let focus = entry
            .and_then(|entry| focus_field(doc, entry))
            .map_err(|cause| FieldNotFound {
                token: selected.map(|s| s.as_str().to_string()),
                cause,
            });
        match &focus {
            Ok(field) => info!(
                page = %self.config.name,
                button = %field.button_id,
                field = %field.field_id,
                "tab state applied"
            ),
            Err(err) => warn!(page = %self.config.name, error = %err, "focus skipped"),
        }

        TabReport {
            selected: selected.cloned(),
            disabled,
            button_issue,
            focus,
            checkbox_issues: Vec::new(),
        }
    }

    fn lookup(
        &self,
        selected: Option<&SelectedTab>,
    ) -> Result<&'a TabEntry, TabStateError> {
        let token = selected.ok_or(TabStateError::MissingToken)?;
        self.config
            .entry(token.as_str())
            .ok_or_else(|| TabStateError::UnmatchedTab(token.to_string()))
    }

    /// Sets every button's disabled state, or none of them if any button
    /// is missing from the document or is not a button.
    fn apply_buttons(
        &self,
        doc: &mut impl TabDocument,
        selected: &str,
    ) -> Result<Vec<String>, TabStateError> {
        for tab in &self.config.tabs {
            doc.check_button(&tab.button_id)?;
        }

        let mut disabled = Vec::new();
        for tab in &self.config.tabs {
            let off = tab.disabled_for(selected);
            doc.set_disabled(&tab.button_id, off)?;
            if off {
                disabled.push(tab.button_id.clone());
            }
        }
        Ok(disabled)
    }
}

fn focus_field(
    doc: &mut impl TabDocument,
    entry: &TabEntry,
) -> Result<FocusedField, TabStateError> {
    let end = doc.focus_and_select_all(&entry.field_id)?;
    Ok(FocusedField {
        button_id: entry.button_id.clone(),
        field_id: entry.field_id.clone(),
        selection: (0, end),
    })
}

/// Applies `selected` to `doc` using `config`, without a notifier.
pub fn apply_tab_state(
    doc: &mut impl TabDocument,
    config: &PageConfig,
    selected: Option<&SelectedTab>,
) -> TabReport {
    TabStateController::new(config).apply(doc, selected)
}
