//! Page-initialization routine run once when the document is ready.

use tracing::{debug, warn};

use crate::controller::{TabNotifier, TabReport, TabStateController};
use crate::document::TabDocument;
use crate::models::{PageConfig, SelectedTab};
use crate::params::{ParameterMap, extract_params};

/// What the hosting page hands over at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInputs {
    /// `src` of the script element that loaded the page helper.
    pub script_src: Option<String>,

    /// Value of the page-scoped token variable, for injected-token pages.
    pub injected_token: Option<String>,
}

impl PageInputs {
    pub fn from_script_src(src: impl Into<String>) -> Self {
        Self {
            script_src: Some(src.into()),
            injected_token: None,
        }
    }

    pub fn with_injected_token(
        mut self,
        token: impl Into<String>,
    ) -> Self {
        self.injected_token = Some(token.into());
        self
    }

    pub fn params(&self) -> ParameterMap {
        self.script_src
            .as_deref()
            .map(extract_params)
            .unwrap_or_default()
    }
}

/// Extracts parameters, applies the tab state and then the checkbox
/// bindings of `config`.
pub fn initialize<'a>(
    doc: &mut impl TabDocument,
    config: &'a PageConfig,
    inputs: &PageInputs,
    notifier: Option<Box<dyn TabNotifier + 'a>>,
) -> TabReport {
    let params = inputs.params();
    let selected = SelectedTab::resolve(
        &config.token,
        &params,
        inputs.injected_token.as_deref(),
    );
    debug!(page = %config.name, params = params.len(), ?selected, "initializing page");

    let mut controller = TabStateController::new(config);
    if let Some(notifier) = notifier {
        controller = controller.with_boxed_notifier(notifier);
    }
    let mut report = controller.apply(doc, selected.as_ref());

    for binding in &config.checkboxes {
        let checked = binding.checked_for(params.get(&binding.param));
        if let Err(err) = doc.set_checked(&binding.element_id, checked) {
            warn!(page = %config.name, error = %err, "checkbox binding skipped");
            report.checkbox_issues.push(err);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::{DocumentError, InMemoryDocument};
    use crate::models::{CheckboxBinding, TabEntry, TokenSource};

    fn simple_interest() -> PageConfig {
        PageConfig::new(
            "simple-interest-accurate",
            vec![
                TabEntry::new("lhs-button1", "fd1-time"),
                TabEntry::new("lhs-button2", "fd2-time"),
            ],
        )
        .with_checkbox(CheckboxBinding::new("leap", "fd1-leap"))
    }

    fn document() -> InMemoryDocument {
        InMemoryDocument::new()
            .with_button("lhs-button1")
            .with_button("lhs-button2")
            .with_input("fd1-time", "180")
            .with_input("fd2-time", "90")
            .with_checkbox("fd1-leap", true)
    }

    #[test]
    fn test_script_params_drive_tab_and_checkbox() {
        let mut doc = document();
        let inputs =
            PageInputs::from_script_src("/js/SimpleInterestAccurate.js?cb='lhs-button2'&leap='on'");

        let report = initialize(&mut doc, &simple_interest(), &inputs, None);

        assert!(report.is_clean());
        assert_eq!(doc.is_disabled("lhs-button2"), Some(true));
        assert_eq!(doc.focused(), Some("fd2-time"));
        assert_eq!(doc.selection("fd2-time"), Some((0, 2)));
        assert_eq!(doc.is_checked("fd1-leap"), Some(true));
    }

    #[test]
    fn test_absent_checkbox_param_unchecks() {
        let mut doc = document();
        let inputs = PageInputs::from_script_src("/js/SimpleInterestAccurate.js?cb='lhs-button1'");

        initialize(&mut doc, &simple_interest(), &inputs, None);

        assert_eq!(doc.is_checked("fd1-leap"), Some(false));
    }

    #[test]
    fn test_missing_checkbox_is_reported() {
        let mut doc = InMemoryDocument::new()
            .with_button("lhs-button1")
            .with_button("lhs-button2")
            .with_input("fd1-time", "1")
            .with_input("fd2-time", "2");
        let inputs = PageInputs::from_script_src("x.js?cb='lhs-button1'&leap='on'");

        let report = initialize(&mut doc, &simple_interest(), &inputs, None);

        assert!(report.focus.is_ok());
        assert_eq!(
            report.checkbox_issues,
            vec![DocumentError::MissingElement("fd1-leap".into())]
        );
    }

    #[test]
    fn test_injected_token_ignores_script_params() {
        let config = PageConfig::new(
            "mortgage",
            vec![
                TabEntry::new("lhs-button1", "fd1-time").notifying(),
                TabEntry::new("lhs-button2", "fd2-time"),
            ],
        )
        .with_token(TokenSource::Injected {
            variable: "currentButton".into(),
        });
        let mut doc = document();
        let inputs =
            PageInputs::from_script_src("x.js?cb='lhs-button2'").with_injected_token("lhs-button1");
        let notified = Cell::new(0);

        let report = initialize(
            &mut doc,
            &config,
            &inputs,
            Some(Box::new(|_: &TabEntry| notified.set(notified.get() + 1))),
        );

        assert_eq!(report.selected, Some(SelectedTab::new("lhs-button1")));
        assert_eq!(doc.is_disabled("lhs-button1"), Some(true));
        assert_eq!(doc.is_disabled("lhs-button2"), Some(false));
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_no_script_src_reports_missing_token() {
        let mut doc = document();

        let report = initialize(&mut doc, &simple_interest(), &PageInputs::default(), None);

        assert_eq!(doc.focused(), None);
        assert!(report.focus.is_err());
        assert_eq!(doc.is_checked("fd1-leap"), Some(false));
    }
}
