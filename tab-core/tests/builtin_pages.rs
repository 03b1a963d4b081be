//! Drives every page of the shipped catalog end to end against an
//! in-memory document laid out the way the calculator templates render it.

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use tab_core::{
    InMemoryDocument, PageCatalog, PageConfig, PageInputs, TabEntry, TabStateError, TokenSource,
    initialize,
};

fn catalog() -> PageCatalog {
    init_tracing();
    PageCatalog::builtin().expect("builtin catalog should load")
}

/// Shows controller logs with `RUST_LOG=tab_core=debug cargo test`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Renders every button, field and checkbox `page` refers to.
fn render(page: &PageConfig) -> InMemoryDocument {
    let mut doc = InMemoryDocument::new();
    for (n, tab) in page.tabs.iter().enumerate() {
        doc = doc
            .with_button(&tab.button_id)
            .with_input(&tab.field_id, format!("{}", (n + 1) * 100));
    }
    for checkbox in &page.checkboxes {
        doc = doc.with_checkbox(&checkbox.element_id, false);
    }
    doc
}

fn inputs_for(
    page: &PageConfig,
    token: &str,
) -> PageInputs {
    match &page.token {
        TokenSource::Param { key } => {
            PageInputs::from_script_src(format!("/public/js/{}.js?{key}='{token}'", page.name))
        }
        TokenSource::Injected { .. } => {
            PageInputs::from_script_src(format!("/public/js/{}.js", page.name))
                .with_injected_token(token)
        }
    }
}

#[test]
fn test_builtin_page_names() {
    let names: Vec<_> = catalog().names().map(str::to_string).collect();

    assert_eq!(
        names,
        vec![
            "simple-interest-accurate",
            "oa-perpetuity",
            "mortgage",
            "miscellaneous",
            "ad-future-value",
            "oa-interest-rate",
            "bonds",
        ]
    );
}

#[test]
fn test_every_tab_of_every_page() {
    let catalog = catalog();

    for page in catalog.iter() {
        for selected in &page.tabs {
            let mut doc = render(page);

            let report = initialize(
                &mut doc,
                page,
                &inputs_for(page, &selected.button_id),
                None,
            );

            assert!(report.is_clean(), "{} / {}: {report:?}", page.name, selected.button_id);
            for tab in &page.tabs {
                let expected = tab.locked || tab.button_id == selected.button_id;
                assert_eq!(
                    doc.is_disabled(&tab.button_id),
                    Some(expected),
                    "{}: {} with {} selected",
                    page.name,
                    tab.button_id,
                    selected.button_id
                );
            }
            assert_eq!(doc.focused(), Some(selected.field_id.as_str()));
            let value = doc_value_len(&page.tabs, selected);
            assert_eq!(doc.selection(&selected.field_id), Some((0, value)));
        }
    }
}

fn doc_value_len(
    tabs: &[TabEntry],
    selected: &TabEntry,
) -> u32 {
    let n = tabs
        .iter()
        .position(|t| t.button_id == selected.button_id)
        .expect("selected tab is on the page");
    format!("{}", (n + 1) * 100).len() as u32
}

#[test]
fn test_unknown_token_on_every_page_fails_softly() {
    let catalog = catalog();

    for page in catalog.iter() {
        let mut doc = render(page);

        let report = initialize(&mut doc, page, &inputs_for(page, "lhs-button99"), None);

        assert_eq!(
            report.button_issue,
            Some(TabStateError::UnmatchedTab("lhs-button99".into())),
            "{}",
            page.name
        );
        assert!(report.focus.is_err());
        assert_eq!(doc.focused(), None);
        for tab in &page.tabs {
            assert_eq!(doc.is_disabled(&tab.button_id), Some(false));
        }
    }
}

#[test]
fn test_bonds_keeps_fifth_tab_locked() {
    let catalog = catalog();
    let bonds = catalog.page("bonds").unwrap();
    let mut doc = render(bonds);

    let report = initialize(&mut doc, bonds, &inputs_for(bonds, "lhs-button7"), None);

    assert_eq!(
        report.disabled,
        vec!["lhs-button5".to_string(), "lhs-button7".to_string()]
    );
    assert_eq!(doc.focused(), Some("fd7-facevalue"));
}

#[test]
fn test_mortgage_reads_injected_token_and_notifies() {
    let catalog = catalog();
    let mortgage = catalog.page("mortgage").unwrap();
    assert!(mortgage.notify_sound.is_some());
    let activated = RefCell::new(Vec::new());

    for token in ["lhs-button1", "lhs-button2", "lhs-button3"] {
        let mut doc = render(mortgage);
        let inputs = PageInputs::from_script_src("/public/js/mortgage.js?cb='lhs-button3'")
            .with_injected_token(token);

        initialize(
            &mut doc,
            mortgage,
            &inputs,
            Some(Box::new(|tab: &TabEntry| {
                activated.borrow_mut().push(tab.button_id.clone())
            })),
        );

        assert_eq!(doc.is_disabled(token), Some(true));
    }

    assert_eq!(
        *activated.borrow(),
        vec!["lhs-button1".to_string(), "lhs-button2".to_string()]
    );
}

#[test]
fn test_simple_interest_leap_checkbox_follows_param() {
    let catalog = catalog();
    let page = catalog.page("simple-interest-accurate").unwrap();

    let mut on = render(page);
    initialize(
        &mut on,
        page,
        &PageInputs::from_script_src("/js/SimpleInterestAccurate.js?cb='lhs-button4';leap='on'"),
        None,
    );
    let mut off = render(page);
    initialize(
        &mut off,
        page,
        &PageInputs::from_script_src("/js/SimpleInterestAccurate.js?cb='lhs-button4';leap='off'"),
        None,
    );

    assert_eq!(on.is_checked("fd1-leap"), Some(true));
    assert_eq!(off.is_checked("fd1-leap"), Some(false));
    assert_eq!(on.focused(), Some("fd4-interest"));
}
