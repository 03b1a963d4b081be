//! Start-up sequence: capture the script URL while the helper script is
//! still executing, then apply the page's tab state once the document is
//! ready.

use tab_core::{
    PageCatalog, PageConfig, PageInputs, TabNotifier, TabReport, TokenSource, extract_params,
    initialize,
};
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::Window;

use crate::audio::AudioNotifier;
use crate::dom::{WebDocument, current_script_src, injected_token};
use crate::error::WebError;
use crate::logging;

/// Script parameter that sets the log filter for the page.
const LOG_PARAM: &str = "log";

/// Starts the helper for `page`.
///
/// `token`, when given, selects the tab directly instead of the page's
/// configured token source.
pub fn start(
    catalog: &PageCatalog,
    page: &str,
    token: Option<String>,
) -> Result<(), WebError> {
    let config = effective_config(catalog, page, token.is_some())?;

    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let dom = WebDocument::from_window(&window)?;
    let script_src = current_script_src(dom.document());

    if let Some(level) = log_level_param(script_src.as_deref()) {
        if let Err(e) = logging::set_log_level(&level) {
            warn!(%level, error = %e, "ignoring log level parameter");
        }
    }
    debug!(page, script_src = ?script_src, "page helper loaded");

    let document = dom.document().clone();
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            run(&window, dom, &config, script_src, token);
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(WebError::js)?;
    } else {
        run(&window, dom, &config, script_src, token);
    }
    Ok(())
}

fn run(
    window: &Window,
    mut dom: WebDocument,
    config: &PageConfig,
    script_src: Option<String>,
    token: Option<String>,
) -> TabReport {
    // Injected variables are read now; the page may define them after the helper script tag.
    let injected = token.or_else(|| match &config.token {
        TokenSource::Injected { variable } => injected_token(window, variable),
        TokenSource::Param { .. } => None,
    });
    let inputs = PageInputs {
        script_src,
        injected_token: injected,
    };

    let report = initialize(&mut dom, config, &inputs, notifier_for(config));
    if report.is_clean() {
        info!(page = %config.name, selected = ?report.selected, "page ready");
    }
    report
}

fn notifier_for(config: &PageConfig) -> Option<Box<dyn TabNotifier>> {
    let src = config.notify_sound.as_deref()?;
    match AudioNotifier::new(src) {
        Ok(notifier) => Some(Box::new(notifier)),
        Err(e) => {
            warn!(page = %config.name, error = %e, "tab sound unavailable");
            None
        }
    }
}

/// The page's configuration, switched to an injected token when the
/// caller supplies the token itself.
pub(crate) fn effective_config(
    catalog: &PageCatalog,
    page: &str,
    explicit_token: bool,
) -> Result<PageConfig, WebError> {
    let mut config = catalog.page(page)?.clone();
    if explicit_token && matches!(config.token, TokenSource::Param { .. }) {
        // No page variable to read; the value comes from the caller.
        config.token = TokenSource::Injected {
            variable: String::new(),
        };
    }
    Ok(config)
}

pub(crate) fn log_level_param(script_src: Option<&str>) -> Option<String> {
    extract_params(script_src?)
        .get(LOG_PARAM)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_token_switches_param_page_to_injected() {
        let catalog = PageCatalog::builtin().unwrap();

        let config = effective_config(&catalog, "bonds", true).unwrap();

        assert!(matches!(config.token, TokenSource::Injected { .. }));
    }

    #[test]
    fn without_explicit_token_config_is_unchanged() {
        let catalog = PageCatalog::builtin().unwrap();

        let bonds = effective_config(&catalog, "bonds", false).unwrap();
        let mortgage = effective_config(&catalog, "mortgage", true).unwrap();

        assert_eq!(&bonds, catalog.page("bonds").unwrap());
        assert_eq!(&mortgage, catalog.page("mortgage").unwrap());
    }

    #[test]
    fn unknown_page_is_a_config_error() {
        let catalog = PageCatalog::builtin().unwrap();

        let err = effective_config(&catalog, "payroll", false).unwrap_err();

        assert!(matches!(err, WebError::Config(_)));
    }

    #[test]
    fn log_param_is_read_from_script_src() {
        assert_eq!(
            log_level_param(Some("/js/bonds.js?cb='lhs-button1';log='debug'")),
            Some("debug".to_string())
        );
        assert_eq!(log_level_param(Some("/js/bonds.js?cb='lhs-button1'")), None);
        assert_eq!(log_level_param(None), None);
    }
}
