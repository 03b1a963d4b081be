//! Browser host for the calculator tab helpers.
//!
//! Each calculator page loads a small module script whose own URL carries
//! the selected tab:
//!
//! ```html
//! <script type="module" src="/public/js/bonds.js?cb='lhs-button3'"></script>
//! ```
//!
//! and that script starts the helper for its page:
//!
//! ```js
//! import init, { startPage } from "/pkg/tab_web.js";
//! await init();
//! startPage("bonds");
//! ```

pub mod audio;
pub mod boot;
pub mod dom;
pub mod error;
pub mod logging;

use tab_core::PageCatalog;
use wasm_bindgen::prelude::*;

pub use dom::WebDocument;
pub use error::WebError;

/// Starts the helper for a built-in page.
#[wasm_bindgen(js_name = startPage)]
pub fn start_page(page: &str) -> Result<(), JsValue> {
    logging::init_default_logging();
    let catalog = PageCatalog::builtin().map_err(WebError::from)?;
    Ok(boot::start(&catalog, page, None)?)
}

/// Starts the helper for a built-in page with the tab token supplied by
/// the caller rather than read from the page.
#[wasm_bindgen(js_name = startPageWithToken)]
pub fn start_page_with_token(
    page: &str,
    token: &str,
) -> Result<(), JsValue> {
    logging::init_default_logging();
    let catalog = PageCatalog::builtin().map_err(WebError::from)?;
    Ok(boot::start(&catalog, page, Some(token.to_string()))?)
}

/// Starts the helper for a page described by a TOML catalog.
#[wasm_bindgen(js_name = startPageFromToml)]
pub fn start_page_from_toml(
    catalog_toml: &str,
    page: &str,
) -> Result<(), JsValue> {
    logging::init_default_logging();
    let catalog = PageCatalog::from_toml_str(catalog_toml).map_err(WebError::from)?;
    Ok(boot::start(&catalog, page, None)?)
}

#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    logging::set_log_level(level).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = setConsoleEnabled)]
pub fn set_console_enabled(enabled: bool) -> Result<(), JsValue> {
    logging::set_console_enabled(enabled).map_err(|e| JsValue::from_str(&e.to_string()))
}
