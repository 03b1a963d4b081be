use tab_core::ConfigError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures that stop a page helper from starting at all.
///
/// Problems found while applying the tab state are not errors here; they
/// are logged and the page keeps loading.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("page configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("browser call failed: {0}")]
    Js(String),
}

impl WebError {
    pub(crate) fn js(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
