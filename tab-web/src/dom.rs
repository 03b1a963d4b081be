//! [`TabDocument`] over the live DOM.

use tab_core::{DocumentError, TabDocument};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlInputElement, HtmlScriptElement, Window,
};

use crate::error::WebError;

pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window(window: &Window) -> Result<Self, WebError> {
        window.document().map(Self::new).ok_or(WebError::NoDocument)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(
        &self,
        id: &str,
    ) -> Result<Element, DocumentError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DocumentError::MissingElement(id.to_string()))
    }

    fn input(
        &self,
        id: &str,
    ) -> Result<HtmlInputElement, DocumentError> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| DocumentError::WrongKind {
                id: id.to_string(),
                expected: "an input element",
            })
    }
}

impl TabDocument for WebDocument {
    fn check_button(
        &self,
        id: &str,
    ) -> Result<(), DocumentError> {
        let element = self.element(id)?;
        if element.is_instance_of::<HtmlButtonElement>()
            || element.is_instance_of::<HtmlInputElement>()
        {
            Ok(())
        } else {
            Err(not_a_button(id))
        }
    }

    fn set_disabled(
        &mut self,
        id: &str,
        disabled: bool,
    ) -> Result<(), DocumentError> {
        let element = self.element(id)?;
        // Tab buttons are <button> on most pages and <input type="button"> on some.
        let element = match element.dyn_into::<HtmlButtonElement>() {
            Ok(button) => {
                button.set_disabled(disabled);
                return Ok(());
            }
            Err(element) => element,
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => {
                input.set_disabled(disabled);
                Ok(())
            }
            Err(_) => Err(not_a_button(id)),
        }
    }

    fn field_value(
        &self,
        id: &str,
    ) -> Result<String, DocumentError> {
        Ok(self.input(id)?.value())
    }

    fn focus_and_select(
        &mut self,
        id: &str,
        start: u32,
        end: u32,
    ) -> Result<(), DocumentError> {
        let input = self.input(id)?;
        input.focus().map_err(|e| DocumentError::Selection {
            id: id.to_string(),
            reason: js_reason(&e),
        })?;

        // type="number" and friends reject selection ranges; select() still
        // highlights the whole value there.
        if let Err(e) = input.set_selection_range(start, end) {
            debug!(id, reason = %js_reason(&e), "selection range unsupported, selecting all");
            input.select();
        }
        Ok(())
    }

    fn set_checked(
        &mut self,
        id: &str,
        checked: bool,
    ) -> Result<(), DocumentError> {
        self.input(id)?.set_checked(checked);
        Ok(())
    }
}

fn not_a_button(id: &str) -> DocumentError {
    DocumentError::WrongKind {
        id: id.to_string(),
        expected: "a button",
    }
}

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `src` of the script that is loading the page helper.
///
/// `document.currentScript` is only set while a classic script runs, so when
/// it is gone the last `<script>` carrying a query string is used instead,
/// then the last `<script>` of any kind.
pub fn current_script_src(document: &Document) -> Option<String> {
    if let Some(script) = document
        .current_script()
        .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
    {
        let src = script.src();
        if !src.is_empty() {
            return Some(src);
        }
    }

    let scripts = document.get_elements_by_tag_name("script");
    let sources: Vec<String> = (0..scripts.length())
        .filter_map(|i| scripts.item(i))
        .filter_map(|el| el.dyn_into::<HtmlScriptElement>().ok())
        .map(|script| script.src())
        .collect();
    pick_script_src(&sources).map(str::to_string)
}

/// Chooses the helper script among page scripts in document order.
pub(crate) fn pick_script_src(sources: &[String]) -> Option<&str> {
    sources
        .iter()
        .rev()
        .find(|src| src.contains('?'))
        .or_else(|| sources.iter().rev().find(|src| !src.is_empty()))
        .map(String::as_str)
}

/// Reads a string-valued global such as `currentButton`.
pub fn injected_token(
    window: &Window,
    variable: &str,
) -> Option<String> {
    js_sys::Reflect::get(window, &wasm_bindgen::JsValue::from_str(variable))
        .ok()
        .and_then(|value| value.as_string())
}
