//! The document seam the tab controller mutates.
//!
//! In the browser this is the live DOM (see the `tab-web` crate). On the
//! host, [`InMemoryDocument`] stands in for it so page behaviour can be
//! exercised without a browser.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("element '{0}' is not present in the document")]
    MissingElement(String),

    #[error("element '{id}' is not {expected}")]
    WrongKind { id: String, expected: &'static str },

    #[error("cannot select text in '{id}': {reason}")]
    Selection { id: String, reason: String },
}

/// Element operations needed to apply a page's tab state.
pub trait TabDocument {
    /// Checks that `id` is present and can be disabled, without changing it.
    fn check_button(
        &self,
        id: &str,
    ) -> Result<(), DocumentError>;

    fn set_disabled(
        &mut self,
        id: &str,
        disabled: bool,
    ) -> Result<(), DocumentError>;

    /// Current textual value of an input field.
    fn field_value(
        &self,
        id: &str,
    ) -> Result<String, DocumentError>;

    /// Gives `id` keyboard focus and selects `[start, end)` of its value.
    /// Offsets are UTF-16 code units.
    fn focus_and_select(
        &mut self,
        id: &str,
        start: u32,
        end: u32,
    ) -> Result<(), DocumentError>;

    fn set_checked(
        &mut self,
        id: &str,
        checked: bool,
    ) -> Result<(), DocumentError>;

    /// Focuses `id` with its whole current value selected.
    /// Returns the selection end.
    fn focus_and_select_all(
        &mut self,
        id: &str,
    ) -> Result<u32, DocumentError> {
        let end = utf16_len(&self.field_value(id)?);
        self.focus_and_select(id, 0, end)?;
        Ok(end)
    }
}

/// Length of `value` as the browser counts it for selection ranges.
pub fn utf16_len(value: &str) -> u32 {
    u32::try_from(value.encode_utf16().count()).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Button,
    Input,
    Checkbox,
}

#[derive(Debug, Clone)]
struct Element {
    kind: ElementKind,
    disabled: bool,
    value: String,
    checked: bool,
    selection: Option<(u32, u32)>,
}

impl Element {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            disabled: false,
            value: String::new(),
            checked: false,
            selection: None,
        }
    }
}

/// Element table with just enough state to observe tab behaviour.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    elements: HashMap<String, Element>,
    focused: Option<String>,
    focus_count: usize,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_button(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.elements
            .insert(id.into(), Element::new(ElementKind::Button));
        self
    }

    pub fn with_disabled_button(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        let mut button = Element::new(ElementKind::Button);
        button.disabled = true;
        self.elements.insert(id.into(), button);
        self
    }

    pub fn with_input(
        mut self,
        id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut input = Element::new(ElementKind::Input);
        input.value = value.into();
        self.elements.insert(id.into(), input);
        self
    }

    pub fn with_checkbox(
        mut self,
        id: impl Into<String>,
        checked: bool,
    ) -> Self {
        let mut checkbox = Element::new(ElementKind::Checkbox);
        checkbox.checked = checked;
        self.elements.insert(id.into(), checkbox);
        self
    }

    pub fn is_disabled(
        &self,
        id: &str,
    ) -> Option<bool> {
        self.elements.get(id).map(|e| e.disabled)
    }

    pub fn is_checked(
        &self,
        id: &str,
    ) -> Option<bool> {
        self.elements.get(id).map(|e| e.checked)
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Number of times any element received focus.
    pub fn focus_count(&self) -> usize {
        self.focus_count
    }

    pub fn selection(
        &self,
        id: &str,
    ) -> Option<(u32, u32)> {
        self.elements.get(id).and_then(|e| e.selection)
    }

    fn element(
        &self,
        id: &str,
        expected: ElementKind,
    ) -> Result<&Element, DocumentError> {
        let element = self
            .elements
            .get(id)
            .ok_or_else(|| DocumentError::MissingElement(id.to_string()))?;
        check_kind(id, element, expected)?;
        Ok(element)
    }

    fn element_mut(
        &mut self,
        id: &str,
        expected: ElementKind,
    ) -> Result<&mut Element, DocumentError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| DocumentError::MissingElement(id.to_string()))?;
        check_kind(id, element, expected)?;
        Ok(element)
    }
}

fn check_kind(
    id: &str,
    element: &Element,
    expected: ElementKind,
) -> Result<(), DocumentError> {
    if element.kind != expected {
        return Err(DocumentError::WrongKind {
            id: id.to_string(),
            expected: kind_name(expected),
        });
    }
    Ok(())
}

fn kind_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Button => "a button",
        ElementKind::Input => "an input field",
        ElementKind::Checkbox => "a checkbox",
    }
}

impl TabDocument for InMemoryDocument {
    fn check_button(
        &self,
        id: &str,
    ) -> Result<(), DocumentError> {
        self.element(id, ElementKind::Button).map(|_| ())
    }

    fn set_disabled(
        &mut self,
        id: &str,
        disabled: bool,
    ) -> Result<(), DocumentError> {
        self.element_mut(id, ElementKind::Button)?.disabled = disabled;
        Ok(())
    }

    fn field_value(
        &self,
        id: &str,
    ) -> Result<String, DocumentError> {
        self.element(id, ElementKind::Input).map(|e| e.value.clone())
    }

    fn focus_and_select(
        &mut self,
        id: &str,
        start: u32,
        end: u32,
    ) -> Result<(), DocumentError> {
        let input = self.element_mut(id, ElementKind::Input)?;
        if start > end || end > utf16_len(&input.value) {
            return Err(DocumentError::Selection {
                id: id.to_string(),
                reason: format!("range {start}..{end} is outside the value"),
            });
        }
        input.selection = Some((start, end));

        self.focused = Some(id.to_string());
        self.focus_count += 1;
        Ok(())
    }

    fn set_checked(
        &mut self,
        id: &str,
        checked: bool,
    ) -> Result<(), DocumentError> {
        self.element_mut(id, ElementKind::Checkbox)?.checked = checked;
        Ok(())
    }
}
