use serde::{Deserialize, Serialize};

/// One selectable tab: the button that selects it and the input it focuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabEntry {
    pub button_id: String,
    pub field_id: String,

    /// Button stays disabled whichever tab is selected.
    #[serde(default)]
    pub locked: bool,

    /// Selecting this tab fires the page's notification callback.
    #[serde(default)]
    pub notify: bool,
}

impl TabEntry {
    pub fn new(
        button_id: impl Into<String>,
        field_id: impl Into<String>,
    ) -> Self {
        Self {
            button_id: button_id.into(),
            field_id: field_id.into(),
            locked: false,
            notify: false,
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn notifying(mut self) -> Self {
        self.notify = true;
        self
    }

    /// Disabled state this entry's button takes when `selected` is active.
    pub fn disabled_for(
        &self,
        selected: &str,
    ) -> bool {
        self.locked || self.button_id == selected
    }
}
