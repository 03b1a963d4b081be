mod page_config;
mod selected_tab;
mod tab_entry;

pub use page_config::{CheckboxBinding, ConfigError, PageConfig, TokenSource};
pub use selected_tab::SelectedTab;
pub use tab_entry::TabEntry;
