pub mod catalog;
pub mod controller;
pub mod document;
pub mod models;
pub mod page;
pub mod params;

pub use catalog::PageCatalog;
pub use controller::{
    FieldNotFound, FocusedField, TabNotifier, TabReport, TabStateController, TabStateError,
    apply_tab_state,
};
pub use document::{DocumentError, InMemoryDocument, TabDocument};
pub use models::*;
pub use page::{PageInputs, initialize};
pub use params::{ParamIssue, ParameterMap, extract_params, parse_query, parse_query_reporting};
