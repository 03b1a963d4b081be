use std::fmt;

use crate::params::ParameterMap;

use super::TokenSource;

/// Token naming the active tab, i.e. the id of its button.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectedTab(String);

impl SelectedTab {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Picks the token from wherever `source` says this page gets it.
    ///
    /// `injected` is the page-scoped value for [`TokenSource::Injected`]
    /// pages and is ignored otherwise.
    pub fn resolve(
        source: &TokenSource,
        params: &ParameterMap,
        injected: Option<&str>,
    ) -> Option<Self> {
        match source {
            TokenSource::Param { key } => params.get(key).map(Self::new),
            TokenSource::Injected { .. } => injected.map(Self::new),
        }
    }
}

impl fmt::Display for SelectedTab {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SelectedTab {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for SelectedTab {
    fn from(token: String) -> Self {
        Self(token)
    }
}
