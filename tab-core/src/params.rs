//! Parameter extraction from the hosting script's own source URL.
//!
//! Calculator pages load their helper script as
//! `page.js?cb='lhs-button2';leap='on'`: pairs are separated by `;` or `&`,
//! keys and values are percent-encoded, and every value is wrapped in one
//! delimiter character on each side. The wrapper is removed by position,
//! not by matching quotes.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

/// Why a query segment was left out of the [`ParameterMap`].
///
/// None of these are fatal; the segment is skipped and the rest of the
/// query is still parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamIssue {
    #[error("segment '{0}' is not a single key=value pair")]
    MalformedPair(String),

    #[error("segment '{0}' is not valid percent-encoded UTF-8")]
    Decode(String),

    #[error("value for '{key}' is shorter than its two wrapper characters")]
    ShortValue { key: String },
}

/// Decoded key/value parameters of one page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    values: HashMap<String, String>,
}

impl ParameterMap {
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Returns the query portion of a script source URL, if it has one.
///
/// The query is everything after the first `?`, minus any `#fragment`.
/// Input without a `?` that does not look like a URL (no `://` and no
/// leading `/`) is taken to be a bare query string.
pub fn query_portion(source_url: &str) -> Option<&str> {
    let query = match source_url.split_once('?') {
        Some((_, query)) => query,
        None if !looks_like_url(source_url) => source_url,
        None => return None,
    };
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    (!query.is_empty()).then_some(query)
}

fn looks_like_url(input: &str) -> bool {
    input.starts_with('/') || input.contains("://")
}

/// Extracts the wrapped parameters carried by a script source URL.
///
/// Returns an empty map when the URL has no query portion.
pub fn extract_params(source_url: &str) -> ParameterMap {
    query_portion(source_url)
        .map(parse_query)
        .unwrap_or_default()
}

/// Parses a bare query string, silently skipping segments that cannot be used.
pub fn parse_query(query: &str) -> ParameterMap {
    let (params, issues) = parse_query_reporting(query);
    for issue in &issues {
        debug!(%issue, "skipped script parameter");
    }
    params
}

/// Parses a bare query string and also returns every skipped segment.
pub fn parse_query_reporting(query: &str) -> (ParameterMap, Vec<ParamIssue>) {
    let mut params = ParameterMap::default();
    let mut issues = Vec::new();

    for segment in query.split([';', '&']) {
        match parse_segment(segment) {
            Ok((key, value)) => {
                params.values.insert(key, value);
            }
            Err(issue) => issues.push(issue),
        }
    }

    (params, issues)
}

fn parse_segment(segment: &str) -> Result<(String, String), ParamIssue> {
    let mut parts = segment.split('=');
    let (Some(raw_key), Some(raw_value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParamIssue::MalformedPair(segment.to_string()));
    };

    let key = urlencoding::decode(raw_key)
        .map_err(|_| ParamIssue::Decode(segment.to_string()))?
        .into_owned();
    let value = urlencoding::decode(raw_value)
        .map_err(|_| ParamIssue::Decode(segment.to_string()))?
        .replace('+', " ");

    let value = strip_wrapper(&value).ok_or_else(|| ParamIssue::ShortValue { key: key.clone() })?;
    Ok((key, value.to_string()))
}

/// Removes exactly one leading and one trailing character.
///
/// Returns `None` when the value cannot hold both wrapper characters.
pub fn strip_wrapper(value: &str) -> Option<&str> {
    let mut chars = value.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    Some(&value[first.len_utf8()..value.len() - last.len_utf8()])
}
