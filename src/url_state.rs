//! URL state sync: maps [`ViewState`] to query parameters and back, plus the
//! `/s/<text>` deep-link path convention.
//!
//! Query parameters: `tab` (always written), `category` (omitted for the
//! wildcard) and `q` (omitted when not searching). Unrelated parameters are
//! preserved. A deep-link path only affects page metadata; it never changes
//! the view state.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::model::ALL_CATEGORY;
use crate::view::{Tab, ViewState};

pub const PARAM_TAB: &str = "tab";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_QUERY: &str = "q";

/// Path prefix of single-item deep links.
pub const DEEP_LINK_PREFIX: &str = "/s/";

pub const SITE_NAME: &str = "SymbolCopy";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Write `state` into the query of `current`, returning the new location.
pub fn serialize(state: &ViewState, current: &Url) -> Url {
    let mut url = current.clone();
    let kept: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(k, _)| !matches!(&**k, PARAM_TAB | PARAM_CATEGORY | PARAM_QUERY))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(PARAM_TAB, state.tab.as_str());
        if state.category != ALL_CATEGORY {
            pairs.append_pair(PARAM_CATEGORY, &state.category);
        }
        if let Some(q) = state.search_query() {
            pairs.append_pair(PARAM_QUERY, q);
        }
    }
    url
}

/// Parameters read from a location at load time. Absent or invalid values
/// are `None` and leave the corresponding state at its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    pub tab: Option<Tab>,
    pub category: Option<String>,
    pub query: Option<String>,
    /// Decoded text of a `/s/<text>` path. Metadata only.
    pub deep_link: Option<String>,
}

impl UrlParams {
    /// Apply the view-state parameters to `state`.
    pub fn apply(&self, state: &mut ViewState) {
        if let Some(tab) = self.tab {
            state.tab = tab;
        }
        if let Some(category) = &self.category {
            state.category = category.clone();
        }
        if let Some(query) = &self.query {
            state.query = query.trim().to_string();
        }
    }

    /// The view state a fresh page load ends up in.
    pub fn view_state(&self) -> ViewState {
        let mut state = ViewState::default();
        self.apply(&mut state);
        state
    }
}

/// Read the view parameters and deep link from `url`.
pub fn deserialize(url: &Url) -> UrlParams {
    let first = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    };
    UrlParams {
        tab: first(PARAM_TAB).and_then(|t| t.parse().ok()),
        category: first(PARAM_CATEGORY),
        query: first(PARAM_QUERY),
        deep_link: deep_link_text(url),
    }
}

/// Path of the deep link for `text`, e.g. `/s/%E2%98%85` for `★`.
pub fn deep_link_path(text: &str) -> String {
    format!("{}{}", DEEP_LINK_PREFIX, utf8_percent_encode(text, URI_COMPONENT))
}

/// Decoded item of a `/s/<text>` location. `None` for any other path or
/// when the text is not valid UTF-8.
pub fn deep_link_text(url: &Url) -> Option<String> {
    let encoded = url.path().strip_prefix(DEEP_LINK_PREFIX)?;
    if encoded.is_empty() {
        return None;
    }
    percent_decode_str(encoded)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Page metadata the host exposes (document title).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            title: SITE_NAME.to_string(),
        }
    }
}

impl PageMeta {
    /// Metadata for a shared deep link to `text`.
    pub fn for_deep_link(text: &str) -> Self {
        Self {
            title: format!("{} - {}", text, SITE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_path_matches_uri_component_encoding() {
        assert_eq!(deep_link_path("★"), "/s/%E2%98%85");
        assert_eq!(deep_link_path("(^_^)"), "/s/(%5E_%5E)");
        assert_eq!(deep_link_path("a b/c"), "/s/a%20b%2Fc");
    }

    #[test]
    fn deep_link_text_requires_prefix_and_content() {
        let url = Url::parse("https://x.test/s/%E2%98%85").unwrap();
        assert_eq!(deep_link_text(&url).as_deref(), Some("★"));
        let url = Url::parse("https://x.test/s/").unwrap();
        assert_eq!(deep_link_text(&url), None);
        let url = Url::parse("https://x.test/symbols").unwrap();
        assert_eq!(deep_link_text(&url), None);
    }
}
