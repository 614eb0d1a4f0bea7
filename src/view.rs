//! Filter/view engine: turns the catalog plus the current [`ViewState`] into
//! the exact ordered list the host displays.
//!
//! Exactly one of two modes is active. With a non-blank query the result is
//! ranked search hits over the whole symbol and kaomoji corpus, regardless of
//! tab and category. Otherwise the active tab decides: a stable category
//! filter for symbols/kaomoji, or one transformed row per font.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{ALL_CATEGORY, Catalog, CatalogEntry, EntryKind, FontTransform};
use crate::search::{SearchHit, SearchIndex, normalize_query};

/// Text transformed on the fonts tab while the input box is empty.
pub const DEFAULT_FONT_PLACEHOLDER: &str = "请输入文字进行转换";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Symbols,
    Kaomoji,
    Fonts,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Symbols, Tab::Kaomoji, Tab::Fonts];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Symbols => "symbols",
            Tab::Kaomoji => "kaomoji",
            Tab::Fonts => "fonts",
        }
    }

    /// Entry kind listed on this tab; fonts list transforms instead.
    pub fn kind(self) -> Option<EntryKind> {
        match self {
            Tab::Symbols => Some(EntryKind::Symbol),
            Tab::Kaomoji => Some(EntryKind::Kaomoji),
            Tab::Fonts => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tab '{}', expected symbols, kaomoji or fonts", s))
    }
}

/// The minimal state that fully determines what is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub tab: Tab,
    /// [`ALL_CATEGORY`] is the wildcard.
    pub category: String,
    /// Empty means no search.
    pub query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            category: ALL_CATEGORY.to_string(),
            query: String::new(),
        }
    }
}

impl ViewState {
    /// The trimmed query, or `None` when the view is in filter mode.
    pub fn search_query(&self) -> Option<&str> {
        normalize_query(&self.query)
    }

    pub fn is_searching(&self) -> bool {
        self.search_query().is_some()
    }
}

/// One rendered fancy-font row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRow<'a> {
    pub font: &'a FontTransform,
    pub text: String,
}

/// Which panel the host shows for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    SearchResults,
    /// A search ran and found nothing.
    NoResults,
    Symbols,
    Kaomoji,
    Fonts,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Search {
        query: String,
        hits: Vec<SearchHit<'a>>,
    },
    Entries {
        kind: EntryKind,
        category: String,
        entries: Vec<&'a CatalogEntry>,
    },
    Fonts {
        input: String,
        rows: Vec<FontRow<'a>>,
    },
}

impl View<'_> {
    pub fn len(&self) -> usize {
        match self {
            View::Search { hits, .. } => hits.len(),
            View::Entries { entries, .. } => entries.len(),
            View::Fonts { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn panel(&self) -> Panel {
        match self {
            View::Search { hits, .. } if hits.is_empty() => Panel::NoResults,
            View::Search { .. } => Panel::SearchResults,
            View::Entries {
                kind: EntryKind::Symbol,
                ..
            } => Panel::Symbols,
            View::Entries {
                kind: EntryKind::Kaomoji,
                ..
            } => Panel::Kaomoji,
            View::Fonts { .. } => Panel::Fonts,
        }
    }

    /// Text each item copies when clicked, in display order.
    pub fn copy_texts(&self) -> Vec<&str> {
        match self {
            View::Search { hits, .. } => hits.iter().map(|h| h.entry.display.as_str()).collect(),
            View::Entries { entries, .. } => entries.iter().map(|e| e.display.as_str()).collect(),
            View::Fonts { rows, .. } => rows.iter().map(|r| r.text.as_str()).collect(),
        }
    }
}

/// Compute the view with the default font placeholder.
pub fn compute_view<'a>(
    catalog: &'a Catalog,
    index: &'a SearchIndex,
    state: &ViewState,
    font_input: &str,
) -> View<'a> {
    compute_view_with(catalog, index, state, font_input, DEFAULT_FONT_PLACEHOLDER)
}

pub fn compute_view_with<'a>(
    catalog: &'a Catalog,
    index: &'a SearchIndex,
    state: &ViewState,
    font_input: &str,
    placeholder: &str,
) -> View<'a> {
    if let Some(q) = state.search_query() {
        return View::Search {
            query: q.to_string(),
            hits: index.search(q).unwrap_or_default(),
        };
    }
    match state.tab.kind() {
        Some(kind) => View::Entries {
            kind,
            category: state.category.clone(),
            entries: filter_entries(catalog.entries(kind), &state.category),
        },
        None => {
            let input = if font_input.is_empty() {
                placeholder
            } else {
                font_input
            };
            View::Fonts {
                input: input.to_string(),
                rows: render_fonts(&catalog.fonts, input),
            }
        }
    }
}

/// Stable category filter; catalog order is preserved.
pub fn filter_entries<'a>(entries: &'a [CatalogEntry], category: &str) -> Vec<&'a CatalogEntry> {
    entries.iter().filter(|e| e.in_category(category)).collect()
}

/// One row per font, in catalog order.
pub fn render_fonts<'a>(fonts: &'a [FontTransform], input: &str) -> Vec<FontRow<'a>> {
    fonts
        .iter()
        .map(|font| FontRow {
            font,
            text: font.apply(input),
        })
        .collect()
}

/// Substitute every character of `text` found in `mapping`; other
/// characters, and characters mapped to an empty string, pass through.
/// Works on whole characters, never code units.
pub fn transform_text(text: &str, mapping: &IndexMap<char, String>) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match mapping.get(&c) {
            Some(replacement) if !replacement.is_empty() => out.push_str(replacement),
            _ => out.push(c),
        }
    }
    out
}
