//! Search index over symbol and kaomoji entries.
//!
//! Each entry is indexed under one composite string (glyph, name and tags).
//! Matching is typo-tolerant and location-agnostic; see [`fuzzy`] for the
//! scoring and [`extended`] for the query syntax.

pub mod extended;
pub mod fuzzy;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Catalog, CatalogEntry};
use extended::Query;

/// Matcher tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Highest accepted score: 0.0 only accepts exact occurrences, larger
    /// values accept more typos.
    pub threshold: f64,
    /// Enable operator syntax (`=`, `'`, `!`, `^`, `$`, `|`).
    pub extended: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            extended: true,
        }
    }
}

/// One ranked result. `rank` is the match score: 0.0 is a perfect match and
/// larger is worse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub entry: &'a CatalogEntry,
    pub rank: f64,
}

#[derive(Debug, Clone)]
struct IndexedDoc {
    entry: CatalogEntry,
    text: String,
    chars: Vec<char>,
}

/// Immutable index, built once per catalog load.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    docs: Vec<IndexedDoc>,
    options: SearchOptions,
}

/// Trim `query`; `None` means "no search", not "match everything".
pub fn normalize_query(query: &str) -> Option<&str> {
    let q = query.trim();
    (!q.is_empty()).then_some(q)
}

impl SearchIndex {
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a CatalogEntry>) -> Self {
        Self::build_with(entries, SearchOptions::default())
    }

    pub fn build_with<'a>(
        entries: impl IntoIterator<Item = &'a CatalogEntry>,
        options: SearchOptions,
    ) -> Self {
        let docs: Vec<IndexedDoc> = entries
            .into_iter()
            .map(|entry| {
                let text = entry.search_text().trim().to_lowercase();
                let chars = text.chars().collect();
                IndexedDoc {
                    entry: entry.clone(),
                    text,
                    chars,
                }
            })
            .collect();
        info!(documents = docs.len(), "search index built");
        Self { docs, options }
    }

    /// Index the searchable part of `catalog` (symbols, then kaomoji).
    pub fn from_catalog(catalog: &Catalog, options: SearchOptions) -> Self {
        Self::build_with(catalog.searchable(), options)
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Ranked hits for `query`, best first; ties keep index order.
    /// Returns `None` when the query is blank after trimming.
    pub fn search(&self, query: &str) -> Option<Vec<SearchHit<'_>>> {
        let q = normalize_query(query)?;
        let parsed = if self.options.extended {
            Query::extended(q)
        } else {
            Query::plain(q)
        };
        let threshold = self.options.threshold;
        let mut scored: Vec<(usize, f64)> = self
            .docs
            .par_iter()
            .enumerate()
            .filter_map(|(i, d)| parsed.score(&d.text, &d.chars, threshold).map(|s| (i, s)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        debug!(query = q, hits = scored.len(), "search executed");
        Some(
            scored
                .into_iter()
                .map(|(i, rank)| SearchHit {
                    entry: &self.docs[i].entry,
                    rank,
                })
                .collect(),
        )
    }
}
