//! On-disk JSON record schemas and their conversion into catalog types.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::{CatalogEntry, EntryKind, FontTransform};

#[derive(Debug, Deserialize)]
pub struct SymbolRecord {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct KaomojiRecord {
    pub kaomoji: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct FontRecord {
    pub name: String,
    pub mapping: IndexMap<String, String>,
}

impl From<SymbolRecord> for CatalogEntry {
    fn from(r: SymbolRecord) -> Self {
        CatalogEntry {
            kind: EntryKind::Symbol,
            display: r.symbol,
            name: r.name,
            category: r.category.unwrap_or_default(),
            tags: r.tags.unwrap_or_default(),
        }
    }
}

impl From<KaomojiRecord> for CatalogEntry {
    fn from(r: KaomojiRecord) -> Self {
        CatalogEntry {
            kind: EntryKind::Kaomoji,
            display: r.kaomoji,
            name: r.name,
            category: r.category.unwrap_or_default(),
            tags: r.tags.unwrap_or_default(),
        }
    }
}

impl TryFrom<FontRecord> for FontTransform {
    type Error = String;

    /// Mapping keys must be exactly one character.
    fn try_from(r: FontRecord) -> Result<Self, Self::Error> {
        let mut mapping = IndexMap::with_capacity(r.mapping.len());
        for (key, value) in r.mapping {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    mapping.insert(c, value);
                }
                _ => {
                    return Err(format!(
                        "font '{}' has mapping key {:?}, expected a single character",
                        r.name, key
                    ));
                }
            }
        }
        Ok(FontTransform {
            name: r.name,
            mapping,
        })
    }
}
