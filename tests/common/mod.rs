#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::Result;
use camino::Utf8Path;
use symbolcopy::catalog::{self, ContentSource, SourceKind, SourceSpec};
use symbolcopy::model::Catalog;

pub const SYMBOLS_JSON: &str = r#"[
  {"symbol": "☉", "name": "sun", "category": "planets", "tags": ["astronomy"]},
  {"symbol": "♂", "name": "mars", "category": "planets", "tags": ["astronomy"]},
  {"symbol": "★", "name": "black star", "category": "stars", "tags": ["planets", "shape"]},
  {"symbol": "→", "name": "right arrow", "category": "arrows"}
]"#;

pub const MORE_SYMBOLS_JSON: &str = r#"[
  {"symbol": "♥", "name": "heart", "category": "hearts", "tags": ["love"]}
]"#;

pub const KAOMOJI_JSON: &str = r#"[
  {"kaomoji": "(^_^)", "name": "happy smile", "category": "happy", "tags": ["happy"]},
  {"kaomoji": "(T_T)", "name": "crying", "category": "sad", "tags": ["sad", "tears"]},
  {"kaomoji": "(=^･ω･^=)", "name": "cat face", "category": "animals", "tags": ["cat"]}
]"#;

pub const FONTS_JSON: &str = r#"[
  {"name": "bold", "mapping": {"a": "𝐚", "b": "𝐛", "c": "𝐜"}},
  {"name": "circled", "mapping": {"a": "ⓐ", "b": "ⓑ", "x": ""}}
]"#;

/// In-memory test double keyed by logical path.
pub struct MemSource {
    pub files: HashMap<String, String>,
}

impl MemSource {
    pub fn fixture() -> Self {
        let files = [
            ("symbols.json", SYMBOLS_JSON),
            ("kaomoji.json", KAOMOJI_JSON),
            ("fonts.json", FONTS_JSON),
            ("more.json", MORE_SYMBOLS_JSON),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { files }
    }
}

impl ContentSource for MemSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not found: {}", path))
    }
}

pub fn manifest() -> Vec<SourceSpec> {
    vec![
        SourceSpec::new("symbols.json", SourceKind::Symbols),
        SourceSpec::new("kaomoji.json", SourceKind::Kaomoji),
        SourceSpec::new("fonts.json", SourceKind::Fonts),
        SourceSpec::new("more.json", SourceKind::Symbols),
    ]
}

pub fn catalog() -> Catalog {
    catalog::load(&mut MemSource::fixture(), &manifest()).unwrap()
}
