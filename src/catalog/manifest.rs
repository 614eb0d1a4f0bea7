//! Which data files make up the catalog, and in what order.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Record schema of a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Symbols,
    Kaomoji,
    Fonts,
}

/// One fetchable data source. Within a kind, sources are concatenated in
/// manifest order, which is the default display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub path: Utf8PathBuf,
    pub kind: SourceKind,
}

impl SourceSpec {
    pub fn new(path: impl Into<Utf8PathBuf>, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// The data files shipped with the site, in fetch order.
pub fn default_manifest() -> Vec<SourceSpec> {
    use SourceKind::*;
    [
        ("symbols.json", Symbols),
        ("symbols2.json", Symbols),
        ("kaomoji.json", Kaomoji),
        ("fonts.json", Fonts),
        ("xiaohongshu.json", Symbols),
        ("emoji.json", Symbols),
        ("plants.json", Symbols),
        ("mystical.json", Symbols),
        ("tarot.json", Symbols),
        ("objects.json", Symbols),
    ]
    .into_iter()
    .map(|(path, kind)| SourceSpec::new(path, kind))
    .collect()
}
