use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Wildcard category: matches every entry of the active kind.
pub const ALL_CATEGORY: &str = "all";

// ────────────────────────────────────────────────────────────────────────────
// Catalog entries
// ────────────────────────────────────────────────────────────────────────────

/// Discriminator of a lookup entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Symbol,
    Kaomoji,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Symbol => "symbol",
            EntryKind::Kaomoji => "kaomoji",
        }
    }
}

/// A single copyable glyph or emoticon sequence. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub kind: EntryKind,
    /// The glyph or sequence that gets copied.
    pub display: String,
    pub name: String,
    /// Primary classification. Empty when the record had none.
    pub category: String,
    /// Secondary labels, in record order.
    pub tags: Vec<String>,
}

impl CatalogEntry {
    /// True when the entry belongs to `category`, either as its primary
    /// category or as one of its tags. The wildcard matches everything.
    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORY
            || self.category == category
            || self.tags.iter().any(|t| t == category)
    }

    /// Composite searchable string: glyph, name and space-joined tags.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.display, self.name, self.tags.join(" "))
    }
}

/// A named character remapping applied to user input (fancy fonts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontTransform {
    pub name: String,
    /// Source character to replacement, in table order.
    pub mapping: IndexMap<char, String>,
}

impl FontTransform {
    pub fn apply(&self, text: &str) -> String {
        crate::view::transform_text(text, &self.mapping)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

/// The full read-only set of lookup tables. Entry order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub symbols: Vec<CatalogEntry>,
    pub kaomoji: Vec<CatalogEntry>,
    pub fonts: Vec<FontTransform>,
}

/// A category together with how many entries carry it as primary category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

impl Catalog {
    pub fn entries(&self, kind: EntryKind) -> &[CatalogEntry] {
        match kind {
            EntryKind::Symbol => &self.symbols,
            EntryKind::Kaomoji => &self.kaomoji,
        }
    }

    /// Symbol and kaomoji entries, in that order. Fonts are transforms,
    /// not lookups, and never part of the searchable corpus.
    pub fn searchable(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.symbols.iter().chain(self.kaomoji.iter())
    }

    pub fn font(&self, name: &str) -> Option<&FontTransform> {
        self.fonts.iter().find(|f| f.name == name)
    }

    /// Distinct primary categories of `kind` in first-seen order.
    pub fn categories(&self, kind: EntryKind) -> Vec<CategorySummary> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for e in self.entries(kind) {
            if e.category.is_empty() {
                continue;
            }
            *counts.entry(e.category.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(name, count)| CategorySummary {
                name: name.to_string(),
                count,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len() + self.kaomoji.len() + self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CatalogSnapshot – binary serialization wrapper
// ────────────────────────────────────────────────────────────────────────────

const SNAPSHOT_MAGIC: &[u8; 10] = b"SYMBOLCOPY";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub catalog: Catalog,
}

impl CatalogSnapshot {
    /// Save the snapshot to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, SNAPSHOT_MAGIC)?;
        std::io::Write::write_all(&mut writer, &SNAPSHOT_VERSION.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        std::io::Write::flush(&mut writer)?;
        Ok(())
    }

    /// Load a snapshot from a binary file, checking magic bytes and version.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 10];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != SNAPSHOT_MAGIC {
            anyhow::bail!("Invalid magic bytes: expected 'SYMBOLCOPY'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != SNAPSHOT_VERSION {
            anyhow::bail!("Unsupported snapshot version: {}", version);
        }
        let snapshot: CatalogSnapshot =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        Ok(snapshot)
    }
}
