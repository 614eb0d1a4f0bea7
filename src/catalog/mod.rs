//! Catalog store: loads the read-only lookup tables once at startup.
//!
//! - [`source`] – File I/O abstraction (directory vs. ZIP bundle)
//! - [`manifest`] – Which data files exist and their order
//! - [`records`] – JSON record schemas
//!
//! Loading is all-or-nothing. Every source is fetched as one batch and the
//! batch fails as a whole if any source is unreachable or malformed.

pub mod manifest;
pub mod records;
pub mod source;

pub use manifest::{SourceKind, SourceSpec, default_manifest};
pub use source::{ContentSource, FsSource, ZipSource};

use camino::Utf8PathBuf;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::model::{Catalog, CatalogEntry, FontTransform};
use records::{FontRecord, KaomojiRecord, SymbolRecord};

enum Parsed {
    Symbols(Vec<CatalogEntry>),
    Kaomoji(Vec<CatalogEntry>),
    Fonts(Vec<FontTransform>),
}

/// Load every source in `manifest` from `source` into a [`Catalog`].
pub fn load<S: ContentSource>(source: &mut S, manifest: &[SourceSpec]) -> Result<Catalog, LoadError> {
    let paths: Vec<Utf8PathBuf> = manifest.iter().map(|s| s.path.clone()).collect();
    let mut texts = Vec::with_capacity(paths.len());
    for (spec, res) in manifest.iter().zip(source.read_many(&paths)) {
        let text = res.map_err(|e| LoadError::Unreachable {
            path: spec.path.clone(),
            reason: format!("{:#}", e),
        })?;
        texts.push(text);
    }

    let parsed: Vec<Parsed> = manifest
        .par_iter()
        .zip(texts.par_iter())
        .map(|(spec, text)| parse_source(spec, text))
        .collect::<Result<_, _>>()?;

    let mut catalog = Catalog::default();
    for p in parsed {
        match p {
            Parsed::Symbols(v) => catalog.symbols.extend(v),
            Parsed::Kaomoji(v) => catalog.kaomoji.extend(v),
            Parsed::Fonts(v) => catalog.fonts.extend(v),
        }
    }
    info!(
        symbols = catalog.symbols.len(),
        kaomoji = catalog.kaomoji.len(),
        fonts = catalog.fonts.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn parse_source(spec: &SourceSpec, text: &str) -> Result<Parsed, LoadError> {
    let parse_err = |source| LoadError::Parse {
        path: spec.path.clone(),
        source,
    };
    let parsed = match spec.kind {
        SourceKind::Symbols => {
            let recs: Vec<SymbolRecord> = serde_json::from_str(text).map_err(parse_err)?;
            Parsed::Symbols(recs.into_iter().map(CatalogEntry::from).collect())
        }
        SourceKind::Kaomoji => {
            let recs: Vec<KaomojiRecord> = serde_json::from_str(text).map_err(parse_err)?;
            Parsed::Kaomoji(recs.into_iter().map(CatalogEntry::from).collect())
        }
        SourceKind::Fonts => {
            let recs: Vec<FontRecord> = serde_json::from_str(text).map_err(parse_err)?;
            let fonts = recs
                .into_iter()
                .enumerate()
                .map(|(index, r)| {
                    FontTransform::try_from(r).map_err(|reason| LoadError::InvalidRecord {
                        path: spec.path.clone(),
                        index,
                        reason,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Parsed::Fonts(fonts)
        }
    };
    let count = match &parsed {
        Parsed::Symbols(v) | Parsed::Kaomoji(v) => v.len(),
        Parsed::Fonts(v) => v.len(),
    };
    debug!(path = %spec.path, records = count, "data source parsed");
    Ok(parsed)
}
