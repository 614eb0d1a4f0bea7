//! Rendering adapter. Consumes computed [`View`]s only; no filtering or
//! searching happens here.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::{Value, json};

use crate::error::LoadError;
use crate::model::{CatalogEntry, EntryKind};
use crate::view::View;

fn empty_message(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Symbol => "No matching symbols",
        EntryKind::Kaomoji => "No matching kaomoji",
    }
}

/// Plain text, one item per line (tab separated).
pub fn text(view: &View<'_>) -> String {
    let mut out = String::new();
    match view {
        View::Search { query, hits } => {
            if hits.is_empty() {
                let _ = writeln!(out, "No results for \"{}\"", query);
            } else {
                let _ = writeln!(out, "Results for \"{}\" ({})", query, hits.len());
                for h in hits {
                    let _ = writeln!(out, "{}\t{}\t{:.2}", h.entry.display, h.entry.name, h.rank);
                }
            }
        }
        View::Entries {
            kind,
            category,
            entries,
        } => {
            let _ = writeln!(out, "{} / {} ({})", kind.as_str(), category, entries.len());
            if entries.is_empty() {
                let _ = writeln!(out, "{}", empty_message(*kind));
            }
            for e in entries {
                let _ = writeln!(out, "{}\t{}", e.display, e.name);
            }
        }
        View::Fonts { rows, .. } => {
            for r in rows {
                let _ = writeln!(out, "{}\t{}", r.text, r.font.name);
            }
        }
    }
    out
}

fn entry_card(out: &mut String, e: &CatalogEntry) {
    let _ = write!(
        out,
        r#"<div class="symbol-item" data-kind="{}" data-copy="{}"><div class="glyph">{}</div><div class="name" title="{}">{}</div></div>"#,
        e.kind.as_str(),
        encode_double_quoted_attribute(&e.display),
        encode_text(&e.display),
        encode_double_quoted_attribute(&e.name),
        encode_text(&e.name),
    );
}

/// HTML fragment for the panel the view belongs to.
pub fn html(view: &View<'_>) -> String {
    let mut out = String::new();
    match view {
        View::Search { query, hits } => {
            let _ = write!(
                out,
                r#"<section id="search-results" data-query="{}">"#,
                encode_double_quoted_attribute(query)
            );
            if hits.is_empty() {
                let _ = write!(
                    out,
                    r#"<p id="no-results">No results for “{}”</p>"#,
                    encode_text(query)
                );
            }
            for h in hits {
                entry_card(&mut out, h.entry);
            }
        }
        View::Entries { kind, entries, .. } => {
            let _ = write!(out, r#"<section id="{}-grid">"#, kind.as_str());
            if entries.is_empty() {
                let _ = write!(out, r#"<p class="empty">{}</p>"#, empty_message(*kind));
            }
            for e in entries {
                entry_card(&mut out, e);
            }
        }
        View::Fonts { rows, .. } => {
            out.push_str(r#"<section id="fonts-grid">"#);
            for r in rows {
                let _ = write!(
                    out,
                    r#"<div class="font-item" data-copy="{}"><div class="converted">{}</div><div class="name">{}</div></div>"#,
                    encode_double_quoted_attribute(&r.text),
                    encode_text(&r.text),
                    encode_text(&r.font.name),
                );
            }
        }
    }
    out.push_str("</section>");
    out
}

/// Machine-readable form of the view.
pub fn json(view: &View<'_>) -> Value {
    let panel = serde_json::to_value(view.panel()).unwrap_or(Value::Null);
    match view {
        View::Search { query, hits } => json!({
            "panel": panel,
            "query": query,
            "items": hits.iter().map(|h| json!({
                "kind": h.entry.kind,
                "display": h.entry.display,
                "name": h.entry.name,
                "rank": h.rank,
            })).collect::<Vec<_>>(),
        }),
        View::Entries {
            category, entries, ..
        } => json!({
            "panel": panel,
            "category": category,
            "items": entries.iter().map(|e| json!({
                "kind": e.kind,
                "display": e.display,
                "name": e.name,
                "category": e.category,
                "tags": e.tags,
            })).collect::<Vec<_>>(),
        }),
        View::Fonts { input, rows } => json!({
            "panel": panel,
            "input": input,
            "items": rows.iter().map(|r| json!({
                "font": r.font.name,
                "text": r.text,
            })).collect::<Vec<_>>(),
        }),
    }
}

/// Replaces the content area when initialization fails.
pub fn load_failure(err: &LoadError) -> String {
    format!(
        r#"<div id="loading" class="load-error"><p>Failed to load data: {}</p><button type="button" data-action="retry">Retry</button></div>"#,
        encode_text(&err.to_string())
    )
}
