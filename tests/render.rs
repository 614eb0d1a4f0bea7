mod common;

use camino::Utf8PathBuf;
use symbolcopy::LoadError;
use symbolcopy::model::{Catalog, CatalogEntry, EntryKind};
use symbolcopy::render;
use symbolcopy::search::{SearchIndex, SearchOptions};
use symbolcopy::view::{Tab, ViewState, compute_view};

fn state(tab: Tab, category: &str, query: &str) -> ViewState {
    ViewState {
        tab,
        category: category.to_string(),
        query: query.to_string(),
    }
}

#[test]
fn text_lists_search_results_with_header() {
    let catalog = common::catalog();
    let index = SearchIndex::from_catalog(&catalog, SearchOptions::default());
    let view = compute_view(&catalog, &index, &state(Tab::Symbols, "all", "heart"), "");
    assert_eq!(render::text(&view), "Results for \"heart\" (1)\n♥\theart\t0.00\n");

    let view = compute_view(&catalog, &index, &state(Tab::Symbols, "all", "zzzzzz"), "");
    assert_eq!(render::text(&view), "No results for \"zzzzzz\"\n");
}

#[test]
fn text_reports_empty_category() {
    let catalog = common::catalog();
    let index = SearchIndex::from_catalog(&catalog, SearchOptions::default());
    let view = compute_view(&catalog, &index, &state(Tab::Kaomoji, "none", ""), "");
    assert_eq!(render::text(&view), "kaomoji / none (0)\nNo matching kaomoji\n");
}

#[test]
fn text_lists_font_rows() {
    let catalog = common::catalog();
    let index = SearchIndex::from_catalog(&catalog, SearchOptions::default());
    let view = compute_view(&catalog, &index, &state(Tab::Fonts, "all", ""), "ab");
    assert_eq!(render::text(&view), "𝐚𝐛\tbold\nⓐⓑ\tcircled\n");
}

#[test]
fn html_escapes_entry_content() {
    let catalog = Catalog {
        symbols: vec![CatalogEntry {
            kind: EntryKind::Symbol,
            display: "<b>\"".into(),
            name: "a & b".into(),
            category: "misc".into(),
            tags: vec![],
        }],
        ..Catalog::default()
    };
    let index = SearchIndex::from_catalog(&catalog, SearchOptions::default());
    let html = render::html(&compute_view(&catalog, &index, &ViewState::default(), ""));
    assert!(html.starts_with(r#"<section id="symbol-grid">"#));
    assert!(html.contains(r#"data-copy="<b>&quot;""#) || html.contains(r#"data-copy="&lt;b&gt;&quot;""#));
    assert!(html.contains("&lt;b&gt;\""));
    assert!(html.contains("a &amp; b"));
    assert!(!html.contains("<b>\"</div>"));
    assert!(html.ends_with("</section>"));
}

#[test]
fn html_marks_empty_search() {
    let catalog = common::catalog();
    let index = SearchIndex::from_catalog(&catalog, SearchOptions::default());
    let view = compute_view(&catalog, &index, &state(Tab::Symbols, "all", "zzzzzz"), "");
    let html = render::html(&view);
    assert!(html.contains(r#"id="search-results""#));
    assert!(html.contains(r#"id="no-results""#));
}

#[test]
fn json_carries_panel_and_items() {
    let catalog = common::catalog();
    let index = SearchIndex::from_catalog(&catalog, SearchOptions::default());
    let view = compute_view(&catalog, &index, &state(Tab::Kaomoji, "sad", ""), "");
    let json = render::json(&view);
    assert_eq!(json["panel"], "kaomoji");
    assert_eq!(json["category"], "sad");
    assert_eq!(json["items"][0]["display"], "(T_T)");
    assert_eq!(json["items"][0]["kind"], "kaomoji");

    let view = compute_view(&catalog, &index, &state(Tab::Kaomoji, "all", "zzzzzz"), "");
    assert_eq!(render::json(&view)["panel"], "no_results");
}

#[test]
fn load_failure_offers_retry() {
    let err = LoadError::Unreachable {
        path: Utf8PathBuf::from("<fonts>.json"),
        reason: "offline".into(),
    };
    let html = render::load_failure(&err);
    assert!(html.contains(r#"data-action="retry""#));
    assert!(html.contains("&lt;fonts&gt;.json"));
    assert!(html.contains("offline"));
}
