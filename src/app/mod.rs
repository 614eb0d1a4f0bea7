//! Application controller: the single authoritative state object.
//!
//! [`App`] owns the loaded catalog and its search index together with the
//! [`ViewState`], font input, pending search, session history, page
//! metadata and copy acknowledgement. Hosts feed it discrete events (tab
//! click, category pick, keystroke, copy, back/forward) and read back the
//! computed [`View`]. Every transition runs to completion; nothing here is
//! shared across threads.

mod debounce;
mod history;
mod toast;

pub use debounce::Debouncer;
pub use history::{History, HistoryEntry};
pub use toast::Toast;

use std::time::Instant;

use tracing::debug;
use url::Url;

use crate::catalog::{self, ContentSource};
use crate::clipboard::ClipboardChain;
use crate::config::AppConfig;
use crate::error::{ClipboardError, LoadError};
use crate::model::{Catalog, CategorySummary};
use crate::search::SearchIndex;
use crate::url_state::{self, PageMeta, SITE_NAME};
use crate::view::{Panel, Tab, View, ViewState, compute_view_with};

/// Result of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Clipboard mechanism that accepted the text.
    pub mechanism: String,
    /// History entry pushed for sharing, on the symbols and kaomoji tabs.
    pub pushed: Option<HistoryEntry>,
}

pub struct App {
    catalog: Catalog,
    index: SearchIndex,
    state: ViewState,
    font_input: String,
    placeholder: String,
    search_input: Debouncer<String>,
    history: History,
    meta: PageMeta,
    toast: Toast,
}

impl App {
    /// Build the app around an already loaded catalog, positioned at
    /// `location`. URL parameters are not applied until
    /// [`init_from_url`](App::init_from_url).
    pub fn new(catalog: Catalog, config: &AppConfig, location: Url) -> Self {
        let index = SearchIndex::from_catalog(&catalog, config.search);
        Self {
            catalog,
            index,
            state: ViewState::default(),
            font_input: String::new(),
            placeholder: config.font_placeholder.clone(),
            search_input: Debouncer::new(config.debounce()),
            history: History::new(location),
            meta: PageMeta::default(),
            toast: Toast::new(config.toast_duration()),
        }
    }

    /// Load every configured source, then apply the location's parameters.
    /// Any failing source aborts the whole start.
    pub fn start<S: ContentSource>(
        source: &mut S,
        config: &AppConfig,
        location: Url,
    ) -> Result<Self, LoadError> {
        let catalog = catalog::load(source, &config.sources)?;
        let mut app = Self::new(catalog, config, location);
        app.init_from_url();
        Ok(app)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn font_input(&self) -> &str {
        &self.font_input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn location(&self) -> &Url {
        self.history.location()
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Apply the current location the way a page load does: a deep link
    /// only sets metadata; `tab`, `category` and `q` go through the same
    /// transitions as the matching user actions.
    pub fn init_from_url(&mut self) {
        let params = url_state::deserialize(self.history.location());
        if let Some(text) = &params.deep_link {
            self.meta = PageMeta::for_deep_link(text);
        }
        if let Some(tab) = params.tab {
            self.switch_tab(tab);
        }
        if let Some(category) = &params.category {
            self.change_category(category);
        }
        if let Some(query) = &params.query {
            self.search_now(query);
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
        self.sync_url();
    }

    pub fn change_category(&mut self, category: &str) {
        self.state.category = category.to_string();
        self.sync_url();
    }

    /// Record a keystroke in the search box. The search runs on the first
    /// [`tick`](App::tick) after the quiet period; later keystrokes replace
    /// earlier ones.
    pub fn type_search(&mut self, text: &str, now: Instant) {
        self.search_input.push(text.to_string(), now);
    }

    /// Apply a debounced search whose quiet period has elapsed. Returns
    /// whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search_input.poll(now) {
            Some(text) => {
                self.apply_search(&text);
                true
            }
            None => false,
        }
    }

    /// When the pending search becomes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_input.due()
    }

    /// Search immediately, discarding any pending keystrokes.
    pub fn search_now(&mut self, text: &str) {
        self.search_input.cancel();
        self.apply_search(text);
    }

    fn apply_search(&mut self, text: &str) {
        self.state.query = text.trim().to_string();
        debug!(query = %self.state.query, "search query applied");
        self.sync_url();
    }

    /// Font input is not part of the URL state.
    pub fn set_font_input(&mut self, text: &str) {
        self.font_input = text.to_string();
    }

    pub fn view(&self) -> View<'_> {
        compute_view_with(
            &self.catalog,
            &self.index,
            &self.state,
            &self.font_input,
            &self.placeholder,
        )
    }

    pub fn panel(&self) -> Panel {
        self.view().panel()
    }

    /// Categories offered by the picker on the current tab.
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.state
            .tab
            .kind()
            .map(|k| self.catalog.categories(k))
            .unwrap_or_default()
    }

    /// Copy `text` through `clipboard`. On success the acknowledgement is
    /// shown and, on the symbols and kaomoji tabs, a shareable history entry
    /// is pushed. A failure leaves every other piece of state untouched.
    pub fn copy(
        &mut self,
        text: &str,
        clipboard: &mut ClipboardChain,
        now: Instant,
    ) -> Result<CopyOutcome, ClipboardError> {
        let mechanism = clipboard.copy(text)?;
        self.toast.show(now);
        let pushed = match self.state.tab {
            Tab::Symbols | Tab::Kaomoji => {
                let entry = self.deep_link_entry(text);
                self.history.push(entry.clone());
                Some(entry)
            }
            Tab::Fonts => None,
        };
        Ok(CopyOutcome { mechanism, pushed })
    }

    fn deep_link_entry(&self, text: &str) -> HistoryEntry {
        let mut url = self.history.location().clone();
        url.set_path(&url_state::deep_link_path(text));
        url.set_query(None);
        url.set_fragment(None);
        HistoryEntry {
            url,
            title: Some(format!("{} - {}", SITE_NAME, text)),
            copied: Some(text.to_string()),
        }
    }

    pub fn toast_visible(&self, now: Instant) -> bool {
        self.toast.is_visible(now)
    }

    /// Step back in history and restore the landed entry's view state.
    /// Returns `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        self.restore_from_location();
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        self.restore_from_location();
        true
    }

    fn restore_from_location(&mut self) {
        let params = url_state::deserialize(self.history.location());
        self.search_input.cancel();
        self.state = params.view_state();
        self.meta = params
            .deep_link
            .as_deref()
            .map(PageMeta::for_deep_link)
            .unwrap_or_default();
    }

    /// Mirror the view state into the location without a navigable step.
    fn sync_url(&mut self) {
        let url = url_state::serialize(&self.state, self.history.location());
        debug!(url = %url, "location replaced");
        self.history.replace(url);
    }
}
