//! Application configuration. Every field has a default, so an empty JSON
//! object (or no file at all) is a valid configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::{SourceSpec, default_manifest};
use crate::search::SearchOptions;
use crate::view::DEFAULT_FONT_PLACEHOLDER;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchOptions,
    /// Quiet period before a typed query is searched.
    pub debounce_ms: u64,
    /// How long the "copied" acknowledgement stays visible.
    pub toast_ms: u64,
    pub font_placeholder: String,
    /// Location of the site; deep links and query parameters hang off it.
    pub base_url: String,
    pub sources: Vec<SourceSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchOptions::default(),
            debounce_ms: 150,
            toast_ms: 1500,
            font_placeholder: DEFAULT_FONT_PLACEHOLDER.to_string(),
            base_url: "https://symbolcopy.app/".to_string(),
            sources: default_manifest(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file; `None` yields the defaults.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config {}", path))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("Invalid base_url {}", self.base_url))
    }
}
