//! Offline cache policy, expressed as data.
//!
//! The policy is consumed as configuration by whatever serves the assets
//! offline. Data files prefer the cache within a bounded age; markup,
//! scripts and styles are served stale while revalidating; a navigation
//! that fails entirely offline gets the fallback document.
//!
//! Extension routes only claim same-origin (or relative) URLs. Assets from
//! other origins are left to prefix routes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::SourceSpec;

const DAY_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Serve from cache while fresh; otherwise go to the network.
    CacheFirst,
    /// Serve any cached copy immediately and refresh it in the background.
    StaleWhileRevalidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMatch {
    /// Same-origin path ends with one of these extensions (without the dot).
    Extensions(Vec<String>),
    /// Full URL starts with this prefix.
    Prefix(String),
}

impl RouteMatch {
    fn extensions(exts: &[&str]) -> Self {
        RouteMatch::Extensions(exts.iter().map(|e| e.to_string()).collect())
    }

    pub fn matches(&self, url: &str, same_origin: bool) -> bool {
        match self {
            RouteMatch::Prefix(prefix) => url.starts_with(prefix.as_str()),
            RouteMatch::Extensions(_) if !same_origin => false,
            RouteMatch::Extensions(exts) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                match path.rsplit_once('.') {
                    Some((_, ext)) if !ext.contains('/') => {
                        exts.iter().any(|e| e.eq_ignore_ascii_case(ext))
                    }
                    _ => false,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub max_entries: u32,
    pub max_age_secs: u64,
}

impl Expiration {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    pub fn is_fresh(&self, age: Duration) -> bool {
        age <= self.max_age()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRoute {
    pub cache_name: String,
    pub matcher: RouteMatch,
    pub strategy: Strategy,
    pub expiration: Expiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecacheEntry {
    pub url: String,
    pub revision: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// A top-level page navigation.
    Document,
    Other,
}

/// What to do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    ServeCache,
    ServeCacheAndRevalidate,
    FetchNetwork,
    /// Offline, nothing usable cached: serve the fallback document.
    ServeFallback,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Origin of the site, e.g. `https://symbolcopy.app`.
    pub origin: String,
    pub prefix: String,
    pub suffix: String,
    pub precache: Vec<PrecacheEntry>,
    pub routes: Vec<CacheRoute>,
    pub offline_fallback: String,
}

impl CachePolicy {
    /// The policy of the site at `site`, precaching the shell and every
    /// data source.
    pub fn for_sources(sources: &[SourceSpec], site: &Url) -> Self {
        const REVISION: &str = "20250727";
        let shell = ["./", "./index.html", "./manifest.webmanifest", "./assets/app.js"];
        let precache = shell
            .iter()
            .map(|u| u.to_string())
            .chain(sources.iter().map(|s| format!("./assets/{}", s.path)))
            .map(|url| PrecacheEntry {
                url,
                revision: REVISION.to_string(),
            })
            .collect();
        let route = |name: &str,
                     matcher: RouteMatch,
                     strategy: Strategy,
                     max_entries: u32,
                     days: u64| CacheRoute {
            cache_name: format!("symbolcopy-{}-cache", name),
            matcher,
            strategy,
            expiration: Expiration {
                max_entries,
                max_age_secs: days * DAY_SECS,
            },
        };
        let routes = vec![
            route("json", RouteMatch::extensions(&["json"]), Strategy::CacheFirst, 20, 30),
            route("html", RouteMatch::extensions(&["html"]), Strategy::StaleWhileRevalidate, 10, 7),
            route("assets", RouteMatch::extensions(&["js", "css"]), Strategy::StaleWhileRevalidate, 30, 7),
            route(
                "images",
                RouteMatch::extensions(&["png", "jpg", "jpeg", "svg", "gif"]),
                Strategy::CacheFirst,
                60,
                30,
            ),
            route(
                "cdn",
                RouteMatch::Prefix("https://cdn.jsdelivr.net/".to_string()),
                Strategy::StaleWhileRevalidate,
                30,
                14,
            ),
        ];
        Self {
            origin: site.origin().ascii_serialization(),
            prefix: "symbolcopy".to_string(),
            suffix: "v1".to_string(),
            precache,
            routes,
            offline_fallback: "./index.html".to_string(),
        }
    }

    /// Name of the precache bucket.
    pub fn precache_name(&self) -> String {
        format!("{}-precache-{}", self.prefix, self.suffix)
    }

    /// First route whose matcher accepts `url`. Relative URLs are
    /// same-origin.
    pub fn route_for(&self, url: &str) -> Option<&CacheRoute> {
        let same_origin = match Url::parse(url) {
            Ok(abs) => abs.origin().ascii_serialization() == self.origin,
            Err(_) => true,
        };
        self.routes
            .iter()
            .find(|r| r.matcher.matches(url, same_origin))
    }

    /// Decide how to answer a request given the age of any cached copy.
    pub fn decide(
        &self,
        route: Option<&CacheRoute>,
        cached_age: Option<Duration>,
        online: bool,
        destination: Destination,
    ) -> CacheDecision {
        let fallback = || match destination {
            Destination::Document => CacheDecision::ServeFallback,
            Destination::Other => CacheDecision::Fail,
        };
        let Some(route) = route else {
            return if online { CacheDecision::FetchNetwork } else { fallback() };
        };
        let usable = cached_age.filter(|age| route.expiration.is_fresh(*age));
        match (route.strategy, usable, online) {
            (Strategy::CacheFirst, Some(_), _) => CacheDecision::ServeCache,
            (Strategy::StaleWhileRevalidate, Some(_), true) => CacheDecision::ServeCacheAndRevalidate,
            (Strategy::StaleWhileRevalidate, Some(_), false) => CacheDecision::ServeCache,
            (_, None, true) => CacheDecision::FetchNetwork,
            (_, None, false) => fallback(),
        }
    }
}
