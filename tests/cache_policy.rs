use std::time::Duration;

use symbolcopy::cache_policy::{CacheDecision, CachePolicy, Destination, Strategy};
use symbolcopy::catalog::default_manifest;
use url::Url;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn policy() -> CachePolicy {
    let site = Url::parse("https://symbolcopy.app/").unwrap();
    CachePolicy::for_sources(&default_manifest(), &site)
}

#[test]
fn precache_covers_shell_and_every_data_source() {
    let policy = policy();
    assert_eq!(policy.precache_name(), "symbolcopy-precache-v1");
    assert_eq!(policy.precache.len(), 4 + default_manifest().len());
    assert_eq!(policy.precache[1].url, "./index.html");
    assert!(policy.precache.iter().any(|e| e.url == "./assets/kaomoji.json"));
    assert!(policy.precache.iter().all(|e| e.revision == "20250727"));
    assert_eq!(policy.offline_fallback, "./index.html");
    assert_eq!(policy.origin, "https://symbolcopy.app");
}

#[test]
fn routes_are_chosen_by_extension_or_prefix() {
    let policy = policy();
    let name = |url: &str| policy.route_for(url).map(|r| r.cache_name.as_str());

    assert_eq!(name("https://symbolcopy.app/assets/symbols.json?v=2"), Some("symbolcopy-json-cache"));
    assert_eq!(name("https://symbolcopy.app/index.html"), Some("symbolcopy-html-cache"));
    assert_eq!(name("https://symbolcopy.app/assets/app.js"), Some("symbolcopy-assets-cache"));
    assert_eq!(name("https://symbolcopy.app/style.css#x"), Some("symbolcopy-assets-cache"));
    assert_eq!(name("https://symbolcopy.app/icons/logo.PNG"), Some("symbolcopy-images-cache"));
    assert_eq!(name("https://cdn.jsdelivr.net/npm/fuse.js@7"), Some("symbolcopy-cdn-cache"));
    assert_eq!(
        name("https://cdn.jsdelivr.net/npm/fuse.js@7.0.0/dist/fuse.min.js"),
        Some("symbolcopy-cdn-cache")
    );
    assert_eq!(name("https://other.example/lib.js"), None);
    assert_eq!(name("http://symbolcopy.app/data.json"), None);
    assert_eq!(name("https://symbolcopy.app/"), None);
    assert_eq!(name("https://symbolcopy.app/v1.0/about"), None);
}

#[test]
fn data_route_is_cache_first_with_bounded_age() {
    let policy = policy();
    let route = policy.route_for("./assets/fonts.json").unwrap();
    assert_eq!(route.strategy, Strategy::CacheFirst);
    assert_eq!(route.expiration.max_entries, 20);
    assert_eq!(route.expiration.max_age(), 30 * DAY);

    let decide = |age: Option<Duration>, online, dest| policy.decide(Some(route), age, online, dest);
    assert_eq!(decide(Some(DAY), true, Destination::Other), CacheDecision::ServeCache);
    assert_eq!(decide(Some(DAY), false, Destination::Other), CacheDecision::ServeCache);
    assert_eq!(decide(Some(31 * DAY), true, Destination::Other), CacheDecision::FetchNetwork);
    assert_eq!(decide(None, false, Destination::Other), CacheDecision::Fail);
}

#[test]
fn markup_is_served_stale_while_revalidating() {
    let policy = policy();
    let route = policy.route_for("/index.html");
    assert_eq!(route.unwrap().strategy, Strategy::StaleWhileRevalidate);
    assert_eq!(
        policy.decide(route, Some(DAY), true, Destination::Document),
        CacheDecision::ServeCacheAndRevalidate
    );
    assert_eq!(
        policy.decide(route, Some(DAY), false, Destination::Document),
        CacheDecision::ServeCache
    );
    assert_eq!(
        policy.decide(route, Some(8 * DAY), false, Destination::Document),
        CacheDecision::ServeFallback
    );
}

#[test]
fn unrouted_navigation_falls_back_offline() {
    let policy = policy();
    assert_eq!(policy.decide(None, None, true, Destination::Document), CacheDecision::FetchNetwork);
    assert_eq!(policy.decide(None, None, false, Destination::Document), CacheDecision::ServeFallback);
    assert_eq!(policy.decide(None, None, false, Destination::Other), CacheDecision::Fail);
}

#[test]
fn policy_serializes_as_json_config() {
    let policy = policy();
    let json = serde_json::to_value(&policy).unwrap();
    assert_eq!(json["routes"][0]["strategy"], "cache_first");
    assert_eq!(json["routes"][4]["matcher"]["prefix"], "https://cdn.jsdelivr.net/");
    let back: CachePolicy = serde_json::from_value(json).unwrap();
    assert_eq!(back, policy);
}
