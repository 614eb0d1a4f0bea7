//! Special-symbol, kaomoji and fancy-font lookup.
//!
//! The crate turns static lookup tables plus a free-text query or a
//! tab/category filter into the exact list of items to show, and mirrors
//! that state into a shareable URL.
//!
//! - [`catalog`] loads the read-only tables ([`model::Catalog`]).
//! - [`search`] indexes symbols and kaomoji for typo-tolerant search.
//! - [`view`] computes what is displayed for a [`view::ViewState`].
//! - [`url_state`] maps view state to query parameters and deep links.
//! - [`app`] threads one explicit state object through user events.
//!
//! The binary `symbolcopy` is a command-line host for all of the above.

pub mod app;
pub mod cache_policy;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod render;
pub mod search;
pub mod url_state;
pub mod view;

pub use error::{ClipboardError, Error, LoadError};
