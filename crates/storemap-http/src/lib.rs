//! `reqwest`-backed store fetcher for the store-locator widget.

pub mod client;
pub mod error;

pub use client::{HttpStoreFetcher, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use error::FetchError;
