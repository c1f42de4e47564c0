//! Core model and pure logic for the embeddable store-locator map.
//!
//! Nothing in this crate talks to a map engine, a browser, or the network.
//! The widget crate drives these pieces from its controller.

pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod i18n;
pub mod remote;
pub mod store;

pub use config::{load_overrides, OptionOverrides, Theme, WidgetOptions};
pub use error::{ConfigError, DataError};
pub use filter::{filter_by_province, filter_by_search, normalize_search_term};
pub use geo::{Bounds, LatLng};
pub use i18n::Translations;
pub use remote::transform_api_response;
pub use store::{Product, Store};
