//! Embeddable store-locator map widget.
//!
//! [`StoreMap`] keeps one widget's state and drives a map engine, the page
//! surface, geolocation and a store fetcher through the traits in
//! [`capability`]. Hosts implement those traits; everything else lives here
//! and in `storemap-core`.

pub mod capability;
pub mod controller;
pub mod error;
pub mod markers;
pub mod popup;
pub mod tiles;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use capability::{
    Geolocator, MapEngine, MapInit, MarkerKind, MarkerSpec, StoreFetcher, WidgetHost,
    WidgetSurface,
};
pub use controller::{StoreMap, WidgetCommand, LOCATE_ZOOM};
pub use error::{AssetError, MapError};
pub use markers::{MarkerSet, ReconcileSummary, Reconciliation};
pub use popup::PopupContent;
pub use tiles::TileLayer;
pub use view::{count_text, Chrome};
