//! Boundaries the widget calls through.
//!
//! Map drawing, the page around the map, geolocation and the network are all
//! owned by the embedding environment. The controller only sees these traits.

use std::fmt::Display;
use std::future::Future;

use storemap_core::{Bounds, LatLng};

use crate::error::{AssetError, MapError};
use crate::popup::PopupContent;
use crate::tiles::TileLayer;
use crate::view::Chrome;

/// Initial viewport handed to the map engine when the map is created.
#[derive(Debug, Clone, PartialEq)]
pub struct MapInit {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub height: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Store,
    /// The distinguishable "you are here" marker.
    UserLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub kind: MarkerKind,
    pub popup: PopupContent,
}

/// Map-rendering engine bound to one container.
pub trait MapEngine {
    /// Handle to a marker attached to the map.
    type Marker;

    /// Replace the current base layer with `layer`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::TileLayer`] if the engine rejects the layer.
    fn set_tile_layer(&mut self, layer: &TileLayer) -> Result<(), MapError>;

    fn add_marker(&mut self, marker: MarkerSpec) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    fn fit_bounds(&mut self, bounds: Bounds);

    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Recompute intrinsic size after the container changed.
    fn invalidate_size(&mut self);

    /// Tear the map down. No other call follows.
    fn remove(&mut self);
}

/// The page area the widget draws its controls and messages into.
pub trait WidgetSurface {
    fn render_chrome(&mut self, chrome: &Chrome);

    fn set_store_count(&mut self, text: &str);

    /// Replace the map viewport with an error message.
    fn show_error(&mut self, message: &str);

    /// Blocking, user-facing notice.
    fn alert(&mut self, message: &str);

    /// Remove everything the widget rendered.
    fn clear(&mut self);
}

/// The embedding page: finds containers and creates maps inside them.
pub trait WidgetHost {
    type Surface: WidgetSurface;
    type Map: MapEngine;

    fn container(&mut self, container_id: &str) -> Option<Self::Surface>;

    /// # Errors
    ///
    /// Returns [`MapError::Create`] if the engine cannot start.
    fn create_map(&mut self, container_id: &str, init: &MapInit) -> Result<Self::Map, MapError>;

    /// Best-effort icon font loading.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`]; callers log it and carry on.
    fn load_icon_font(&mut self) -> Result<(), AssetError> {
        Ok(())
    }
}

pub trait Geolocator {
    type Error: Display;

    /// Whether the host environment offers geolocation at all.
    fn is_available(&self) -> bool;

    fn current_position(&self) -> impl Future<Output = Result<LatLng, Self::Error>>;
}

/// Asynchronous GET returning a parsed JSON body.
pub trait StoreFetcher {
    type Error: Display;

    fn get_json(&self, url: &str) -> impl Future<Output = Result<serde_json::Value, Self::Error>>;
}
