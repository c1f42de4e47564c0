//! In-memory stand-ins for every capability, recording what the widget asked
//! them to do.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use storemap_core::{Bounds, LatLng};

use crate::capability::{
    Geolocator, MapEngine, MapInit, MarkerKind, MarkerSpec, StoreFetcher, WidgetHost,
    WidgetSurface,
};
use crate::error::{AssetError, MapError};
use crate::tiles::TileLayer;
use crate::view::Chrome;

#[derive(Debug, Default)]
pub struct FakeMap {
    pub init: Option<MapInit>,
    pub tile_layers: Vec<TileLayer>,
    /// Tile URL templates the fake refuses to load.
    pub failing_tiles: Vec<&'static str>,
    pub markers: BTreeMap<u64, MarkerSpec>,
    next_marker: u64,
    pub last_fit: Option<Bounds>,
    pub fit_calls: usize,
    pub views: Vec<(LatLng, u8)>,
    pub invalidations: usize,
    pub removed: bool,
}

impl FakeMap {
    #[must_use]
    pub fn current_tile_layer(&self) -> Option<&TileLayer> {
        self.tile_layers.last()
    }

    #[must_use]
    pub fn store_marker_count(&self) -> usize {
        self.count_kind(MarkerKind::Store)
    }

    #[must_use]
    pub fn user_marker_count(&self) -> usize {
        self.count_kind(MarkerKind::UserLocation)
    }

    /// Popup titles of attached store markers, in attachment order.
    #[must_use]
    pub fn store_marker_titles(&self) -> Vec<String> {
        self.markers
            .values()
            .filter(|m| m.kind == MarkerKind::Store)
            .map(|m| m.popup.title.clone())
            .collect()
    }

    fn count_kind(&self, kind: MarkerKind) -> usize {
        self.markers.values().filter(|m| m.kind == kind).count()
    }
}

impl MapEngine for FakeMap {
    type Marker = u64;

    fn set_tile_layer(&mut self, layer: &TileLayer) -> Result<(), MapError> {
        if self.failing_tiles.contains(&layer.url_template) {
            return Err(MapError::TileLayer {
                url_template: layer.url_template.to_string(),
                reason: "rejected by fake".to_string(),
            });
        }
        self.tile_layers.push(layer.clone());
        Ok(())
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> u64 {
        self.next_marker += 1;
        self.markers.insert(self.next_marker, marker);
        self.next_marker
    }

    fn remove_marker(&mut self, marker: u64) {
        assert!(
            self.markers.remove(&marker).is_some(),
            "marker {marker} removed twice or never attached"
        );
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.last_fit = Some(bounds);
        self.fit_calls += 1;
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.views.push((center, zoom));
    }

    fn invalidate_size(&mut self) {
        self.invalidations += 1;
    }

    fn remove(&mut self) {
        self.removed = true;
    }
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    /// Chrome currently on the page, shared with the [`FakeHost`] that
    /// handed out this surface.
    pub page: Rc<RefCell<Option<Chrome>>>,
    pub chrome: Option<Chrome>,
    pub chrome_renders: usize,
    pub count: Option<String>,
    pub errors: Vec<String>,
    pub alerts: Vec<String>,
    pub cleared: bool,
}

impl WidgetSurface for FakeSurface {
    fn render_chrome(&mut self, chrome: &Chrome) {
        self.chrome = Some(chrome.clone());
        *self.page.borrow_mut() = Some(chrome.clone());
        self.chrome_renders += 1;
    }

    fn set_store_count(&mut self, text: &str) {
        self.count = Some(text.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn clear(&mut self) {
        self.cleared = true;
        self.chrome = None;
        *self.page.borrow_mut() = None;
        self.count = None;
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub containers: HashSet<String>,
    /// What the page shows after the widget's surface is gone.
    pub page: Rc<RefCell<Option<Chrome>>>,
    pub failing_tiles: Vec<&'static str>,
    pub map_fails: bool,
    pub icon_font_fails: bool,
}

impl FakeHost {
    #[must_use]
    pub fn with_container(container_id: &str) -> Self {
        Self {
            containers: HashSet::from([container_id.to_string()]),
            ..Self::default()
        }
    }
}

impl WidgetHost for FakeHost {
    type Surface = FakeSurface;
    type Map = FakeMap;

    fn container(&mut self, container_id: &str) -> Option<FakeSurface> {
        self.containers.contains(container_id).then(|| FakeSurface {
            page: Rc::clone(&self.page),
            ..FakeSurface::default()
        })
    }

    fn create_map(&mut self, container_id: &str, init: &MapInit) -> Result<FakeMap, MapError> {
        if self.map_fails {
            return Err(MapError::Create {
                container_id: container_id.to_string(),
                reason: "engine unavailable".to_string(),
            });
        }
        Ok(FakeMap {
            init: Some(init.clone()),
            failing_tiles: self.failing_tiles.clone(),
            ..FakeMap::default()
        })
    }

    fn load_icon_font(&mut self) -> Result<(), AssetError> {
        if self.icon_font_fails {
            return Err(AssetError {
                asset: "icon-font".to_string(),
                reason: "offline".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeGeolocator {
    pub available: bool,
    pub result: Result<LatLng, String>,
}

impl FakeGeolocator {
    #[must_use]
    pub fn at(position: LatLng) -> Self {
        Self {
            available: true,
            result: Ok(position),
        }
    }

    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            available: true,
            result: Err(reason.to_string()),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            result: Err("unavailable".to_string()),
        }
    }
}

impl Geolocator for FakeGeolocator {
    type Error = String;

    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(&self) -> Result<LatLng, String> {
        self.result.clone()
    }
}

#[derive(Debug)]
pub struct FakeFetcher {
    pub response: Result<serde_json::Value, String>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    #[must_use]
    pub fn responding(body: serde_json::Value) -> Self {
        Self {
            response: Ok(body),
            requests: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl StoreFetcher for FakeFetcher {
    type Error = String;

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, String> {
        self.requests.borrow_mut().push(url.to_string());
        self.response.clone()
    }
}
