//! The widget controller.
//!
//! [`StoreMap`] owns one widget's state (store list, search term, theme,
//! language, live markers) and turns every external trigger into exactly one
//! full reconciliation of the map. Failures are logged and shown to the user;
//! none of them escape as panics or leave stale markers behind.

use std::sync::Arc;

use storemap_core::i18n::keys;
use storemap_core::{
    normalize_search_term, transform_api_response, ConfigError, LatLng, OptionOverrides, Store,
    Theme, Translations, WidgetOptions,
};
use uuid::Uuid;

use crate::capability::{
    Geolocator, MapEngine, MapInit, MarkerKind, MarkerSpec, StoreFetcher, WidgetHost,
    WidgetSurface,
};
use crate::markers::{MarkerSet, ReconcileSummary};
use crate::popup::PopupContent;
use crate::tiles::TileLayer;
use crate::view::{count_text, Chrome};

/// Zoom level used when centering on the user's position.
pub const LOCATE_ZOOM: u8 = 12;

/// A user action from one of the widget's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetCommand {
    Search(String),
    ClearSearch,
    LocateUser,
    ToggleTheme,
}

pub struct StoreMap<M: MapEngine, S> {
    container_id: String,
    instance_id: String,
    options: WidgetOptions,
    translations: Arc<Translations>,
    map: M,
    surface: S,
    stores: Vec<Store>,
    search_term: Option<String>,
    theme: Theme,
    language: String,
    markers: MarkerSet<M::Marker>,
    user_marker: Option<M::Marker>,
    visible_count: usize,
}

impl<M, S> StoreMap<M, S>
where
    M: MapEngine,
    S: WidgetSurface,
{
    /// Build a widget inside `container_id` and show `stores`.
    ///
    /// Returns `None` (after logging) when the container does not exist, the
    /// options are invalid, or the map engine cannot start.
    pub fn create<H>(
        host: &mut H,
        container_id: &str,
        stores: Vec<Store>,
        overrides: OptionOverrides,
        translations: Arc<Translations>,
    ) -> Option<Self>
    where
        H: WidgetHost<Map = M, Surface = S>,
    {
        let Some(mut surface) = host.container(container_id) else {
            tracing::error!(container_id, "container element not found");
            return None;
        };

        if let Err(err) = host.load_icon_font() {
            tracing::warn!(error = %err, "icon font unavailable; continuing without it");
        }

        let options = match WidgetOptions::merged(overrides) {
            Ok(options) => options,
            Err(err) => {
                tracing::error!(container_id, error = %err, "invalid widget options");
                return None;
            }
        };

        let language = if translations.supports(&options.language) {
            options.language.clone()
        } else {
            tracing::warn!(
                language = %options.language,
                fallback = translations.default_language(),
                "unsupported language; using default"
            );
            translations.default_language().to_string()
        };

        let instance_id = format!("csm_{}", Uuid::new_v4().simple());
        let theme = options.theme;
        surface.render_chrome(&Chrome::build(
            &instance_id,
            &options,
            theme,
            &language,
            &translations,
        ));

        let init = MapInit {
            center: options.center,
            zoom: options.zoom,
            min_zoom: options.min_zoom,
            max_zoom: options.max_zoom,
            height: options.height.clone(),
        };
        let map = match host.create_map(container_id, &init) {
            Ok(map) => map,
            Err(err) => {
                tracing::error!(container_id, error = %err, "map engine failed to start");
                surface.clear();
                return None;
            }
        };

        let mut widget = Self {
            container_id: container_id.to_string(),
            instance_id,
            options,
            translations,
            map,
            surface,
            stores: Vec::new(),
            search_term: None,
            theme,
            language,
            markers: MarkerSet::new(),
            user_marker: None,
            visible_count: 0,
        };
        widget.apply_tile_layer();
        widget.load_stores(stores);

        tracing::debug!(
            container_id,
            instance_id = %widget.instance_id,
            "store map initialized"
        );
        Some(widget)
    }

    /// Build an empty widget, then load its stores from `url`.
    pub async fn create_from_api<H, F>(
        host: &mut H,
        fetcher: &F,
        container_id: &str,
        url: &str,
        overrides: OptionOverrides,
        translations: Arc<Translations>,
    ) -> Option<Self>
    where
        H: WidgetHost<Map = M, Surface = S>,
        F: StoreFetcher,
    {
        let mut widget = Self::create(host, container_id, Vec::new(), overrides, translations)?;
        widget.fetch_from_remote(fetcher, url).await;
        Some(widget)
    }

    /// Replace the store list and redraw with the province filter only.
    ///
    /// Any active search term is dropped: new data starts unsearched.
    pub fn load_stores(&mut self, stores: Vec<Store>) -> ReconcileSummary {
        self.stores = stores;
        self.search_term = None;
        self.refresh()
    }

    pub fn update_stores(&mut self, stores: Vec<Store>) -> ReconcileSummary {
        self.load_stores(stores)
    }

    /// Narrow the province-filtered stores by `term`. A blank term clears the
    /// search instead.
    pub fn search(&mut self, term: &str) -> ReconcileSummary {
        match normalize_search_term(term) {
            Some(term) => {
                self.search_term = Some(term);
                self.refresh()
            }
            None => self.clear_search(),
        }
    }

    pub fn clear_search(&mut self) -> ReconcileSummary {
        self.search_term = None;
        self.refresh()
    }

    /// Switch to `theme` (`"light"` or `"dark"`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTheme`] for any other value; the widget
    /// is left unchanged.
    pub fn set_theme(&mut self, theme: &str) -> Result<(), ConfigError> {
        let theme = theme.parse::<Theme>().inspect_err(|err| {
            tracing::warn!(error = %err, "rejected theme change");
        })?;
        self.apply_theme(theme);
        Ok(())
    }

    pub fn toggle_theme(&mut self) {
        self.apply_theme(self.theme.toggled());
    }

    /// Switch the UI language. Markers and map data are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLanguage`] when the translation table
    /// has no dictionary for `language`; the widget is left unchanged.
    pub fn set_language(&mut self, language: &str) -> Result<(), ConfigError> {
        self.translations
            .ensure_supported(language)
            .inspect_err(|err| {
                tracing::warn!(error = %err, "rejected language change");
            })?;
        self.language = language.to_string();
        self.render_chrome();
        self.render_count();
        Ok(())
    }

    /// Center the map on the user's position and mark it.
    ///
    /// The location marker is kept apart from the store markers: it survives
    /// reconciliation and is replaced on the next successful call.
    pub async fn locate_user<G>(&mut self, geolocator: &G) -> Option<LatLng>
    where
        G: Geolocator,
    {
        if !geolocator.is_available() {
            tracing::warn!("geolocation unavailable in host environment");
            let message = self.text(keys::GEOLOCATION_NOT_SUPPORTED).to_string();
            self.surface.alert(&message);
            return None;
        }

        match geolocator.current_position().await {
            Ok(position) => {
                self.map.set_view(position, LOCATE_ZOOM);
                if let Some(previous) = self.user_marker.take() {
                    self.map.remove_marker(previous);
                }
                let popup = PopupContent::for_user_location(&self.translations, &self.language);
                let marker = self.map.add_marker(MarkerSpec {
                    position,
                    kind: MarkerKind::UserLocation,
                    popup,
                });
                self.user_marker = Some(marker);
                Some(position)
            }
            Err(err) => {
                tracing::warn!(error = %err, "geolocation request failed");
                let message = format!("{}{err}", self.text(keys::LOCATION_ERROR));
                self.surface.alert(&message);
                None
            }
        }
    }

    /// Fetch stores from the remote provider and show them.
    ///
    /// Resolves to the loaded stores, or to an empty list after any failure;
    /// on failure the previous map state is kept and a message is shown.
    pub async fn fetch_from_remote<F>(&mut self, fetcher: &F, url: &str) -> Vec<Store>
    where
        F: StoreFetcher,
    {
        let body = match fetcher.get_json(url).await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(url, error = %err, "failed to fetch store data");
                self.show_load_failure();
                return Vec::new();
            }
        };

        let stores = match transform_api_response(&body) {
            Ok(stores) => stores,
            Err(err) => {
                tracing::error!(url, error = %err, "malformed store data");
                self.show_load_failure();
                return Vec::new();
            }
        };

        tracing::debug!(url, count = stores.len(), "loaded remote stores");
        self.load_stores(stores.clone());
        stores
    }

    /// Route a control action to its controller method.
    pub async fn dispatch<G>(&mut self, command: WidgetCommand, geolocator: &G)
    where
        G: Geolocator,
    {
        match command {
            WidgetCommand::Search(term) => {
                self.search(&term);
            }
            WidgetCommand::ClearSearch => {
                self.clear_search();
            }
            WidgetCommand::LocateUser => {
                self.locate_user(geolocator).await;
            }
            WidgetCommand::ToggleTheme => self.toggle_theme(),
        }
    }

    /// Let the map pick up a container size change.
    pub fn resize(&mut self) {
        self.map.invalidate_size();
    }

    /// Tear the widget down and hand back its collaborators.
    pub fn destroy(mut self) -> (M, S) {
        self.markers.clear(&mut self.map);
        if let Some(marker) = self.user_marker.take() {
            self.map.remove_marker(marker);
        }
        self.map.remove();
        self.surface.clear();
        tracing::debug!(container_id = %self.container_id, "store map destroyed");
        (self.map, self.surface)
    }

    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Stores passing the current province filter and search term.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn has_user_marker(&self) -> bool {
        self.user_marker.is_some()
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn refresh(&mut self) -> ReconcileSummary {
        let summary = self.markers.reconcile(
            &mut self.map,
            &self.stores,
            self.options.provinces.as_slice(),
            self.search_term.as_deref(),
            &self.translations,
            &self.language,
        );
        self.visible_count = summary.visible;
        self.render_count();
        summary
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.render_chrome();
        self.apply_tile_layer();
    }

    fn apply_tile_layer(&mut self) {
        let layer = TileLayer::for_theme(self.theme);
        if let Err(err) = self.map.set_tile_layer(layer) {
            tracing::warn!(error = %err, "tile layer failed; falling back to default tiles");
            if let Err(err) = self.map.set_tile_layer(TileLayer::fallback()) {
                tracing::error!(error = %err, "fallback tile layer failed");
            }
        }
    }

    fn render_chrome(&mut self) {
        let chrome = Chrome::build(
            &self.instance_id,
            &self.options,
            self.theme,
            &self.language,
            &self.translations,
        );
        self.surface.render_chrome(&chrome);
    }

    fn render_count(&mut self) {
        if !self.options.show_controls {
            return;
        }
        let text = count_text(
            self.visible_count,
            self.search_term.as_deref(),
            &self.translations,
            &self.language,
        );
        self.surface.set_store_count(&text);
    }

    fn show_load_failure(&mut self) {
        let message = self.text(keys::FAILED_TO_LOAD_DATA).to_string();
        self.surface.show_error(&message);
    }

    fn text(&self, key: &'static str) -> &str {
        self.translations.resolve(&self.language, key)
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
