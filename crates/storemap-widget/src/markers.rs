//! Store marker lifecycle.
//!
//! Every state change recomputes the visible set from scratch and swaps the
//! whole marker set: old markers are detached before new ones are attached,
//! so the map never holds a marker for a store that is no longer visible.

use storemap_core::{filter_by_province, filter_by_search, Bounds, LatLng, Store, Translations};

use crate::capability::{MapEngine, MarkerKind, MarkerSpec};
use crate::popup::PopupContent;

/// Fraction of the visible span added around the markers when fitting.
pub const VIEWPORT_PADDING: f64 = 0.1;

/// Which stores a state shows, before anything touches the map.
#[derive(Debug)]
pub struct Reconciliation<'s> {
    /// Stores left after the province filter and the search term.
    pub visible: Vec<&'s Store>,
    /// Visible stores with usable coordinates, in order.
    pub plottable: Vec<(&'s Store, LatLng)>,
    /// Visible stores that cannot be placed on the map.
    pub skipped: Vec<&'s Store>,
}

impl<'s> Reconciliation<'s> {
    /// Province filter first, then the search term (if any) on that result.
    pub fn plan<P>(stores: &'s [Store], provinces: &[P], search_term: Option<&str>) -> Self
    where
        P: AsRef<str>,
    {
        let in_region = filter_by_province(stores, provinces);
        let visible = match search_term {
            Some(term) => filter_by_search(in_region, term),
            None => in_region,
        };

        let mut plottable = Vec::with_capacity(visible.len());
        let mut skipped = Vec::new();
        for store in &visible {
            match store.coordinates() {
                Some(position) => plottable.push((*store, position)),
                None => skipped.push(*store),
            }
        }

        Self {
            visible,
            plottable,
            skipped,
        }
    }

    /// Padded box around every plottable store, or `None` when nothing is
    /// plottable and the viewport should stay where it is.
    #[must_use]
    pub fn viewport(&self) -> Option<Bounds> {
        Bounds::from_points(self.plottable.iter().map(|(_, position)| *position))
            .map(|bounds| bounds.pad(VIEWPORT_PADDING))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub visible: usize,
    pub plotted: usize,
    pub skipped: usize,
}

/// Markers currently attached to the map for visible stores.
#[derive(Debug)]
pub struct MarkerSet<K> {
    live: Vec<K>,
}

impl<K> Default for MarkerSet<K> {
    fn default() -> Self {
        Self { live: Vec::new() }
    }
}

impl<K> MarkerSet<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Detach every live marker.
    pub fn clear<M>(&mut self, map: &mut M)
    where
        M: MapEngine<Marker = K>,
    {
        for marker in self.live.drain(..) {
            map.remove_marker(marker);
        }
    }

    /// Replace the live markers with one marker per plottable store in
    /// `plan`, then fit the viewport around them.
    pub fn apply<M>(
        &mut self,
        map: &mut M,
        plan: &Reconciliation<'_>,
        translations: &Translations,
        language: &str,
    ) -> ReconcileSummary
    where
        M: MapEngine<Marker = K>,
    {
        self.clear(map);

        for store in &plan.skipped {
            tracing::warn!(
                store = %store.name,
                lat = ?store.lat,
                lng = ?store.lng,
                "skipping store with missing or invalid coordinates"
            );
        }

        self.live.reserve(plan.plottable.len());
        for (store, position) in &plan.plottable {
            let marker = map.add_marker(MarkerSpec {
                position: *position,
                kind: MarkerKind::Store,
                popup: PopupContent::for_store(store, translations, language),
            });
            self.live.push(marker);
        }

        if let Some(bounds) = plan.viewport() {
            tracing::debug!(?bounds, markers = self.live.len(), "fitting viewport");
            map.fit_bounds(bounds);
        }

        ReconcileSummary {
            visible: plan.visible.len(),
            plotted: self.live.len(),
            skipped: plan.skipped.len(),
        }
    }

    /// Plan and apply in one step.
    pub fn reconcile<M, P>(
        &mut self,
        map: &mut M,
        stores: &[Store],
        provinces: &[P],
        search_term: Option<&str>,
        translations: &Translations,
        language: &str,
    ) -> ReconcileSummary
    where
        M: MapEngine<Marker = K>,
        P: AsRef<str>,
    {
        let plan = Reconciliation::plan(stores, provinces, search_term);
        let summary = self.apply(map, &plan, translations, language);
        tracing::debug!(
            visible = summary.visible,
            plotted = summary.plotted,
            skipped = summary.skipped,
            "reconciled store markers"
        );
        summary
    }
}
