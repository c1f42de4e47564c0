//! Coordinates and bounding boxes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned box spanning a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Grow the box on every side by `ratio` of its span on that axis.
    ///
    /// A single-point box has zero span and stays a point.
    #[must_use]
    pub fn pad(self, ratio: f64) -> Self {
        let lat_buffer = (self.north_east.lat - self.south_west.lat).abs() * ratio;
        let lng_buffer = (self.north_east.lng - self.south_west.lng).abs() * ratio;
        Self {
            south_west: LatLng::new(
                self.south_west.lat - lat_buffer,
                self.south_west.lng - lng_buffer,
            ),
            north_east: LatLng::new(
                self.north_east.lat + lat_buffer,
                self.north_east.lng + lng_buffer,
            ),
        }
    }
}
