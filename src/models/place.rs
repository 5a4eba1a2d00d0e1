//! Geographic primitives and place-selection results.

use geo::{Coord, Intersects, Point, Rect};
use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon, degrees, WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

/// Axis-aligned lat/lon rectangle.
///
/// `north >= south` holds for every constructor here. Bounds that cross the
/// antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Build bounds spanning two arbitrary corners
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            north: a.lat.max(b.lat),
            south: a.lat.min(b.lat),
            east: a.lon.max(b.lon),
            west: a.lon.min(b.lon),
        }
    }

    /// Zero-area bounds at a single point
    pub fn at_point(p: GeoPoint) -> Self {
        Self::from_corners(p, p)
    }

    pub fn northeast(&self) -> GeoPoint {
        GeoPoint::new(self.north, self.east)
    }

    pub fn southwest(&self) -> GeoPoint {
        GeoPoint::new(self.south, self.west)
    }

    pub fn northwest(&self) -> GeoPoint {
        GeoPoint::new(self.north, self.west)
    }

    pub fn southeast(&self) -> GeoPoint {
        GeoPoint::new(self.south, self.east)
    }

    /// Simple average of the NE/SW corners. Not geodesically exact, fine for
    /// the small viewports a geocoder returns.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn is_degenerate(&self) -> bool {
        self.lat_span() == 0.0 || self.lon_span() == 0.0
    }

    /// Whether the point lies inside or on the edge
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.to_rect().intersects(&Coord::from(p))
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }
}

impl From<Rect<f64>> for GeoBounds {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        }
    }
}

/// Result of a geocoding/autocomplete selection.
///
/// Area-like places carry a viewport; point-like places only a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<GeoBounds>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

impl PlaceSelection {
    pub fn with_viewport(viewport: GeoBounds) -> Self {
        Self {
            viewport: Some(viewport),
            ..Default::default()
        }
    }

    pub fn with_location(location: GeoPoint) -> Self {
        Self {
            location: Some(location),
            ..Default::default()
        }
    }

    /// Label for log output
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.formatted_address.as_deref())
            .unwrap_or("<unnamed place>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_axes() {
        let b = GeoBounds::from_corners(GeoPoint::new(10.0, 5.0), GeoPoint::new(-2.0, 7.5));
        assert_eq!(b.north, 10.0);
        assert_eq!(b.south, -2.0);
        assert_eq!(b.east, 7.5);
        assert_eq!(b.west, 5.0);
    }

    #[test]
    fn test_center_is_corner_midpoint() {
        let b = GeoBounds::from_corners(GeoPoint::new(37.8, -122.35), GeoPoint::new(37.7, -122.52));
        let c = b.center();
        assert!((c.lat - 37.75).abs() < 1e-12);
        assert!((c.lon - -122.435).abs() < 1e-12);
    }

    #[test]
    fn test_contains_includes_edges() {
        let b = GeoBounds::from_corners(GeoPoint::new(1.0, 1.0), GeoPoint::new(0.0, 0.0));
        assert!(b.contains(GeoPoint::new(0.5, 0.5)));
        assert!(b.contains(GeoPoint::new(1.0, 0.5)));
        assert!(!b.contains(GeoPoint::new(1.5, 0.5)));
    }

    #[test]
    fn test_rect_roundtrip_keeps_bounds() {
        let b = GeoBounds::from_corners(GeoPoint::new(48.2, 16.2), GeoPoint::new(48.1, 16.5));
        assert_eq!(GeoBounds::from(b.to_rect()), b);
    }

    #[test]
    fn test_place_label_fallbacks() {
        let mut place = PlaceSelection::with_location(GeoPoint::new(0.0, 0.0));
        assert_eq!(place.label(), "<unnamed place>");
        place.formatted_address = Some("1 Main St".to_string());
        assert_eq!(place.label(), "1 Main St");
        place.name = Some("Cafe".to_string());
        assert_eq!(place.label(), "Cafe");
    }
}
