//! Geometry helpers: radius estimation, meter/degree conversion and ring closing.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use crate::models::{GeoBounds, GeoPoint};

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Radius used for point-like places with no viewport
pub const DEFAULT_RADIUS_M: f64 = 500.0;

/// How a viewport is turned into a radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusMethod {
    /// Half the great-circle NE-SW diagonal
    #[default]
    Haversine,
    /// Half the larger degree span, scaled by `METERS_PER_DEGREE`
    Planar,
}

/// Great-circle distance in meters
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

/// Radius in meters of the circle a viewport stands for
pub fn viewport_radius(viewport: &GeoBounds, method: RadiusMethod) -> f64 {
    match method {
        RadiusMethod::Haversine => haversine_m(viewport.southwest(), viewport.northeast()) / 2.0,
        RadiusMethod::Planar => {
            viewport.lat_span().max(viewport.lon_span()).abs() * METERS_PER_DEGREE / 2.0
        }
    }
}

/// Square-ish bounds extending `radius_m` from `center` along each axis.
///
/// The longitude offset is widened by 1/cos(lat); near the poles it grows
/// without limit.
pub fn bounds_around(center: GeoPoint, radius_m: f64) -> GeoBounds {
    let lat_offset = radius_m / METERS_PER_DEGREE;
    let lon_offset = radius_m / (METERS_PER_DEGREE * center.lat.to_radians().cos());

    GeoBounds {
        north: center.lat + lat_offset,
        south: center.lat - lat_offset,
        east: center.lon + lon_offset,
        west: center.lon - lon_offset,
    }
}

/// Close a vertex path into a ring, repeating the first vertex at the end
/// unless the path already ends where it began.
///
/// Returns `None` when the path has fewer than `min_points` accumulated
/// points (never fewer than 3). Repeated points count like any other.
pub fn close_ring(path: &[GeoPoint], min_points: usize) -> Option<Vec<GeoPoint>> {
    if path.len() < min_points.max(3) {
        return None;
    }

    let mut ring = path.to_vec();

    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }

    Some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(size_deg: f64) -> GeoBounds {
        GeoBounds::from_corners(
            GeoPoint::new(40.0 + size_deg, -74.0 + size_deg),
            GeoPoint::new(40.0, -74.0),
        )
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {}", d);
    }

    #[test]
    fn test_viewport_radius_non_negative() {
        for method in [RadiusMethod::Haversine, RadiusMethod::Planar] {
            assert_eq!(viewport_radius(&viewport(0.0), method), 0.0);
            assert!(viewport_radius(&viewport(0.01), method) > 0.0);
        }
    }

    #[test]
    fn test_viewport_radius_grows_with_diagonal() {
        for method in [RadiusMethod::Haversine, RadiusMethod::Planar] {
            let mut last = -1.0;
            for size in [0.001, 0.01, 0.05, 0.1, 0.5, 1.0] {
                let r = viewport_radius(&viewport(size), method);
                assert!(r > last, "{:?} radius did not grow at {}", method, size);
                last = r;
            }
        }
    }

    #[test]
    fn test_planar_radius_uses_larger_span() {
        let vp = GeoBounds::from_corners(GeoPoint::new(0.2, 0.1), GeoPoint::new(0.0, 0.0));
        let r = viewport_radius(&vp, RadiusMethod::Planar);
        assert!((r - 0.2 * METERS_PER_DEGREE / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_around_equator() {
        let b = bounds_around(GeoPoint::new(0.0, 0.0), METERS_PER_DEGREE);
        assert!((b.north - 1.0).abs() < 1e-9);
        assert!((b.south + 1.0).abs() < 1e-9);
        assert!((b.east - 1.0).abs() < 1e-9);
        assert!((b.west + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_around_widens_longitude_at_latitude() {
        let b = bounds_around(GeoPoint::new(60.0, 10.0), DEFAULT_RADIUS_M);
        assert!(b.north >= b.south);
        // cos(60°) = 0.5 so the lon span doubles
        assert!((b.lon_span() - 2.0 * b.lat_span()).abs() < 1e-9);
    }

    #[test]
    fn test_close_ring_appends_first_vertex() {
        let path = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        let ring = close_ring(&path, 3).unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_close_ring_too_short() {
        let path = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        assert!(close_ring(&path, 3).is_none());
    }

    #[test]
    fn test_close_ring_three_points_ending_at_start() {
        let a = GeoPoint::new(0.0, 0.0);
        let ring = close_ring(&[a, GeoPoint::new(0.0, 1.0), a], 3).unwrap();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.first(), ring.last());

        // a press that never moved still has three accumulated points
        assert!(close_ring(&[a, a, a], 3).is_some());
    }

    #[test]
    fn test_close_ring_already_closed() {
        let p = GeoPoint::new(0.0, 0.0);
        let path = vec![p, GeoPoint::new(0.0, 1.0), GeoPoint::new(1.0, 1.0), p];
        let ring = close_ring(&path, 3).unwrap();
        assert_eq!(ring.len(), 4);
    }
}
