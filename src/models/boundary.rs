//! The boundary shape and its change notifications.

use geo::{BoundingRect, Coord, Intersects, LineString, Polygon};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeoBounds, GeoPoint};
use crate::geometry::{bounds_around, haversine_m};

/// Shape geometry of a boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Rectangle {
        bounds: GeoBounds,
    },
    Circle {
        center: GeoPoint,
        radius_m: f64,
    },
    /// Closed ring: the first vertex is repeated at the end
    Polygon {
        path: Vec<GeoPoint>,
    },
}

impl Geometry {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Rectangle { .. } => "rectangle",
            Geometry::Circle { .. } => "circle",
            Geometry::Polygon { .. } => "polygon",
        }
    }

    /// Enclosing lat/lon rectangle
    pub fn bounds(&self) -> Option<GeoBounds> {
        match self {
            Geometry::Rectangle { bounds } => Some(*bounds),
            Geometry::Circle { center, radius_m } => Some(bounds_around(*center, *radius_m)),
            Geometry::Polygon { path } => to_line_string(path)
                .bounding_rect()
                .map(GeoBounds::from),
        }
    }

    /// Whether a point falls inside the shape (edges included)
    pub fn contains(&self, p: GeoPoint) -> bool {
        match self {
            Geometry::Rectangle { bounds } => bounds.contains(p),
            Geometry::Circle { center, radius_m } => haversine_m(*center, p) <= *radius_m,
            Geometry::Polygon { path } => {
                if path.len() < 4 {
                    return false;
                }
                Polygon::new(to_line_string(path), vec![]).intersects(&Coord::from(p))
            }
        }
    }
}

fn to_line_string(path: &[GeoPoint]) -> LineString<f64> {
    LineString::new(path.iter().copied().map(Coord::from).collect())
}

/// Stroke/fill attributes and interaction flags passed to the map surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryStyle {
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: u32,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub editable: bool,
    pub draggable: bool,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        Self {
            stroke_color: "#000000".to_string(),
            stroke_opacity: 1.0,
            stroke_weight: 10,
            fill_color: "#000000".to_string(),
            fill_opacity: 0.1,
            editable: true,
            draggable: true,
        }
    }
}

impl BoundaryStyle {
    /// Same look, with the user unable to edit or drag the shape
    pub fn locked(&self) -> Self {
        Self {
            editable: false,
            draggable: false,
            ..self.clone()
        }
    }

    /// Same look, editable and draggable
    pub fn interactive(&self) -> Self {
        Self {
            editable: true,
            draggable: true,
            ..self.clone()
        }
    }
}

/// The single active boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub id: Uuid,
    pub geometry: Geometry,
    pub style: BoundaryStyle,
}

impl Boundary {
    pub fn new(geometry: Geometry, style: BoundaryStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            style,
        }
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        self.geometry.contains(p)
    }
}

/// Boundary change notification for the host UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum BoundaryEvent {
    Created(Boundary),
    Updated(Boundary),
    Removed(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_polygon_bounds() {
        let geometry = Geometry::Polygon { path: square() };
        let b = geometry.bounds().unwrap();
        assert_eq!(b.north, 1.0);
        assert_eq!(b.south, 0.0);
        assert_eq!(b.east, 1.0);
        assert_eq!(b.west, 0.0);
    }

    #[test]
    fn test_polygon_contains() {
        let geometry = Geometry::Polygon { path: square() };
        assert!(geometry.contains(GeoPoint::new(0.5, 0.5)));
        assert!(!geometry.contains(GeoPoint::new(2.0, 0.5)));
    }

    #[test]
    fn test_empty_polygon_has_no_bounds() {
        let geometry = Geometry::Polygon { path: vec![] };
        assert!(geometry.bounds().is_none());
        assert!(!geometry.contains(GeoPoint::new(0.0, 0.0)));
    }

    #[test]
    fn test_circle_contains() {
        let geometry = Geometry::Circle {
            center: GeoPoint::new(37.7749, -122.4194),
            radius_m: 500.0,
        };
        assert!(geometry.contains(GeoPoint::new(37.7760, -122.4194)));
        assert!(!geometry.contains(GeoPoint::new(37.79, -122.4194)));
    }

    #[test]
    fn test_style_toggles_flags_only() {
        let style = BoundaryStyle::default();
        let locked = style.locked();
        assert!(!locked.editable && !locked.draggable);
        assert_eq!(locked.stroke_weight, 10);
        assert_eq!(locked.interactive(), style);
    }

    #[test]
    fn test_geometry_serializes_tagged() {
        let geometry = Geometry::Circle {
            center: GeoPoint::new(1.0, 2.0),
            radius_m: 3.0,
        };
        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "circle");
        assert_eq!(json["radius_m"], 3.0);
    }
}
