//! Transient drawing state: strokes and the draw session that owns them.

use super::guard::DrawGuard;
use crate::config::DrawMode;
use crate::error::{BoundaryError, Result};
use crate::geometry::{close_ring, haversine_m};
use crate::models::{Boundary, GeoBounds, GeoPoint, Geometry};
use crate::surface::ShapeId;

/// One pointer-down..pointer-up gesture in progress
#[derive(Debug, Clone, PartialEq)]
pub enum Stroke {
    Rectangle { anchor: GeoPoint, bounds: GeoBounds },
    Circle { center: GeoPoint, radius_m: f64 },
    Freehand { path: Vec<GeoPoint> },
}

impl Stroke {
    pub fn begin(mode: DrawMode, point: GeoPoint) -> Self {
        match mode {
            DrawMode::Rectangle => Stroke::Rectangle {
                anchor: point,
                bounds: GeoBounds::at_point(point),
            },
            DrawMode::Circle => Stroke::Circle {
                center: point,
                radius_m: 0.0,
            },
            DrawMode::Freehand => Stroke::Freehand { path: vec![point] },
        }
    }

    pub fn extend(&mut self, point: GeoPoint) {
        match self {
            Stroke::Rectangle { anchor, bounds } => {
                *bounds = GeoBounds::from_corners(*anchor, point)
            }
            Stroke::Circle { center, radius_m } => *radius_m = haversine_m(*center, point),
            Stroke::Freehand { path } => path.push(point),
        }
    }

    /// Geometry to render while the stroke is still open
    pub fn preview(&self) -> Geometry {
        match self {
            Stroke::Rectangle { bounds, .. } => Geometry::Rectangle { bounds: *bounds },
            Stroke::Circle { center, radius_m } => Geometry::Circle {
                center: *center,
                radius_m: *radius_m,
            },
            Stroke::Freehand { path } => Geometry::Polygon { path: path.clone() },
        }
    }

    /// Finish the stroke. Freehand paths are closed into a ring and need
    /// `min_points` vertices; rectangles and circles always succeed.
    pub fn finish(self, min_points: usize) -> Result<Geometry> {
        match self {
            Stroke::Freehand { path } => match close_ring(&path, min_points) {
                Some(ring) => Ok(Geometry::Polygon { path: ring }),
                None => Err(BoundaryError::InsufficientDrawingPoints {
                    got: path.len(),
                    required: min_points,
                }),
            },
            other => Ok(other.preview()),
        }
    }
}

/// Where a session is within its gesture cycle
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for pointer-down
    Ready,
    Stroking(Stroke),
    /// Drawn, awaiting apply or cancel
    Committed(Geometry),
}

/// State held between `start_drawing` and `apply_drawing`/`cancel_drawing`
#[derive(Debug)]
pub struct DrawSession {
    pub mode: DrawMode,
    pub phase: Phase,
    /// In-progress or pending shape on the surface
    pub shape: Option<ShapeId>,
    /// Boundary that was active when drawing started
    pub prior: Option<Boundary>,
    pub guard: DrawGuard,
}

/// A committed session split into its parts
pub struct CommittedDrawing {
    pub geometry: Geometry,
    pub shape: Option<ShapeId>,
    pub prior: Option<Boundary>,
    pub guard: DrawGuard,
}

impl DrawSession {
    pub fn new(mode: DrawMode, prior: Option<Boundary>, guard: DrawGuard) -> Self {
        Self {
            mode,
            phase: Phase::Ready,
            shape: None,
            prior,
            guard,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.phase, Phase::Committed(_))
    }

    pub fn pending(&self) -> Option<&Geometry> {
        match &self.phase {
            Phase::Committed(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Split a committed session, or hand the session back unchanged
    pub fn into_committed(self) -> std::result::Result<CommittedDrawing, Self> {
        match self.phase {
            Phase::Committed(geometry) => Ok(CommittedDrawing {
                geometry,
                shape: self.shape,
                prior: self.prior,
                guard: self.guard,
            }),
            phase => Err(Self { phase, ..self }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_stroke_orders_corners() {
        let mut stroke = Stroke::begin(DrawMode::Rectangle, GeoPoint::new(10.0, 20.0));
        stroke.extend(GeoPoint::new(5.0, 25.0));
        stroke.extend(GeoPoint::new(8.0, 15.0));

        match stroke.finish(3).unwrap() {
            Geometry::Rectangle { bounds } => {
                // only the anchor and the latest point count
                assert_eq!(bounds.north, 10.0);
                assert_eq!(bounds.south, 8.0);
                assert_eq!(bounds.east, 20.0);
                assert_eq!(bounds.west, 15.0);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_circle_stroke_measures_radius() {
        let mut stroke = Stroke::begin(DrawMode::Circle, GeoPoint::new(0.0, 0.0));
        stroke.extend(GeoPoint::new(0.01, 0.0));

        match stroke.finish(3).unwrap() {
            Geometry::Circle { radius_m, .. } => assert!((radius_m - 1112.0).abs() < 5.0),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_freehand_stroke_needs_points() {
        let mut stroke = Stroke::begin(DrawMode::Freehand, GeoPoint::new(0.0, 0.0));
        stroke.extend(GeoPoint::new(0.0, 1.0));

        let err = stroke.finish(3).unwrap_err();
        assert_eq!(
            err,
            BoundaryError::InsufficientDrawingPoints {
                got: 2,
                required: 3
            }
        );
    }

    #[test]
    fn test_freehand_preview_is_open() {
        let mut stroke = Stroke::begin(DrawMode::Freehand, GeoPoint::new(0.0, 0.0));
        stroke.extend(GeoPoint::new(0.0, 1.0));
        stroke.extend(GeoPoint::new(1.0, 1.0));

        match stroke.preview() {
            Geometry::Polygon { path } => assert_eq!(path.len(), 3),
            other => panic!("unexpected geometry {:?}", other),
        }
    }
}
