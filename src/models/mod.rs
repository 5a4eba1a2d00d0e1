//! Core data models for boundary definition.

pub mod boundary;
pub mod place;

pub use boundary::{Boundary, BoundaryEvent, BoundaryStyle, Geometry};
pub use place::{GeoBounds, GeoPoint, PlaceSelection};
