//! Perimeter - boundary definition for place-search map widgets
//!
//! This library owns the state machine that turns a selected place or a
//! pointer drawing into a single editable boundary on a host map surface.

pub mod banner;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod models;
pub mod surface;

pub use controller::{BoundaryController, ControllerState, DrawOutcome};
pub use error::{BoundaryError, Result};
pub use models::{Boundary, BoundaryEvent, GeoBounds, GeoPoint, Geometry, PlaceSelection};
