//! Host map surface abstraction.
//!
//! The controller never renders anything itself. It asks a `MapSurface` to
//! add, update and remove shapes, lock gestures while the user draws, and
//! route pointer events to it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BoundaryStyle, GeoBounds, Geometry};

/// Handle of a shape rendered on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Handle of an attached pointer listener set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Operations the controller needs from the host map.
///
/// Pointer coordinates arrive already translated from screen to geo space.
pub trait MapSurface {
    fn add_shape(&mut self, geometry: &Geometry, style: &BoundaryStyle) -> ShapeId;

    fn update_shape(&mut self, id: ShapeId, geometry: &Geometry, style: &BoundaryStyle);

    fn remove_shape(&mut self, id: ShapeId);

    /// Enable or disable map panning/zooming
    fn set_gestures_enabled(&mut self, enabled: bool);

    /// Move the camera so the bounds are visible
    fn fit_bounds(&mut self, bounds: &GeoBounds);

    /// Start routing pointer down/move/up to the controller
    fn attach_pointer_listeners(&mut self) -> ListenerId;

    fn detach_pointer_listeners(&mut self, id: ListenerId);
}

impl<T: MapSurface + ?Sized> MapSurface for &mut T {
    fn add_shape(&mut self, geometry: &Geometry, style: &BoundaryStyle) -> ShapeId {
        (**self).add_shape(geometry, style)
    }

    fn update_shape(&mut self, id: ShapeId, geometry: &Geometry, style: &BoundaryStyle) {
        (**self).update_shape(id, geometry, style)
    }

    fn remove_shape(&mut self, id: ShapeId) {
        (**self).remove_shape(id)
    }

    fn set_gestures_enabled(&mut self, enabled: bool) {
        (**self).set_gestures_enabled(enabled)
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds) {
        (**self).fit_bounds(bounds)
    }

    fn attach_pointer_listeners(&mut self) -> ListenerId {
        (**self).attach_pointer_listeners()
    }

    fn detach_pointer_listeners(&mut self, id: ListenerId) {
        (**self).detach_pointer_listeners(id)
    }
}

/// A shape as last rendered on a `RecordingSurface`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedShape {
    pub geometry: Geometry,
    pub style: BoundaryStyle,
}

/// In-memory surface that keeps whatever the controller renders.
///
/// Used by tests and by the replay binary in place of a real map.
#[derive(Debug)]
pub struct RecordingSurface {
    shapes: BTreeMap<ShapeId, RenderedShape>,
    listeners: BTreeSet<ListenerId>,
    gestures_enabled: bool,
    viewport: Option<GeoBounds>,
    next_id: u64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            shapes: BTreeMap::new(),
            listeners: BTreeSet::new(),
            gestures_enabled: true,
            viewport: None,
            next_id: 1,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&RenderedShape> {
        self.shapes.get(&id)
    }

    pub fn shapes(&self) -> impl Iterator<Item = (&ShapeId, &RenderedShape)> {
        self.shapes.iter()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn gestures_enabled(&self) -> bool {
        self.gestures_enabled
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Bounds of the last `fit_bounds` call
    pub fn viewport(&self) -> Option<&GeoBounds> {
        self.viewport.as_ref()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MapSurface for RecordingSurface {
    fn add_shape(&mut self, geometry: &Geometry, style: &BoundaryStyle) -> ShapeId {
        let id = ShapeId(self.next_id());
        self.shapes.insert(
            id,
            RenderedShape {
                geometry: geometry.clone(),
                style: style.clone(),
            },
        );
        id
    }

    fn update_shape(&mut self, id: ShapeId, geometry: &Geometry, style: &BoundaryStyle) {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.geometry = geometry.clone();
                shape.style = style.clone();
            }
            None => debug!("Update for unknown shape {:?}", id),
        }
    }

    fn remove_shape(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }

    fn set_gestures_enabled(&mut self, enabled: bool) {
        self.gestures_enabled = enabled;
    }

    fn fit_bounds(&mut self, bounds: &GeoBounds) {
        self.viewport = Some(*bounds);
    }

    fn attach_pointer_listeners(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id);
        id
    }

    fn detach_pointer_listeners(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}
