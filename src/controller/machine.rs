//! The boundary controller state machine.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::guard::DrawGuard;
use super::session::{DrawSession, Phase, Stroke};
use super::{ControllerState, DrawOutcome};
use crate::config::{ControllerConfig, DrawMode, PlaceShape};
use crate::error::{BoundaryError, Result};
use crate::geometry::{bounds_around, viewport_radius};
use crate::models::{Boundary, BoundaryEvent, GeoBounds, GeoPoint, Geometry, PlaceSelection};
use crate::surface::{MapSurface, ShapeId};

type Observer = Box<dyn FnMut(&BoundaryEvent)>;

/// The boundary currently on the map and its surface handle
struct ActiveBoundary {
    boundary: Boundary,
    shape: ShapeId,
}

/// Owns the single boundary of a map widget and the drawing workflow around it.
///
/// All operations run on the host's event loop and take `&mut self`. The
/// controller talks to the map only through `S`, which may be a borrowed
/// surface (`&mut T`) when the host keeps ownership.
pub struct BoundaryController<S: MapSurface> {
    surface: S,
    config: ControllerConfig,
    active: Option<ActiveBoundary>,
    session: Option<DrawSession>,
    observers: Vec<Observer>,
}

impl<S: MapSurface> BoundaryController<S> {
    pub fn new(surface: S, config: ControllerConfig) -> Self {
        Self {
            surface,
            config,
            active: None,
            session: None,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> ControllerState {
        match (&self.session, &self.active) {
            (Some(session), _) if session.is_committed() => ControllerState::Pending,
            (Some(_), _) => ControllerState::Drawing,
            (None, Some(_)) => ControllerState::Placed,
            (None, None) => ControllerState::Idle,
        }
    }

    /// The active boundary, if one is placed
    pub fn boundary(&self) -> Option<&Boundary> {
        self.active.as_ref().map(|a| &a.boundary)
    }

    /// The drawn shape awaiting apply/cancel
    pub fn pending(&self) -> Option<&Geometry> {
        self.session.as_ref().and_then(DrawSession::pending)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether a point falls inside the active boundary.
    ///
    /// Always false while no boundary is placed, including during drawing.
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.boundary().is_some_and(|b| b.contains(point))
    }

    /// Lat/lon rectangle enclosing the active boundary, for bbox-biased search
    pub fn search_bounds(&self) -> Option<GeoBounds> {
        self.boundary().and_then(|b| b.geometry.bounds())
    }

    /// Drawing strategy for the next `start_drawing`
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.config.draw_mode = mode;
    }

    /// Register a boundary-changed listener
    pub fn on_change<F>(&mut self, observer: F)
    where
        F: FnMut(&BoundaryEvent) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: BoundaryEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    /// Build a boundary around a place picked from search results.
    ///
    /// Replaces any existing boundary without asking, and ends a draw
    /// session if one is open.
    pub fn on_place_selected(&mut self, place: &PlaceSelection) -> Result<&Boundary> {
        let (center, radius_m) = match (&place.viewport, &place.location) {
            (Some(viewport), _) => {
                self.surface.fit_bounds(viewport);
                (
                    viewport.center(),
                    viewport_radius(viewport, self.config.radius_method),
                )
            }
            (None, Some(location)) => (*location, self.config.default_radius_m),
            (None, None) => {
                warn!("No geometry for selected place {}", place.label());
                return Err(BoundaryError::InvalidPlaceSelection);
            }
        };

        if let Some(session) = self.session.take() {
            debug!("Place selected while drawing, closing draw session");
            self.close_session(session);
        }
        self.retire_active();

        let bounds = bounds_around(center, radius_m);
        let geometry = match self.config.place_shape {
            PlaceShape::Rectangle => Geometry::Rectangle { bounds },
            PlaceShape::Polygon => Geometry::Polygon {
                path: vec![
                    bounds.northeast(),
                    bounds.southeast(),
                    bounds.southwest(),
                    bounds.northwest(),
                    bounds.northeast(),
                ],
            },
            PlaceShape::Circle => Geometry::Circle { center, radius_m },
        };

        info!(
            "Placing {} boundary for {} (radius {:.0} m)",
            geometry.kind(),
            place.label(),
            radius_m
        );

        Ok(self.place(Boundary::new(geometry, self.config.style.interactive())))
    }

    /// Enter drawing mode. Only valid from `Idle` or `Placed`.
    pub fn start_drawing(&mut self) -> Result<()> {
        let state = self.state();
        if !matches!(state, ControllerState::Idle | ControllerState::Placed) {
            return Err(BoundaryError::InvalidTransition {
                operation: "start drawing",
                state,
            });
        }

        let prior = self.retire_active();
        let guard = DrawGuard::acquire(&mut self.surface);
        self.session = Some(DrawSession::new(self.config.draw_mode, prior, guard));

        info!("Drawing started ({:?})", self.config.draw_mode);
        Ok(())
    }

    pub fn on_pointer_down(&mut self, point: GeoPoint) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.is_committed() {
            debug!("Pointer down ignored, drawing awaits apply or cancel");
            return;
        }

        if let Some(stale) = session.shape.take() {
            self.surface.remove_shape(stale);
        }

        let stroke = Stroke::begin(session.mode, point);
        session.shape = Some(
            self.surface
                .add_shape(&stroke.preview(), &self.config.style.locked()),
        );
        session.phase = Phase::Stroking(stroke);
    }

    pub fn on_pointer_move(&mut self, point: GeoPoint) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Phase::Stroking(stroke) = &mut session.phase else {
            return;
        };

        stroke.extend(point);
        if let Some(shape) = session.shape {
            self.surface
                .update_shape(shape, &stroke.preview(), &self.config.style.locked());
        }
    }

    /// Finish the current stroke.
    ///
    /// A freehand stroke with too few points is dropped and the controller
    /// stays in `Drawing` so the user can try again.
    pub fn on_pointer_up(&mut self) -> DrawOutcome {
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };
        let stroke = match std::mem::replace(&mut session.phase, Phase::Ready) {
            Phase::Stroking(stroke) => stroke,
            other => {
                session.phase = other;
                return DrawOutcome::Ignored;
            }
        };

        match stroke.finish(self.config.min_freehand_points) {
            Ok(geometry) => {
                let style = self.config.style.locked();
                match session.shape {
                    Some(shape) => self.surface.update_shape(shape, &geometry, &style),
                    None => session.shape = Some(self.surface.add_shape(&geometry, &style)),
                }
                debug!("Drew {}, awaiting apply", geometry.kind());
                session.phase = Phase::Committed(geometry);
                DrawOutcome::Committed
            }
            Err(e) => {
                debug!("Discarding stroke: {}", e);
                if let Some(shape) = session.shape.take() {
                    self.surface.remove_shape(shape);
                }
                DrawOutcome::Discarded
            }
        }
    }

    /// Leave drawing mode without keeping the drawn shape.
    ///
    /// With `restore_on_cancel` the boundary that existed before drawing
    /// started is put back. Does nothing outside `Drawing`/`Pending`.
    pub fn cancel_drawing(&mut self) {
        let Some(session) = self.session.take() else {
            debug!("Cancel ignored, not drawing");
            return;
        };

        let prior = self.close_session(session);
        info!("Drawing cancelled");

        match prior {
            Some(prior) if self.config.restore_on_cancel => {
                debug!("Restoring boundary {}", prior.id);
                self.place(prior);
            }
            Some(prior) => debug!("Previous boundary {} not restored", prior.id),
            None => {}
        }
    }

    /// Promote the pending shape to the active boundary. Only valid from `Pending`.
    pub fn apply_drawing(&mut self) -> Result<&Boundary> {
        let drawing = match self.session.take().map(DrawSession::into_committed) {
            Some(Ok(drawing)) => drawing,
            Some(Err(session)) => {
                self.session = Some(session);
                return Err(BoundaryError::InvalidTransition {
                    operation: "apply drawing",
                    state: self.state(),
                });
            }
            None => {
                return Err(BoundaryError::InvalidTransition {
                    operation: "apply drawing",
                    state: self.state(),
                })
            }
        };

        drawing.guard.release(&mut self.surface);
        if let Some(prior) = drawing.prior {
            debug!("Dropping previous boundary {}", prior.id);
        }

        let boundary = Boundary::new(drawing.geometry, self.config.style.interactive());
        let shape = match drawing.shape {
            Some(shape) => {
                self.surface
                    .update_shape(shape, &boundary.geometry, &boundary.style);
                shape
            }
            None => self.surface.add_shape(&boundary.geometry, &boundary.style),
        };

        info!("Applied drawn {} boundary {}", boundary.geometry.kind(), boundary.id);
        self.emit(BoundaryEvent::Created(boundary.clone()));
        Ok(&self.active.insert(ActiveBoundary { boundary, shape }).boundary)
    }

    /// Remove the active boundary.
    ///
    /// Returns the removed id, or `None` when there was nothing to remove.
    pub fn remove_boundary(&mut self) -> Result<Option<Uuid>> {
        match self.state() {
            ControllerState::Placed => Ok(self.retire_active().map(|b| b.id)),
            ControllerState::Idle => Ok(None),
            state => Err(BoundaryError::InvalidTransition {
                operation: "remove boundary",
                state,
            }),
        }
    }

    /// The user resized or dragged the active boundary on the map.
    ///
    /// Returns false when there is no placed boundary to update.
    pub fn on_boundary_edited(&mut self, geometry: Geometry) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        active.boundary.geometry = geometry;
        self.surface.update_shape(
            active.shape,
            &active.boundary.geometry,
            &active.boundary.style,
        );

        let updated = active.boundary.clone();
        debug!("Boundary {} edited", updated.id);
        self.emit(BoundaryEvent::Updated(updated));
        true
    }

    /// Render a boundary and make it the active one
    fn place(&mut self, boundary: Boundary) -> &Boundary {
        let shape = self.surface.add_shape(&boundary.geometry, &boundary.style);
        self.emit(BoundaryEvent::Created(boundary.clone()));
        &self.active.insert(ActiveBoundary { boundary, shape }).boundary
    }

    /// Take the active boundary off the map
    fn retire_active(&mut self) -> Option<Boundary> {
        let ActiveBoundary { boundary, shape } = self.active.take()?;
        self.surface.remove_shape(shape);
        info!("Removed boundary {}", boundary.id);
        self.emit(BoundaryEvent::Removed(boundary.id));
        Some(boundary)
    }

    /// Drop the session's shape and release its guard
    fn close_session(&mut self, session: DrawSession) -> Option<Boundary> {
        let DrawSession {
            shape, prior, guard, ..
        } = session;
        if let Some(shape) = shape {
            self.surface.remove_shape(shape);
        }
        guard.release(&mut self.surface);
        prior
    }
}

impl<S: MapSurface> Drop for BoundaryController<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.close_session(session);
        }
    }
}
