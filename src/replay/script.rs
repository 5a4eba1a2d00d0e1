//! Session scripts: recorded widget events replayed against a controller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use perimeter::config::DrawMode;
use perimeter::surface::MapSurface;
use perimeter::{BoundaryController, GeoPoint, Geometry, PlaceSelection};

/// One host event, as recorded in a script file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    PlaceSelected { place: PlaceSelection },
    StartDrawing,
    PointerDown { lat: f64, lon: f64 },
    PointerMove { lat: f64, lon: f64 },
    PointerUp,
    CancelDrawing,
    ApplyDrawing,
    RemoveBoundary,
    BoundaryEdited { geometry: Geometry },
    SetDrawMode { mode: DrawMode },
}

/// Load a JSON array of events
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<SessionEvent>> {
    let content = fs::read_to_string(path).context("Failed to read script file")?;
    parse_script(&content)
}

pub fn parse_script(content: &str) -> Result<Vec<SessionEvent>> {
    serde_json::from_str(content).context("Failed to parse script file")
}

/// Feed one event to the controller
pub fn apply_event<S: MapSurface>(
    controller: &mut BoundaryController<S>,
    event: &SessionEvent,
) -> perimeter::Result<()> {
    match event {
        SessionEvent::PlaceSelected { place } => {
            controller.on_place_selected(place)?;
        }
        SessionEvent::StartDrawing => controller.start_drawing()?,
        SessionEvent::PointerDown { lat, lon } => {
            controller.on_pointer_down(GeoPoint::new(*lat, *lon))
        }
        SessionEvent::PointerMove { lat, lon } => {
            controller.on_pointer_move(GeoPoint::new(*lat, *lon))
        }
        SessionEvent::PointerUp => {
            let outcome = controller.on_pointer_up();
            debug!("Pointer up: {:?}", outcome);
        }
        SessionEvent::CancelDrawing => controller.cancel_drawing(),
        SessionEvent::ApplyDrawing => {
            controller.apply_drawing()?;
        }
        SessionEvent::RemoveBoundary => {
            controller.remove_boundary()?;
        }
        SessionEvent::BoundaryEdited { geometry } => {
            if !controller.on_boundary_edited(geometry.clone()) {
                debug!("Edit ignored, no placed boundary");
            }
        }
        SessionEvent::SetDrawMode { mode } => controller.set_draw_mode(*mode),
    }
    Ok(())
}
