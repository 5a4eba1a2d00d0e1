//! Scoped gesture lock and pointer listener registration for a draw session.

use tracing::debug;

use crate::surface::{ListenerId, MapSurface};

/// Held for as long as a draw session is open.
///
/// Acquiring disables map gestures and attaches pointer listeners; `release`
/// undoes both. It consumes the guard, so a session cannot release twice.
#[must_use]
#[derive(Debug)]
pub struct DrawGuard {
    listener: ListenerId,
}

impl DrawGuard {
    pub fn acquire<S: MapSurface>(surface: &mut S) -> Self {
        surface.set_gestures_enabled(false);
        let listener = surface.attach_pointer_listeners();
        debug!("Map gestures locked, pointer listeners {:?} attached", listener);
        Self { listener }
    }

    pub fn release<S: MapSurface>(self, surface: &mut S) {
        surface.detach_pointer_listeners(self.listener);
        surface.set_gestures_enabled(true);
        debug!("Pointer listeners {:?} detached, map gestures unlocked", self.listener);
    }
}
