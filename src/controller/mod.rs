//! Boundary controller: place selection, drawing and the single active boundary.
//!
//! ```text
//! Idle/Placed --start_drawing--> Drawing --pointer up--> Pending
//! Pending --apply_drawing--> Placed
//! Drawing/Pending --cancel_drawing--> Idle or Placed
//! Placed --remove_boundary--> Idle
//! any --on_place_selected--> Placed
//! ```

mod guard;
mod machine;
mod session;
mod state;

pub use guard::DrawGuard;
pub use machine::BoundaryController;
pub use session::{CommittedDrawing, DrawSession, Phase, Stroke};
pub use state::{ControllerState, DrawOutcome};
