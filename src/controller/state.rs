use serde::Serialize;

/// Observable state of a `BoundaryController`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerState {
    /// No boundary, no drawing
    Idle,
    /// A boundary is on the map
    Placed,
    /// The user is defining a new shape
    Drawing,
    /// A shape was drawn and awaits apply or cancel
    Pending,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Idle => write!(f, "idle"),
            ControllerState::Placed => write!(f, "placed"),
            ControllerState::Drawing => write!(f, "drawing"),
            ControllerState::Pending => write!(f, "pending"),
        }
    }
}

/// Result of a pointer-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawOutcome {
    /// The stroke became a pending shape
    Committed,
    /// The stroke was too short and was thrown away
    Discarded,
    /// There was no stroke to finish
    Ignored,
}
