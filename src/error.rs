//! Error types for boundary operations.

use thiserror::Error;

use crate::controller::ControllerState;

/// Errors raised by the boundary controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    /// The selected place carries neither a viewport nor a location
    #[error("selected place has no viewport or location")]
    InvalidPlaceSelection,

    /// A freehand stroke ended with too few vertices to form a polygon
    #[error("freehand stroke has {got} points, need at least {required}")]
    InsufficientDrawingPoints { got: usize, required: usize },

    /// Operation is not valid in the current state
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: ControllerState,
    },
}

/// Result type alias for boundary operations
pub type Result<T> = std::result::Result<T, BoundaryError>;
