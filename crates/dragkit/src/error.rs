//! Error types for the drag-and-drop engine.
//!
//! Out-of-contract calls that correspond to out-of-order event delivery (a
//! second `start_drag`, a release with no active drag) are logged no-ops.
//! The one hard failure is a wiring error: using a handle whose coordinator
//! no longer exists.

use std::fmt;

/// Errors that can occur when interacting with the engine.
#[derive(Debug)]
pub enum DragError {
    /// A handle was used after its coordinator was dropped. This is a
    /// usage/wiring error in the host, not a runtime condition to recover
    /// from.
    CoordinatorUnavailable,
}

impl fmt::Display for DragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragError::CoordinatorUnavailable => {
                write!(f, "no drag coordinator available: handle outlived its coordinator")
            }
        }
    }
}

impl std::error::Error for DragError {}

/// Result type alias for engine operations.
pub type DragResult<T> = Result<T, DragError>;
