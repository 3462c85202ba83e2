//! Shared types for the drag-and-drop engine.

use std::time::Duration;

use dragkit_core::math::Vec2;

use crate::id::InteractionId;

/// Lifecycle stage of a drag operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// A pick-up gesture has begun but activation constraints are not yet
    /// satisfied. Only draggable controllers report this phase; the
    /// coordinator goes straight from `Idle` to `Dragging`.
    Pending,
    /// A drag is active and tracking the pointer.
    Dragging,
    /// A release is being committed: the operation still exists while the
    /// winning drop callback runs, then the coordinator resets to `Idle`.
    /// Never seen between host events.
    Dropping,
}

/// Activation constraints gating when a pick-up gesture becomes a drag.
///
/// `distance` promotes the gesture once the pointer has travelled that far
/// from the pick-up point. `delay` promotes it once the hold time elapses,
/// unless the pointer drifts more than `tolerance` first, which aborts the
/// gesture. With neither constraint the drag starts immediately.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivationConstraint {
    /// Minimum pointer travel (in engine units) before the drag starts.
    pub distance: f32,
    /// Minimum hold time before the drag starts.
    pub delay: Option<Duration>,
    /// Allowed drift while a delay is armed. Exceeding it aborts the gesture.
    pub tolerance: f32,
}

impl ActivationConstraint {
    /// No constraints: the drag starts on pick-up.
    pub const fn immediate() -> Self {
        Self {
            distance: 0.0,
            delay: None,
            tolerance: 0.0,
        }
    }

    /// Activate once the pointer has travelled `distance` units.
    pub const fn distance(distance: f32) -> Self {
        Self {
            distance,
            delay: None,
            tolerance: 0.0,
        }
    }

    /// Activate after holding for `delay`, allowing `tolerance` units of
    /// drift in the meantime.
    pub const fn delay(delay: Duration, tolerance: f32) -> Self {
        Self {
            distance: 0.0,
            delay: Some(delay),
            tolerance,
        }
    }

    /// Whether the drag should start without waiting for movement or time.
    pub fn is_immediate(&self) -> bool {
        self.distance <= 0.0 && self.delay.is_none()
    }
}

/// What a draggable hands to the coordinator at activation.
#[derive(Debug, Clone)]
pub struct DragData<K, P> {
    /// Id of the item being picked up.
    pub item: InteractionId,
    /// Kind tag used for accept/reject filtering by drop targets.
    pub kind: K,
    /// Opaque payload delivered to the accepting target on drop.
    pub payload: P,
}

/// The single active drag operation.
///
/// Owned and mutated exclusively by the coordinator; everything else reads
/// it through [`DragCoordinator::operation`](crate::DragCoordinator::operation).
#[derive(Debug, Clone)]
pub struct DragOperation<K, P> {
    /// Current phase. `Dragging` or `Dropping` while the operation exists.
    pub phase: DragPhase,
    /// Id of the dragged item.
    pub item: InteractionId,
    /// Kind tag of the dragged item.
    pub kind: K,
    /// Opaque payload.
    pub payload: P,
    /// Current pointer position.
    pub pointer_position: Vec2,
    /// Pointer position at pick-up.
    pub initial_position: Vec2,
    /// Offset from the item's origin to the pointer at pick-up.
    pub grab_offset: Vec2,
    /// Drop target currently under the pointer, if any.
    pub hovered_target: Option<InteractionId>,
}

impl<K, P> DragOperation<K, P> {
    /// Total pointer movement since pick-up.
    pub fn delta(&self) -> Vec2 {
        self.pointer_position - self.initial_position
    }
}

/// Accessibility summary a host can project onto its widget attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityAttrs {
    /// Suggested widget role.
    pub role: &'static str,
    /// Whether the element is currently grabbed (dragged).
    pub grabbed: bool,
    /// Whether the element is disabled for interaction.
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_constraint() {
        assert!(ActivationConstraint::immediate().is_immediate());
        assert!(ActivationConstraint::default().is_immediate());
        assert!(!ActivationConstraint::distance(10.0).is_immediate());
        assert!(!ActivationConstraint::delay(Duration::from_millis(300), 5.0).is_immediate());
    }

    #[test]
    fn test_operation_delta() {
        let op = DragOperation {
            phase: DragPhase::Dragging,
            item: InteractionId::new("b1"),
            kind: (),
            payload: (),
            pointer_position: Vec2::new(120.0, 120.0),
            initial_position: Vec2::new(50.0, 50.0),
            grab_offset: Vec2::ZERO,
            hovered_target: None,
        };
        assert_eq!(op.delta(), Vec2::new(70.0, 70.0));
    }
}
