//! Drag lifecycle notifications and input-side event types.

use dragkit_core::math::Vec2;

use crate::id::InteractionId;

/// Notifications emitted by the coordinator to its subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent<K> {
    /// A drag operation began.
    Started {
        /// Id of the picked-up item.
        item: InteractionId,
        /// Kind tag of the picked-up item.
        kind: K,
        /// Pick-up position.
        position: Vec2,
    },
    /// The pointer moved during an active drag.
    Moved {
        /// New pointer position.
        position: Vec2,
        /// Total movement since pick-up.
        delta: Vec2,
    },
    /// The hovered drop target changed.
    HoverChanged {
        /// The newly hovered target, or `None`.
        target: Option<InteractionId>,
    },
    /// The drag operation ended.
    Ended {
        /// True when the drag was cancelled (Escape, teardown, touch-cancel).
        /// Cancelled drags never commit a drop.
        cancelled: bool,
        /// The target hovered at release, or `None`. Always `None` for
        /// cancelled drags.
        drop_zone: Option<InteractionId>,
        /// Final pointer position.
        position: Vec2,
    },
}

/// Handle returned by [`DragCoordinator::subscribe`] for later removal.
///
/// [`DragCoordinator::subscribe`]: crate::DragCoordinator::subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub(crate) u64);

/// Pointer button, toolkit-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary button (usually left).
    Primary,
    /// The secondary button (usually right).
    Secondary,
    /// The middle button.
    Middle,
}

/// Identifier of a touch contact, as reported by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchId(pub u64);

/// Keys the engine reacts to. Hosts map their own key events onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Primary action key: picks up, and drops, via keyboard.
    Enter,
    /// Alternate primary action key.
    Space,
    /// Cancels the active drag.
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Whether this key activates or commits a keyboard drag.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }

    /// Movement direction for arrow keys, `None` otherwise.
    pub fn arrow_direction(&self) -> Option<Vec2> {
        match self {
            Key::ArrowLeft => Some(Vec2::new(-1.0, 0.0)),
            Key::ArrowRight => Some(Vec2::new(1.0, 0.0)),
            Key::ArrowUp => Some(Vec2::new(0.0, -1.0)),
            Key::ArrowDown => Some(Vec2::new(0.0, 1.0)),
            _ => None,
        }
    }
}
