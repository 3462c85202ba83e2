//! Overlay projection: drag state to a visual transform.
//!
//! Purely presentational. The functions here have no behavioral authority
//! over the drag and are safe to omit in a headless host.

use dragkit_core::math::Vec2;

use crate::coordinator::DragCoordinator;
use crate::types::DragOperation;

/// How the dragged item's visual tracks the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayMode {
    /// The original grab point follows the pointer
    /// (`pointer - grab_offset`).
    #[default]
    Follow,
    /// The overlay content is centered under the pointer. Used when the
    /// overlay's size differs from the original element.
    Centered,
}

/// Overlay configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Positioning mode.
    pub mode: OverlayMode,
    /// Size of the overlay content, for `Centered` mode.
    pub content_size: Vec2,
    /// Uniform scale applied while dragging.
    pub scale: f32,
    /// Opacity applied while dragging.
    pub opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mode: OverlayMode::Follow,
            content_size: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Computed transform for the dragged item's visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    /// Top-left screen position for the overlay content.
    pub position: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

/// Project a drag operation to an overlay transform.
pub fn overlay_transform<K, P>(
    operation: &DragOperation<K, P>,
    style: &OverlayStyle,
) -> OverlayTransform {
    let position = match style.mode {
        OverlayMode::Follow => operation.pointer_position - operation.grab_offset,
        OverlayMode::Centered => operation.pointer_position - style.content_size / 2.0,
    };
    OverlayTransform {
        position,
        scale: style.scale,
        opacity: style.opacity,
    }
}

/// Convenience wrapper over the coordinator: `None` while no drag is
/// active, so hosts render nothing.
pub fn overlay_for<K, P>(
    coordinator: &DragCoordinator<K, P>,
    style: &OverlayStyle,
) -> Option<OverlayTransform>
where
    K: Copy + Eq + std::hash::Hash + std::fmt::Debug,
{
    coordinator
        .operation()
        .map(|operation| overlay_transform(operation, style))
}
