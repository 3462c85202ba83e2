//! Dragkit - toolkit-independent drag-and-drop interaction engine
//!
//! This crate turns raw pointer, touch, and keyboard input into a coherent
//! "pick up an item, move it, drop it on a target" interaction, independent
//! of what is being dragged or how it is rendered:
//! - One [`DragCoordinator`] per interaction surface owns the active
//!   [`DragOperation`] and the drop-target registry
//! - A [`DraggableController`] per item applies activation constraints
//!   (distance / delay / tolerance) and issues coordinator commands
//! - [`DropTarget`] registrations carry region providers, kind filters,
//!   and enter/over/leave/drop callbacks
//! - [`overlay_transform`] projects the drag state to a visual transform
//!
//! ## Quick Start
//!
//! ```rust
//! use dragkit::{DragCoordinator, DraggableController, DropTarget, PointerButton};
//! use dragkit_core::geometry::Rect;
//! use dragkit_core::math::Vec2;
//! use std::time::Instant;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Block }
//!
//! let mut coordinator: DragCoordinator<Kind, &str> = DragCoordinator::new();
//! coordinator.register_target(
//!     DropTarget::new("grid")
//!         .fixed_region(Rect::new(0.0, 0.0, 400.0, 400.0))
//!         .accepts(Kind::Block)
//!         .on_drop(|payload, position| println!("dropped {payload} at {position}")),
//! );
//!
//! let mut tray_block = DraggableController::new("b1", Kind::Block, "block payload");
//! let now = Instant::now();
//! tray_block.on_pointer_down(&mut coordinator, PointerButton::Primary, Vec2::new(50.0, 50.0), now);
//! tray_block.on_pointer_move(&mut coordinator, Vec2::new(120.0, 120.0), now);
//! tray_block.on_pointer_up(&mut coordinator, Vec2::new(120.0, 120.0), now);
//! ```

pub mod context;
pub mod coordinator;
pub mod draggable;
pub mod error;
pub mod event;
pub mod id;
pub mod overlay;
pub mod target;
pub mod types;

pub use context::{DragContext, DragHandle};
pub use coordinator::{DragCoordinator, DropIntent};
pub use draggable::{DraggableController, Listeners, DEFAULT_KEYBOARD_STEP};
pub use error::{DragError, DragResult};
pub use event::{DragEvent, Key, PointerButton, SubscriberId, TouchId};
pub use id::InteractionId;
pub use overlay::{overlay_for, overlay_transform, OverlayMode, OverlayStyle, OverlayTransform};
pub use target::{DropTarget, RegionProvider, TargetState};
pub use types::{
    AccessibilityAttrs, ActivationConstraint, DragData, DragOperation, DragPhase,
};
