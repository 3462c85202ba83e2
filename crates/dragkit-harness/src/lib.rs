//! Test harness for dragkit.
//!
//! Drives controllers and a coordinator with scripted gestures on a manual
//! clock, so activation delays are tested without sleeping, and records the
//! coordinator's notifications for assertions.
//!
//! # Example
//!
//! ```rust
//! use dragkit::{DragCoordinator, DraggableController, DropTarget};
//! use dragkit_core::geometry::Rect;
//! use dragkit_core::math::Vec2;
//! use dragkit_harness::{EventRecorder, GestureDriver};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Block }
//!
//! let mut coordinator: DragCoordinator<Kind, u32> = DragCoordinator::new();
//! let recorder = EventRecorder::attach(&mut coordinator);
//! coordinator.register_target(
//!     DropTarget::new("grid")
//!         .fixed_region(Rect::new(0.0, 0.0, 400.0, 400.0))
//!         .accepts(Kind::Block),
//! );
//!
//! let mut driver = GestureDriver::new(coordinator);
//! let mut block = DraggableController::new("b1", Kind::Block, 7);
//! driver.press(&mut block, Vec2::new(50.0, 50.0));
//! driver.move_to(&mut block, Vec2::new(120.0, 120.0));
//! driver.release(&mut block, Vec2::new(120.0, 120.0));
//!
//! assert_eq!(recorder.names().first(), Some(&"started"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dragkit::{
    DragCoordinator, DragEvent, DraggableController, Key, PointerButton, TouchId,
};
use dragkit_core::math::Vec2;

/// Records coordinator notifications for later assertions.
pub struct EventRecorder<K> {
    events: Rc<RefCell<Vec<DragEvent<K>>>>,
}

impl<K> EventRecorder<K>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    /// Subscribe a fresh recorder to a coordinator.
    pub fn attach<P>(coordinator: &mut DragCoordinator<K, P>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        coordinator.subscribe(move |event| sink.borrow_mut().push(*event));
        Self { events }
    }

    /// All recorded events, in order.
    pub fn events(&self) -> Vec<DragEvent<K>> {
        self.events.borrow().clone()
    }

    /// Short names of the recorded events, for order assertions.
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .borrow()
            .iter()
            .map(|event| match event {
                DragEvent::Started { .. } => "started",
                DragEvent::Moved { .. } => "moved",
                DragEvent::HoverChanged { target: Some(_) } => "hover",
                DragEvent::HoverChanged { target: None } => "unhover",
                DragEvent::Ended {
                    cancelled: false, ..
                } => "ended",
                DragEvent::Ended {
                    cancelled: true, ..
                } => "cancelled",
            })
            .collect()
    }

    /// Drop commits observed via end notifications.
    pub fn committed_zones(&self) -> Vec<dragkit::InteractionId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                DragEvent::Ended {
                    cancelled: false,
                    drop_zone: Some(zone),
                    ..
                } => Some(*zone),
                _ => None,
            })
            .collect()
    }

    /// Discard recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Applies scripted input to controllers against a coordinator, advancing a
/// manual clock instead of sleeping.
pub struct GestureDriver<K, P> {
    coordinator: DragCoordinator<K, P>,
    now: Instant,
}

impl<K, P> GestureDriver<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
    P: Clone,
{
    /// Wrap a coordinator. The clock starts at the current instant and only
    /// moves via [`GestureDriver::wait`].
    pub fn new(coordinator: DragCoordinator<K, P>) -> Self {
        Self {
            coordinator,
            now: Instant::now(),
        }
    }

    /// Access the wrapped coordinator.
    pub fn coordinator(&mut self) -> &mut DragCoordinator<K, P> {
        &mut self.coordinator
    }

    /// The driver's current instant.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Primary-button press on a controller's element.
    pub fn press(&mut self, controller: &mut DraggableController<K, P>, position: Vec2) {
        controller.on_pointer_down(
            &mut self.coordinator,
            PointerButton::Primary,
            position,
            self.now,
        );
    }

    /// Pointer movement.
    pub fn move_to(&mut self, controller: &mut DraggableController<K, P>, position: Vec2) {
        controller.on_pointer_move(&mut self.coordinator, position, self.now);
    }

    /// Pointer release.
    pub fn release(&mut self, controller: &mut DraggableController<K, P>, position: Vec2) {
        controller.on_pointer_up(&mut self.coordinator, position, self.now);
    }

    /// Advance the clock and give the controller a chance to promote an
    /// armed delay.
    pub fn wait(&mut self, controller: &mut DraggableController<K, P>, duration: Duration) {
        self.now += duration;
        controller.poll(&mut self.coordinator, self.now);
    }

    /// Key press routed to the controller.
    pub fn tap_key(&mut self, controller: &mut DraggableController<K, P>, key: Key) {
        controller.on_key_down(&mut self.coordinator, key);
    }

    /// Touch press.
    pub fn touch_start(
        &mut self,
        controller: &mut DraggableController<K, P>,
        touch: TouchId,
        position: Vec2,
    ) {
        controller.on_touch_start(&mut self.coordinator, touch, position, self.now);
    }

    /// Touch movement.
    pub fn touch_move(
        &mut self,
        controller: &mut DraggableController<K, P>,
        touch: TouchId,
        position: Vec2,
    ) {
        controller.on_touch_move(&mut self.coordinator, touch, position, self.now);
    }

    /// Touch release.
    pub fn touch_end(
        &mut self,
        controller: &mut DraggableController<K, P>,
        touch: TouchId,
        position: Vec2,
    ) {
        controller.on_touch_end(&mut self.coordinator, touch, position, self.now);
    }

    /// Host-side touch cancellation.
    pub fn touch_cancel(&mut self, controller: &mut DraggableController<K, P>, touch: TouchId) {
        controller.on_touch_cancel(&mut self.coordinator, touch);
    }
}
