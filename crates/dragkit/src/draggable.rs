//! Per-item draggable controller.
//!
//! Bridges the three input modalities (pointer, touch, keyboard) into
//! coordinator commands, applying activation constraints through an explicit
//! nested state machine: `Idle | Pending { origin, grab offset, deadline } |
//! Dragging`. Every input event maps to exactly one transition; there are no
//! ad hoc flag combinations.
//!
//! Time is passed in, never measured here: delay activation arms a deadline
//! and the host promotes it by calling [`DraggableController::poll`] (or
//! implicitly at the head of the next move/release event). There is no
//! background execution.

use std::fmt;
use std::hash::Hash;
use std::time::Instant;

use bitflags::bitflags;
use dragkit_core::geometry::{self, Rect};
use dragkit_core::math::Vec2;

use crate::coordinator::DragCoordinator;
use crate::event::{Key, PointerButton, TouchId};
use crate::id::InteractionId;
use crate::target::RegionProvider;
use crate::types::{AccessibilityAttrs, ActivationConstraint, DragData, DragPhase};

/// Default synthetic-pointer step for arrow-key movement, in engine units.
pub const DEFAULT_KEYBOARD_STEP: f32 = 10.0;

bitflags! {
    /// Global event streams a controller currently needs from the host.
    ///
    /// Empty while idle: movement/release listeners are attached only while
    /// a gesture is pending or dragging, and detached on termination.
    /// Persistent global listeners are a resource-leak hazard.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Listeners: u8 {
        /// Pointer/touch movement outside the element.
        const MOVE = 1 << 0;
        /// Pointer/touch release outside the element.
        const RELEASE = 1 << 1;
        /// Cancellation sources (Escape key, touch-cancel).
        const CANCEL = 1 << 2;
    }
}

/// Internal activation state.
#[derive(Clone, Copy)]
enum ActivationState {
    Idle,
    Pending {
        /// Pick-up position; used as the initial position on promotion.
        origin: Vec2,
        /// Pointer-to-item-origin offset captured at pick-up.
        grab_offset: Vec2,
        /// When the armed delay promotes the gesture, if a delay is set.
        deadline: Option<Instant>,
    },
    Dragging,
}

/// Adapter turning raw input events for one draggable item into coordinator
/// commands. One instance per interactive item.
pub struct DraggableController<K, P> {
    id: InteractionId,
    kind: K,
    payload: P,
    activation: ActivationConstraint,
    region: Option<RegionProvider>,
    disabled: bool,
    keyboard_step: f32,
    state: ActivationState,
    /// The touch contact that initiated the gesture. Other contacts are
    /// ignored: simultaneous multi-pointer drags are unsupported.
    active_touch: Option<TouchId>,
}

impl<K, P> DraggableController<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
    P: Clone,
{
    /// Create a controller for an item. The payload is cloned into the
    /// coordinator on each activation.
    pub fn new(id: impl Into<InteractionId>, kind: K, payload: P) -> Self {
        Self {
            id: id.into(),
            kind,
            payload,
            activation: ActivationConstraint::immediate(),
            region: None,
            disabled: false,
            keyboard_step: DEFAULT_KEYBOARD_STEP,
            state: ActivationState::Idle,
            active_touch: None,
        }
    }

    /// Set the activation constraint. Immutable after construction.
    pub fn activation(mut self, constraint: ActivationConstraint) -> Self {
        self.activation = constraint;
        self
    }

    /// Set the provider for the item's own bounding region, used for grab
    /// offsets and keyboard activation geometry.
    pub fn region(mut self, provider: impl Fn() -> Option<Rect> + 'static) -> Self {
        self.region = Some(Box::new(provider));
        self
    }

    /// Disable the controller. Disabled items never start drags.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the arrow-key movement step for keyboard drags.
    pub fn keyboard_step(mut self, step: f32) -> Self {
        self.keyboard_step = step;
        self
    }

    /// The item's id.
    pub fn id(&self) -> InteractionId {
        self.id
    }

    /// Whether a pick-up gesture is waiting on activation constraints.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ActivationState::Pending { .. })
    }

    /// Whether this controller's item is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ActivationState::Dragging)
    }

    /// Phase as seen from this controller, including the `Pending` stage
    /// the coordinator itself never enters.
    pub fn phase(&self) -> DragPhase {
        match self.state {
            ActivationState::Idle => DragPhase::Idle,
            ActivationState::Pending { .. } => DragPhase::Pending,
            ActivationState::Dragging => DragPhase::Dragging,
        }
    }

    /// Which global event streams the host must have attached right now.
    pub fn listeners(&self) -> Listeners {
        match self.state {
            ActivationState::Idle => Listeners::empty(),
            ActivationState::Pending { .. } => Listeners::MOVE | Listeners::RELEASE,
            ActivationState::Dragging => Listeners::all(),
        }
    }

    /// Accessibility summary for the host's widget attributes.
    pub fn accessibility(&self) -> AccessibilityAttrs {
        AccessibilityAttrs {
            role: "button",
            grabbed: self.is_dragging(),
            disabled: self.disabled,
        }
    }

    /// Pointer press on the element. Only the primary button picks up.
    pub fn on_pointer_down(
        &mut self,
        coordinator: &mut DragCoordinator<K, P>,
        button: PointerButton,
        position: Vec2,
        now: Instant,
    ) {
        if button != PointerButton::Primary {
            return;
        }
        self.begin(coordinator, position, now);
    }

    /// Pointer movement while this controller is pending or dragging.
    pub fn on_pointer_move(
        &mut self,
        coordinator: &mut DragCoordinator<K, P>,
        position: Vec2,
        now: Instant,
    ) {
        self.track(coordinator, position, now);
    }

    /// Pointer release. Commits the drop (two-phase: evaluate, then
    /// finalize) before the coordinator state is reset, but only if this
    /// controller owns the active drag.
    pub fn on_pointer_up(
        &mut self,
        coordinator: &mut DragCoordinator<K, P>,
        position: Vec2,
        now: Instant,
    ) {
        self.release(coordinator, position, now);
    }

    /// Touch press on the element. The first contact wins; later contacts
    /// are ignored for the rest of the gesture.
    pub fn on_touch_start(
        &mut self,
        coordinator: &mut DragCoordinator<K, P>,
        touch: TouchId,
        position: Vec2,
        now: Instant,
    ) {
        if self.active_touch.is_some() || !matches!(self.state, ActivationState::Idle) {
            return;
        }
        self.begin(coordinator, position, now);
        // Claim the contact only if the press actually started a gesture;
        // a declined press must not own the release path.
        if !matches!(self.state, ActivationState::Idle) {
            self.active_touch = Some(touch);
        }
    }

    /// Movement of a touch contact.
    pub fn on_touch_move(
        &mut self,
        coordinator: &mut DragCoordinator<K, P>,
        touch: TouchId,
        position: Vec2,
        now: Instant,
    ) {
        if self.active_touch != Some(touch) {
            return;
        }
        self.track(coordinator, position, now);
    }

    /// End of a touch contact. Same release path as the pointer.
    pub fn on_touch_end(
        &mut self,
        coordinator: &mut DragCoordinator<K, P>,
        touch: TouchId,
        position: Vec2,
        now: Instant,
    ) {
        if self.active_touch != Some(touch) {
            return;
        }
        self.active_touch = None;
        self.release(coordinator, position, now);
    }

    /// Host-initiated cancellation of a touch contact (system gesture,
    /// palm rejection). Cancels rather than commits.
    pub fn on_touch_cancel(&mut self, coordinator: &mut DragCoordinator<K, P>, touch: TouchId) {
        if self.active_touch != Some(touch) {
            return;
        }
        self.active_touch = None;
        self.abort(coordinator);
    }

    /// Key press routed to this controller.
    ///
    /// The activation key starts a keyboard drag from the element center
    /// (no activation constraints apply) or, if this controller already owns
    /// the drag, commits it. Arrow keys nudge the synthetic pointer. Escape
    /// cancels unconditionally.
    pub fn on_key_down(&mut self, coordinator: &mut DragCoordinator<K, P>, key: Key) {
        match key {
            Key::Escape => self.abort(coordinator),
            key if key.is_activation() => {
                if self.owns(coordinator) {
                    let intent = coordinator.evaluate_drop();
                    coordinator.finalize(intent);
                    self.state = ActivationState::Idle;
                } else if matches!(self.state, ActivationState::Idle)
                    && !self.disabled
                    && !coordinator.is_dragging()
                    && let Some(rect) = self.region_now()
                {
                    // Keyboard drags start immediately from the element
                    // center with half-extent grab offset.
                    self.activate(coordinator, rect.center(), rect.size() / 2.0);
                }
            }
            key => {
                if let Some(direction) = key.arrow_direction()
                    && self.owns(coordinator)
                    && let Some(op) = coordinator.operation()
                {
                    let next = op.pointer_position + direction * self.keyboard_step;
                    coordinator.update_drag(next);
                }
            }
        }
    }

    /// Promote a pending delay whose deadline has passed. Hosts with a
    /// frame loop call this once per frame; it is also applied at the head
    /// of every move/release event.
    pub fn poll(&mut self, coordinator: &mut DragCoordinator<K, P>, now: Instant) {
        if let ActivationState::Pending {
            origin,
            grab_offset,
            deadline: Some(deadline),
        } = self.state
            && now >= deadline
        {
            tracing::trace!(item = %self.id, "delay elapsed, promoting pending drag");
            self.activate(coordinator, origin, grab_offset);
        }
    }

    /// Teardown. Cancels any pending gesture and, if this controller owns
    /// the active drag, cancels it in the coordinator. Must be called when
    /// the item is unmounted mid-gesture so the coordinator is never left
    /// dragging with no owner.
    pub fn cancel(&mut self, coordinator: &mut DragCoordinator<K, P>) {
        self.abort(coordinator);
    }

    fn begin(&mut self, coordinator: &mut DragCoordinator<K, P>, position: Vec2, now: Instant) {
        if self.disabled
            || !matches!(self.state, ActivationState::Idle)
            || coordinator.is_dragging()
        {
            return;
        }
        let grab_offset = self
            .region_now()
            .map_or(Vec2::ZERO, |rect| position - rect.origin());
        if self.activation.is_immediate() {
            self.activate(coordinator, position, grab_offset);
        } else {
            let deadline = self.activation.delay.map(|delay| now + delay);
            tracing::trace!(item = %self.id, ?position, "gesture pending");
            self.state = ActivationState::Pending {
                origin: position,
                grab_offset,
                deadline,
            };
        }
    }

    fn track(&mut self, coordinator: &mut DragCoordinator<K, P>, position: Vec2, now: Instant) {
        self.poll(coordinator, now);
        match self.state {
            ActivationState::Dragging => {
                if self.owns(coordinator) {
                    coordinator.update_drag(position);
                } else {
                    // The coordinator was reset underneath us; resynchronize.
                    self.state = ActivationState::Idle;
                }
            }
            ActivationState::Pending {
                origin,
                grab_offset,
                deadline,
            } => {
                let travelled = geometry::distance(origin, position);
                if deadline.is_some() && travelled > self.activation.tolerance {
                    // Drift beyond tolerance while a delay is armed aborts
                    // the gesture outright.
                    tracing::trace!(item = %self.id, travelled, "tolerance exceeded, gesture aborted");
                    self.state = ActivationState::Idle;
                } else if self.activation.distance > 0.0 && travelled >= self.activation.distance {
                    // Distance activation promotes immediately; it never
                    // waits for an armed timer. The pick-up point is the
                    // initial position, the triggering position follows as
                    // the first update.
                    self.activate(coordinator, origin, grab_offset);
                    if self.owns(coordinator) {
                        coordinator.update_drag(position);
                    }
                }
            }
            ActivationState::Idle => {}
        }
    }

    fn release(&mut self, coordinator: &mut DragCoordinator<K, P>, position: Vec2, now: Instant) {
        self.poll(coordinator, now);
        match self.state {
            ActivationState::Dragging => {
                if self.owns(coordinator) {
                    coordinator.update_drag(position);
                    // Drop evaluation reads the operation before finalize
                    // clears it.
                    let intent = coordinator.evaluate_drop();
                    coordinator.finalize(intent);
                }
                self.state = ActivationState::Idle;
            }
            // Released before any constraint was satisfied: aborted gesture.
            ActivationState::Pending { .. } => self.state = ActivationState::Idle,
            ActivationState::Idle => {}
        }
    }

    fn abort(&mut self, coordinator: &mut DragCoordinator<K, P>) {
        if self.owns(coordinator) {
            coordinator.cancel_drag();
        }
        self.active_touch = None;
        self.state = ActivationState::Idle;
    }

    fn activate(&mut self, coordinator: &mut DragCoordinator<K, P>, position: Vec2, grab_offset: Vec2) {
        let data = DragData {
            item: self.id,
            kind: self.kind,
            payload: self.payload.clone(),
        };
        if coordinator.start_drag(data, position, grab_offset) {
            self.state = ActivationState::Dragging;
        } else {
            self.state = ActivationState::Idle;
        }
    }

    fn owns(&self, coordinator: &DragCoordinator<K, P>) -> bool {
        matches!(self.state, ActivationState::Dragging)
            && coordinator.active_item() == Some(self.id)
    }

    fn region_now(&self) -> Option<Rect> {
        self.region.as_ref().and_then(|provider| provider())
    }
}

impl<K, P> fmt::Debug for DraggableController<K, P>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableController")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("phase", &match self.state {
                ActivationState::Idle => "idle",
                ActivationState::Pending { .. } => "pending",
                ActivationState::Dragging => "dragging",
            })
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
