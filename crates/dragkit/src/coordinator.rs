//! The drag coordinator: single authoritative state machine for the active
//! drag operation and the drop-target registry.
//!
//! All shared mutable state lives here. Draggable controllers issue commands
//! (`start_drag`, `update_drag`, release protocol), drop targets and overlay
//! renderers read the operation via [`DragCoordinator::operation`] or
//! subscribe to [`DragEvent`] notifications. Mutual exclusion is structural:
//! a second `start_drag` while one is active is a logged no-op.
//!
//! Release handling is an explicit two-phase protocol so the commit check
//! always observes the operation as it existed at release:
//! [`DragCoordinator::evaluate_drop`] reads the live state and produces an
//! intent, then [`DragCoordinator::finalize`] fires the winning drop
//! callback and resets to idle in one step. Nothing relies on listener
//! registration order.

use std::fmt;
use std::hash::Hash;

use dragkit_core::alloc::RandomState;
use dragkit_core::math::Vec2;
use indexmap::IndexMap;

use crate::event::{DragEvent, SubscriberId};
use crate::id::InteractionId;
use crate::target::{DropTarget, TargetState};
use crate::types::{DragData, DragOperation, DragPhase};

type Subscriber<K> = Box<dyn FnMut(&DragEvent<K>)>;

/// A commit decision produced by [`DragCoordinator::evaluate_drop`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropIntent {
    /// The target receiving the drop.
    pub target: InteractionId,
    /// Pointer position at release.
    pub position: Vec2,
}

/// Coordinator owning the current drag operation and the target registry.
///
/// One instance per interaction surface. Injected into controllers rather
/// than held globally, so isolated coordinators can coexist (test harnesses,
/// independent windows).
pub struct DragCoordinator<K, P> {
    /// The active operation; `None` is the idle phase.
    operation: Option<DragOperation<K, P>>,
    /// Registered drop targets, in registration order. First matching
    /// candidate wins hover ties.
    targets: IndexMap<InteractionId, DropTarget<K, P>, RandomState>,
    subscribers: Vec<(SubscriberId, Subscriber<K>)>,
    next_subscriber: u64,
}

impl<K, P> Default for DragCoordinator<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> DragCoordinator<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an idle coordinator with an empty registry.
    pub fn new() -> Self {
        Self {
            operation: None,
            targets: IndexMap::default(),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Current phase. `Idle` when no operation exists.
    pub fn phase(&self) -> DragPhase {
        self.operation
            .as_ref()
            .map_or(DragPhase::Idle, |op| op.phase)
    }

    /// Whether a drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase(), DragPhase::Dragging)
    }

    /// Read-only view of the active operation.
    pub fn operation(&self) -> Option<&DragOperation<K, P>> {
        self.operation.as_ref()
    }

    /// Id of the item being dragged, if any.
    pub fn active_item(&self) -> Option<InteractionId> {
        self.operation.as_ref().map(|op| op.item)
    }

    /// The target currently under the pointer, if any.
    pub fn hovered_target(&self) -> Option<InteractionId> {
        self.operation.as_ref().and_then(|op| op.hovered_target)
    }

    /// The payload of the active drag, if any.
    pub fn payload(&self) -> Option<&P> {
        self.operation.as_ref().map(|op| &op.payload)
    }

    /// Subscribe to drag lifecycle notifications.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&DragEvent<K>) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Idempotent.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Register a drop target. Re-registering an id replaces the prior
    /// entry (last write wins) and carries its edge-trigger state so a
    /// region-provider refresh does not fire a spurious leave/enter pair.
    pub fn register_target(&mut self, mut target: DropTarget<K, P>) {
        if let Some(previous) = self.targets.get(&target.id) {
            target.was_over = previous.was_over;
        }
        tracing::trace!(id = %target.id, "register drop target");
        self.targets.insert(target.id, target);
        self.refresh_targets();
    }

    /// Unregister a drop target. Idempotent. If the target was hovered it
    /// receives a synthetic leave and can never receive a later drop;
    /// unrelated targets are not disturbed.
    pub fn unregister_target(&mut self, id: impl Into<InteractionId>) {
        let id = id.into();
        let Some(mut target) = self.targets.shift_remove(&id) else {
            return;
        };
        tracing::trace!(id = %id, "unregister drop target");
        if target.was_over {
            target.fire_leave();
        }
        self.refresh_targets();
    }

    /// Enable or disable a registered target. Disabling a hovered target
    /// fires its synthetic leave on the same call.
    pub fn set_target_disabled(&mut self, id: impl Into<InteractionId>, disabled: bool) {
        let id = id.into();
        let Some(target) = self.targets.get_mut(&id) else {
            return;
        };
        if target.disabled == disabled {
            return;
        }
        target.disabled = disabled;
        self.refresh_targets();
    }

    /// Interaction snapshot for a registered target.
    pub fn target_state(&self, id: impl Into<InteractionId>) -> Option<TargetState> {
        let target = self.targets.get(&id.into())?;
        let (is_over, can_drop) = match self.operation.as_ref() {
            Some(op) if op.phase == DragPhase::Dragging => {
                let over = target.is_candidate(&op.kind, op.pointer_position);
                (over, over && target.allows(&op.payload))
            }
            _ => (false, false),
        };
        Some(TargetState {
            is_over,
            can_drop,
            disabled: target.disabled,
        })
    }

    /// Number of registered targets.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Begin a drag. Rejected (logged, `false`) while another drag is
    /// active; the engine never supports concurrent drags.
    pub fn start_drag(&mut self, data: DragData<K, P>, position: Vec2, grab_offset: Vec2) -> bool {
        if self.operation.is_some() {
            tracing::warn!(item = %data.item, "start_drag ignored: a drag is already active");
            return false;
        }
        tracing::debug!(item = %data.item, kind = ?data.kind, ?position, "drag started");
        self.operation = Some(DragOperation {
            phase: DragPhase::Dragging,
            item: data.item,
            kind: data.kind,
            payload: data.payload,
            pointer_position: position,
            initial_position: position,
            grab_offset,
            hovered_target: None,
        });
        self.emit(DragEvent::Started {
            item: data.item,
            kind: data.kind,
            position,
        });
        self.refresh_targets();
        true
    }

    /// Track pointer movement. No-op unless dragging; repeated calls with
    /// an unchanged position produce zero notifications.
    pub fn update_drag(&mut self, position: Vec2) -> bool {
        let Some(op) = self.operation.as_mut() else {
            return false;
        };
        if op.phase != DragPhase::Dragging {
            return false;
        }
        if op.pointer_position == position {
            return true;
        }
        op.pointer_position = position;
        let delta = op.delta();
        self.emit(DragEvent::Moved { position, delta });
        self.refresh_targets();
        true
    }

    /// Update the hovered-target bookkeeping. No-op if unchanged, which
    /// prevents redundant notifications.
    pub fn set_hovered_target(&mut self, target: Option<InteractionId>) {
        let Some(op) = self.operation.as_mut() else {
            return;
        };
        if op.hovered_target == target {
            return;
        }
        op.hovered_target = target;
        self.emit(DragEvent::HoverChanged { target });
    }

    /// Phase one of the release protocol: decide whether the release
    /// commits, reading the operation as it exists right now.
    ///
    /// Commits require the hovered target to still be kind-accepted,
    /// geometrically under the pointer, and semantically accepting at this
    /// moment. A target hovered earlier in the gesture but not at release
    /// never commits.
    pub fn evaluate_drop(&self) -> Option<DropIntent> {
        let op = self.operation.as_ref()?;
        if op.phase != DragPhase::Dragging {
            return None;
        }
        let hovered = op.hovered_target?;
        let target = self.targets.get(&hovered)?;
        if !target.is_candidate(&op.kind, op.pointer_position) {
            return None;
        }
        if !target.allows(&op.payload) {
            return None;
        }
        Some(DropIntent {
            target: hovered,
            position: op.pointer_position,
        })
    }

    /// Phase two of the release protocol: move the operation to `Dropping`,
    /// fire the winning drop callback (if any), emit the end notification,
    /// and reset to idle.
    ///
    /// Silently ignored when no drag is active.
    pub fn finalize(&mut self, intent: Option<DropIntent>) {
        if let Some(op) = self.operation.as_mut() {
            op.phase = DragPhase::Dropping;
        } else {
            return;
        }
        if let Some(intent) = intent
            && let Some(op) = self.operation.as_ref()
            && let Some(target) = self.targets.get_mut(&intent.target)
        {
            tracing::debug!(item = %op.item, target = %intent.target, "drop committed");
            target.fire_drop(&op.payload, intent.position);
        }
        let Some(op) = self.operation.take() else {
            return;
        };
        self.leave_all();
        tracing::debug!(item = %op.item, "drag ended");
        self.emit(DragEvent::Ended {
            cancelled: false,
            drop_zone: op.hovered_target,
            position: op.pointer_position,
        });
    }

    /// End the active drag without committing a drop. The end notification
    /// still carries the hovered target id. No-op when idle.
    pub fn end_drag(&mut self) {
        self.finalize(None);
    }

    /// Cancel the active drag. Bypasses the commit path entirely: no drop
    /// callback fires, the end notification carries `cancelled = true` and
    /// no drop zone. No-op when idle.
    pub fn cancel_drag(&mut self) {
        let Some(op) = self.operation.take() else {
            return;
        };
        self.leave_all();
        tracing::debug!(item = %op.item, "drag cancelled");
        self.emit(DragEvent::Ended {
            cancelled: true,
            drop_zone: None,
            position: op.pointer_position,
        });
    }

    /// Re-evaluate every target against the active operation, firing
    /// edge-triggered enter/over/leave callbacks and updating the hovered
    /// target. The first candidate in registration order wins ties.
    fn refresh_targets(&mut self) {
        let Some(op) = self.operation.as_ref() else {
            return;
        };
        if op.phase != DragPhase::Dragging {
            return;
        }
        let kind = op.kind;
        let pointer = op.pointer_position;
        let payload = &op.payload;

        let mut hovered = None;
        for (id, target) in self.targets.iter_mut() {
            let over = target.is_candidate(&kind, pointer);
            if over && hovered.is_none() {
                hovered = Some(*id);
            }
            if over && !target.was_over {
                target.was_over = true;
                target.fire_enter(payload);
            } else if over {
                target.fire_over(payload, pointer);
            } else if target.was_over {
                target.was_over = false;
                target.fire_leave();
            }
        }
        self.set_hovered_target(hovered);
    }

    /// Synthetic leave for every target still marked over. Used when the
    /// operation ends for any reason.
    fn leave_all(&mut self) {
        for (_, target) in self.targets.iter_mut() {
            if target.was_over {
                target.was_over = false;
                target.fire_leave();
            }
        }
    }

    fn emit(&mut self, event: DragEvent<K>) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }
}

impl<K, P> fmt::Debug for DragCoordinator<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCoordinator")
            .field("operation", &self.operation)
            .field("targets", &self.targets.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
