//! Drop target registration and per-target hit evaluation.
//!
//! A [`DropTarget`] bundles everything the coordinator needs to decide
//! whether the active drag is over a target and whether a release commits:
//! a region provider (queried on demand, since regions move between frames),
//! the accepted kind set, an optional semantic predicate over the payload,
//! and the enter/over/leave/drop callbacks. Edge-triggering is tracked with
//! a previous-state flag owned by the registration.

use std::hash::Hash;

use dragkit_core::alloc::HashSet;
use dragkit_core::geometry::Rect;
use dragkit_core::math::Vec2;

use crate::id::InteractionId;

/// Callback that reports a target's current bounding region.
///
/// Returning `None` means the element is detached or not yet laid out; the
/// target is then treated as never-hovered until the provider recovers.
pub type RegionProvider = Box<dyn Fn() -> Option<Rect>>;

/// A registered drop target.
///
/// Built with the consuming setter style and handed to
/// [`DragCoordinator::register_target`](crate::DragCoordinator::register_target),
/// which owns it until unregistration.
pub struct DropTarget<K, P> {
    pub(crate) id: InteractionId,
    pub(crate) region: Option<RegionProvider>,
    pub(crate) accepts: HashSet<K>,
    pub(crate) disabled: bool,
    pub(crate) can_drop: Option<Box<dyn Fn(&P) -> bool>>,
    pub(crate) on_drop: Option<Box<dyn FnMut(&P, Vec2)>>,
    pub(crate) on_drag_enter: Option<Box<dyn FnMut(&P)>>,
    pub(crate) on_drag_over: Option<Box<dyn FnMut(&P, Vec2)>>,
    pub(crate) on_drag_leave: Option<Box<dyn FnMut()>>,
    /// Edge-trigger state: whether the drag was over this target at the
    /// previous evaluation.
    pub(crate) was_over: bool,
}

impl<K, P> DropTarget<K, P>
where
    K: Copy + Eq + Hash,
{
    /// Create a drop target with the given id. Accepts nothing until kinds
    /// are added.
    pub fn new(id: impl Into<InteractionId>) -> Self {
        Self {
            id: id.into(),
            region: None,
            accepts: HashSet::new(),
            disabled: false,
            can_drop: None,
            on_drop: None,
            on_drag_enter: None,
            on_drag_over: None,
            on_drag_leave: None,
            was_over: false,
        }
    }

    /// Set the region provider.
    pub fn region(mut self, provider: impl Fn() -> Option<Rect> + 'static) -> Self {
        self.region = Some(Box::new(provider));
        self
    }

    /// Set a fixed bounding region.
    pub fn fixed_region(self, rect: Rect) -> Self {
        self.region(move || Some(rect))
    }

    /// Add an accepted kind.
    pub fn accepts(mut self, kind: K) -> Self {
        self.accepts.insert(kind);
        self
    }

    /// Add several accepted kinds.
    pub fn accepts_all(mut self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.accepts.extend(kinds);
        self
    }

    /// Disable or enable the target.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the semantic acceptance predicate, evaluated only when kind and
    /// geometry already match.
    pub fn can_drop(mut self, predicate: impl Fn(&P) -> bool + 'static) -> Self {
        self.can_drop = Some(Box::new(predicate));
        self
    }

    /// Set the drop callback, invoked with the payload and final position
    /// when a release commits on this target.
    pub fn on_drop(mut self, callback: impl FnMut(&P, Vec2) + 'static) -> Self {
        self.on_drop = Some(Box::new(callback));
        self
    }

    /// Set the enter callback, fired once per not-over to over transition.
    pub fn on_drag_enter(mut self, callback: impl FnMut(&P) + 'static) -> Self {
        self.on_drag_enter = Some(Box::new(callback));
        self
    }

    /// Set the over callback, fired on every update while continuously over.
    pub fn on_drag_over(mut self, callback: impl FnMut(&P, Vec2) + 'static) -> Self {
        self.on_drag_over = Some(Box::new(callback));
        self
    }

    /// Set the leave callback, fired once per over to not-over transition
    /// (including synthetic transitions on drag end or unregistration).
    pub fn on_drag_leave(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_drag_leave = Some(Box::new(callback));
        self
    }

    /// The target's id.
    pub fn id(&self) -> InteractionId {
        self.id
    }

    /// Query the current bounding region.
    pub(crate) fn region_now(&self) -> Option<Rect> {
        self.region.as_ref().and_then(|provider| provider())
    }

    /// Kind acceptance and enablement, independent of geometry.
    pub(crate) fn accepts_kind(&self, kind: &K) -> bool {
        !self.disabled && self.accepts.contains(kind)
    }

    /// Whether the active drag at `pointer` is over this target: kind
    /// accepted, enabled, and pointer inside the current region. Missing
    /// geometry degrades to "not over".
    pub(crate) fn is_candidate(&self, kind: &K, pointer: Vec2) -> bool {
        self.accepts_kind(kind)
            && self
                .region_now()
                .is_some_and(|rect| rect.contains(pointer))
    }

    /// Semantic acceptance of the payload. True when no predicate is set.
    pub(crate) fn allows(&self, payload: &P) -> bool {
        self.can_drop.as_ref().is_none_or(|predicate| predicate(payload))
    }

    pub(crate) fn fire_enter(&mut self, payload: &P) {
        if let Some(callback) = self.on_drag_enter.as_mut() {
            callback(payload);
        }
    }

    pub(crate) fn fire_over(&mut self, payload: &P, position: Vec2) {
        if let Some(callback) = self.on_drag_over.as_mut() {
            callback(payload, position);
        }
    }

    pub(crate) fn fire_leave(&mut self) {
        if let Some(callback) = self.on_drag_leave.as_mut() {
            callback();
        }
    }

    pub(crate) fn fire_drop(&mut self, payload: &P, position: Vec2) {
        if let Some(callback) = self.on_drop.as_mut() {
            callback(payload, position);
        }
    }
}

impl<K, P> std::fmt::Debug for DropTarget<K, P>
where
    K: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropTarget")
            .field("id", &self.id)
            .field("accepts", &self.accepts)
            .field("disabled", &self.disabled)
            .field("was_over", &self.was_over)
            .finish_non_exhaustive()
    }
}

/// Snapshot of a target's interaction state, for host rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetState {
    /// The active drag is kind-accepted and geometrically over the target.
    pub is_over: bool,
    /// `is_over` and the semantic predicate also accepts the payload.
    pub can_drop: bool,
    /// The target is disabled.
    pub disabled: bool,
}
