//! Shared coordinator handles for hosts that wire controllers through a
//! context object instead of threading `&mut DragCoordinator` explicitly.
//!
//! [`DragContext`] owns the coordinator behind `Rc<RefCell<..>>` and hands
//! out weak [`DragHandle`]s. Using a handle after the context is gone is a
//! wiring error and fails loudly with
//! [`DragError::CoordinatorUnavailable`](crate::DragError::CoordinatorUnavailable).

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use crate::coordinator::DragCoordinator;
use crate::error::{DragError, DragResult};

/// Owning handle to a shared coordinator.
pub struct DragContext<K, P> {
    inner: Rc<RefCell<DragCoordinator<K, P>>>,
}

impl<K, P> DragContext<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Create a context with a fresh coordinator.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DragCoordinator::new())),
        }
    }

    /// Run a closure with exclusive access to the coordinator.
    pub fn with<R>(&self, f: impl FnOnce(&mut DragCoordinator<K, P>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    /// Create a weak handle for a controller or widget to hold.
    pub fn handle(&self) -> DragHandle<K, P> {
        DragHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<K, P> Default for DragContext<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> Clone for DragContext<K, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Weak handle to a coordinator owned by a [`DragContext`].
pub struct DragHandle<K, P> {
    inner: Weak<RefCell<DragCoordinator<K, P>>>,
}

impl<K, P> DragHandle<K, P>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Run a closure with exclusive access to the coordinator.
    ///
    /// Errors with `CoordinatorUnavailable` when the owning context has been
    /// dropped: the hook is being used outside any coordinator scope.
    pub fn with<R>(&self, f: impl FnOnce(&mut DragCoordinator<K, P>) -> R) -> DragResult<R> {
        let inner = self
            .inner
            .upgrade()
            .ok_or(DragError::CoordinatorUnavailable)?;
        let result = f(&mut inner.borrow_mut());
        Ok(result)
    }

    /// Whether the owning context still exists.
    pub fn is_attached(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl<K, P> Clone for DragHandle<K, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
