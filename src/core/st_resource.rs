use std::{
    rc::{Rc, Weak},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` provides interior mutability for a value of type `T` in a single-threaded context.
/// It uses `Rc<RwLock<T>>` internally to manage the resource. The world hands these out for its
/// chunks: the world keeps the only strong handle it intends to keep, while chunks point at their
/// neighbours through [`WeakStResource`] so that no chunk ever owns another.
///
/// # Type Parameters
/// - `T`: The type of the contained resource
///
/// # Examples
///
/// ```
/// use voxel_world::core::StResource;
///
/// let counter = StResource::new(0);
/// *counter.get_mut() += 1;
/// assert_eq!(*counter.get(), 1);
///
/// let weak = counter.downgrade();
/// assert!(weak.upgrade().is_some());
/// drop(counter);
/// assert!(weak.upgrade().is_none());
/// ```
///
/// # Locking
/// - Taking a write guard while any guard on the same resource is alive in the same thread
///   will deadlock, so guards should be short-lived
/// - A poisoned lock is recovered rather than propagated; the data is plain block storage and
///   stays usable after a panic elsewhere
pub struct StResource<T> {
    /// The shared, lockable value.
    pub resource: Rc<RwLock<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RwLock::new(resource)),
        }
    }

    /// Returns a read-only guard that allows reading the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a non-owning handle to the same resource.
    pub fn downgrade(&self) -> WeakStResource<T> {
        WeakStResource {
            resource: Rc::downgrade(&self.resource),
        }
    }

    /// Returns `true` if both handles point at the same resource.
    pub fn ptr_eq(&self, other: &StResource<T>) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }
}

impl<T> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T> PartialEq for StResource<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> std::fmt::Debug for StResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StResource")
            .field("ptr", &Rc::as_ptr(&self.resource))
            .finish()
    }
}

/// A non-owning handle to an [`StResource`].
///
/// Upgrading fails once every strong handle has been dropped, so a stale link can be
/// detected instead of dereferenced.
pub struct WeakStResource<T> {
    resource: Weak<RwLock<T>>,
}

impl<T> WeakStResource<T> {
    /// Attempts to recover a strong handle.
    pub fn upgrade(&self) -> Option<StResource<T>> {
        self.resource
            .upgrade()
            .map(|resource| StResource { resource })
    }

    /// Returns `true` if this handle refers to `strong`.
    pub fn points_to(&self, strong: &StResource<T>) -> bool {
        std::ptr::eq(self.resource.as_ptr(), Rc::as_ptr(&strong.resource))
    }
}

impl<T> Clone for WeakStResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T> std::fmt::Debug for WeakStResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakStResource")
            .field("ptr", &self.resource.as_ptr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let resource = StResource::new(vec![1, 2, 3]);
        let clone = resource.clone();
        clone.get_mut().push(4);
        assert_eq!(resource.get().len(), 4);
        assert!(resource.ptr_eq(&clone));
    }

    #[test]
    fn weak_handle_does_not_keep_value_alive() {
        let resource = StResource::new(7u32);
        let weak = resource.downgrade();
        assert!(weak.points_to(&resource));
        let strong = weak.upgrade().expect("resource is still alive");
        assert_eq!(*strong.get(), 7);

        drop(strong);
        drop(resource);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn distinct_resources_are_not_equal() {
        let a = StResource::new(1);
        let b = StResource::new(1);
        assert!(a != b);
        assert!(!a.downgrade().points_to(&b));
    }
}
