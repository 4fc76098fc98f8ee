//! Atomically republished shared values
//!
//! Readers take a snapshot (`Arc` clone under a short read lock) and then
//! work without holding any lock. Writers build the replacement value off to
//! the side and swap it in with one write. A reader therefore sees either the
//! old table or the new one, never a half-cleared one.

use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
pub struct Published<T> {
    current: RwLock<Arc<T>>,
}

impl<T> Published<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(value)),
        }
    }

    /// Snapshot of the current value
    pub fn load(&self) -> Arc<T> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current value, returning the previous one
    pub fn publish(&self, value: T) -> Arc<T> {
        let next = Arc::new(value);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Build a new value from the current one and publish it
    ///
    /// The write lock is held for the whole update so concurrent updates
    /// cannot lose each other's changes.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let mut guard = self.current.write();
        let next = f(&guard);
        *guard = Arc::new(next);
    }
}

impl<T: Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
