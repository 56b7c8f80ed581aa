//! Sharing a [`SegTree2d`] between threads
//!
//! The structure itself is not synchronized: even queries mutate node state
//! when they push pending column updates down. [`SharedSegTree2d`] therefore
//! serializes *every* operation through a single [`Mutex`].

use std::ops::RangeBounds;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{SegTree2d, Value};

/// Reference counted, mutex protected [`SegTree2d`]
///
/// Cloning a `SharedSegTree2d` yields another handle to the same grid.
#[derive(Debug)]
pub struct SharedSegTree2d<V = i64>(Arc<Mutex<SegTree2d<V>>>);

impl<V> Clone for SharedSegTree2d<V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V> From<SegTree2d<V>> for SharedSegTree2d<V> {
    fn from(tree: SegTree2d<V>) -> Self {
        Self(Arc::new(Mutex::new(tree)))
    }
}

impl<V: Value> SharedSegTree2d<V> {
    /// See [`SegTree2d::range_add()`]
    ///
    /// Locking behavior: acquires the grid's lock.
    pub fn range_add(
        &self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
        delta: V,
    ) {
        self.0.lock().range_add(rows, cols, delta)
    }

    /// See [`SegTree2d::range_sum()`]
    ///
    /// Locking behavior: acquires the grid's lock (queries write, too).
    pub fn range_sum(&self, rows: impl RangeBounds<usize>, cols: impl RangeBounds<usize>) -> V {
        self.0.lock().range_sum(rows, cols)
    }

    /// See [`SegTree2d::point_add()`]
    ///
    /// Locking behavior: acquires the grid's lock.
    pub fn point_add(&self, x: usize, y: usize, delta: V) {
        self.0.lock().point_add(x, y, delta)
    }

    /// See [`SegTree2d::point_get()`]
    ///
    /// Locking behavior: acquires the grid's lock.
    pub fn point_get(&self, x: usize, y: usize) -> V {
        self.0.lock().point_get(x, y)
    }
}

impl<V> SharedSegTree2d<V> {
    /// Run `f` with exclusive access to the grid, e.g. to perform several
    /// operations atomically
    ///
    /// Locking behavior: acquires the grid's lock for the duration of `f`.
    pub fn with_tree<T>(&self, f: impl FnOnce(&mut SegTree2d<V>) -> T) -> T {
        f(&mut self.0.lock())
    }

    /// Get the grid back if this is the only handle to it
    pub fn into_inner(self) -> Result<SegTree2d<V>, Self> {
        match Arc::try_unwrap(self.0) {
            Ok(mutex) => Ok(mutex.into_inner()),
            Err(arc) => Err(Self(arc)),
        }
    }
}
