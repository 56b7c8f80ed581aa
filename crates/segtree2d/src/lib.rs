//! Two-dimensional range-add / range-sum segment tree
//!
//! [`SegTree2d`] represents an H×W grid of integers. It adds a delta to every
//! cell of an axis-aligned rectangle and sums up every cell of an axis-aligned
//! rectangle, both in O(log H · log W). All arithmetic is exact: aggregates
//! are only ever corrected by multiplying a delta with an exact cell count,
//! never by dividing a total.
//!
//! Internally, a segment tree over the rows owns, in each of its nodes, lazy
//! segment trees over the columns ([`InnerTree`]). Updates and queries
//! decompose the row range into canonical nodes and delegate to their column
//! trees.
//!
//! ```
//! use segtree2d::SegTree2d;
//!
//! let mut grid = SegTree2d::<i64>::new(4, 4).unwrap();
//! grid.range_add(0..=1, 0..=1, 5);
//! grid.range_add(1..=2, 1..=2, 3);
//! assert_eq!(grid.point_get(1, 1), 8);
//! assert_eq!(grid.range_sum(.., ..), 32);
//! // out-of-range coordinates are clamped
//! assert_eq!(grid.range_sum(2.., 2..100), 3);
//! ```
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::fmt;
use std::ops::RangeBounds;

pub use segtree2d_core::{InvalidDimension, Overlap, Span, Value};

#[cfg(feature = "bigint")]
pub use num_bigint::BigInt;

mod inner;
mod outer;
mod query;
mod update;

#[cfg(feature = "sync")]
pub mod sync;

pub use inner::InnerTree;

use outer::OuterTree;

/// Grid of `V` values supporting rectangle additions and rectangle sums
///
/// Coordinates are `(row, column)` pairs, rows are often called `x` and
/// columns `y`. Ranges passed to the methods below are clamped to the grid,
/// empty (or inverted) ranges turn additions into no-ops and sums into zero.
///
/// Queries take `&mut self` because they push pending column updates down the
/// trees. To share a `SegTree2d` between threads, wrap the whole structure
/// into a lock (see [`SharedSegTree2d`][sync::SharedSegTree2d]).
#[derive(Clone)]
pub struct SegTree2d<V = i64> {
    tree: OuterTree<V>,
}

impl<V: Value> SegTree2d<V> {
    /// Build the structure from an initial grid of rows
    ///
    /// Fails if the grid has no rows, no columns, or rows of different
    /// lengths. Runs in O(H·W) time, the structure needs O(H·W) space.
    pub fn build<R: AsRef<[V]>>(grid: &[R]) -> Result<Self, InvalidDimension> {
        let (height, width) = segtree2d_core::error::check_dimensions(grid)?;
        let tree = OuterTree::build(grid, width);
        log::debug!(
            "built {height}×{width} grid ({} row nodes)",
            tree.num_nodes()
        );
        Ok(Self { tree })
    }

    /// Create an all-zero grid with `height` rows and `width` columns
    pub fn new(height: usize, width: usize) -> Result<Self, InvalidDimension> {
        if height == 0 {
            return Err(InvalidDimension::EmptyRows);
        }
        if width == 0 {
            return Err(InvalidDimension::EmptyColumns);
        }
        let tree = OuterTree::zeroed(height, width);
        log::debug!(
            "created zero {height}×{width} grid ({} row nodes)",
            tree.num_nodes()
        );
        Ok(Self { tree })
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.tree.width()
    }

    /// Add `delta` to every cell in `rows × cols`
    ///
    /// Runs in O(log H · log W).
    pub fn range_add(
        &mut self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
        delta: V,
    ) {
        let Some((rows, cols)) = self.clamp(rows, cols) else {
            log::trace!("add {delta:?}: empty rectangle");
            return;
        };
        log::trace!("add {delta:?} to {rows}×{cols}");
        self.tree.add(rows, cols, &delta);
    }

    /// Sum of all cells in `rows × cols`
    ///
    /// Runs in O(log H · log W).
    pub fn range_sum(
        &mut self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
    ) -> V {
        let Some((rows, cols)) = self.clamp(rows, cols) else {
            log::trace!("sum: empty rectangle");
            return V::zero();
        };
        let sum = self.tree.sum(rows, cols);
        log::trace!("sum of {rows}×{cols}: {sum:?}");
        sum
    }

    /// Add `delta` to the cell `(x, y)`, no-op if it is outside the grid
    #[inline]
    pub fn point_add(&mut self, x: usize, y: usize, delta: V) {
        self.range_add(x..=x, y..=y, delta)
    }

    /// Value of the cell `(x, y)`, zero if it is outside the grid
    #[inline]
    pub fn point_get(&mut self, x: usize, y: usize) -> V {
        self.range_sum(x..=x, y..=y)
    }

    /// Sum of the whole grid
    ///
    /// Runs in O(1).
    #[inline]
    pub fn total(&self) -> &V {
        self.tree.node(self.tree.root()).total.total()
    }

    /// Materialize the current grid
    ///
    /// This performs H·W point queries and is meant for diagnostics and
    /// output.
    pub fn to_rows(&mut self) -> Vec<Vec<V>> {
        let (height, width) = (self.height(), self.width());
        (0..height)
            .map(|x| (0..width).map(|y| self.point_get(x, y)).collect())
            .collect()
    }

    fn clamp(
        &self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
    ) -> Option<(Span, Span)> {
        let rows = Span::clamp(rows, self.height())?;
        let cols = Span::clamp(cols, self.width())?;
        Some((rows, cols))
    }
}

impl<V> fmt::Debug for SegTree2d<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegTree2d")
            .field("height", &self.tree.height())
            .field("width", &self.tree.width())
            .field("row_nodes", &self.tree.num_nodes())
            .finish()
    }
}

// --- Statistics --------------------------------------------------------------

#[cfg(feature = "statistics")]
struct StatCounters {
    outer_nodes: std::sync::atomic::AtomicU64,
    inner_nodes: std::sync::atomic::AtomicU64,
    push_downs: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "statistics")]
static STAT_COUNTERS: StatCounters = StatCounters {
    outer_nodes: std::sync::atomic::AtomicU64::new(0),
    inner_nodes: std::sync::atomic::AtomicU64::new(0),
    push_downs: std::sync::atomic::AtomicU64::new(0),
};

/// Snapshot of the statistics counters
#[cfg(feature = "statistics")]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Stats {
    /// Row tree nodes visited by updates and queries
    pub outer_nodes: u64,
    /// Column tree nodes visited by updates and queries
    pub inner_nodes: u64,
    /// Pending column amounts handed down to child nodes
    pub push_downs: u64,
}

/// Read and reset the statistics counters
///
/// The counters are global, so concurrent operations on any grid are
/// included.
#[cfg(feature = "statistics")]
pub fn take_stats() -> Stats {
    use std::sync::atomic::Ordering::Relaxed;
    Stats {
        outer_nodes: STAT_COUNTERS.outer_nodes.swap(0, Relaxed),
        inner_nodes: STAT_COUNTERS.inner_nodes.swap(0, Relaxed),
        push_downs: STAT_COUNTERS.push_downs.swap(0, Relaxed),
    }
}

/// Print statistics to stderr and reset the counters
///
/// Prints nothing unless the `statistics` feature is enabled.
pub fn print_stats() {
    #[cfg(feature = "statistics")]
    {
        let stats = take_stats();
        eprintln!(
            "[segtree2d] row nodes visited: {}, column nodes visited: {}, push-downs: {}",
            stats.outer_nodes, stats.inner_nodes, stats.push_downs
        );
    }
}

macro_rules! stat {
    (outer_node) => {
        #[cfg(feature = "statistics")]
        $crate::STAT_COUNTERS
            .outer_nodes
            .fetch_add(1, ::std::sync::atomic::Ordering::Relaxed);
    };
    (inner_node) => {
        #[cfg(feature = "statistics")]
        $crate::STAT_COUNTERS
            .inner_nodes
            .fetch_add(1, ::std::sync::atomic::Ordering::Relaxed);
    };
    (push_down) => {
        #[cfg(feature = "statistics")]
        $crate::STAT_COUNTERS
            .push_downs
            .fetch_add(1, ::std::sync::atomic::Ordering::Relaxed);
    };
}

pub(crate) use stat;
