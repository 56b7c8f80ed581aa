//! Lazy segment tree over the column axis

use std::fmt;
use std::ops::RangeBounds;

use segtree2d_core::{InvalidDimension, Overlap, Span, Value};

use crate::stat;

/// A lazy-propagation segment tree over columns `0..width` supporting range
/// additions and range sums in O(log width)
///
/// Inside a [`SegTree2d`][crate::SegTree2d], every row node owns instances of
/// this tree. There, a single column may account for several rows: each
/// addition carries a row multiplicity, and the node sums are the totals over
/// all of those rows.
///
/// The nodes are stored in heap order: the root has index 1, and the children
/// of node `i` are `2 * i` and `2 * i + 1`. A node covering the span `s` has
/// children covering the two halves of [`s.split()`][Span::split].
///
/// Queries take `&mut self`: descending into a node with pending work pushes
/// that work down to the node's children first.
#[derive(Clone, PartialEq, Eq)]
pub struct InnerTree<V> {
    width: usize,
    /// Exact total of each node's column range
    sum: Vec<V>,
    /// Pending per-column amount not yet pushed to the children
    ///
    /// The amount already includes the row multiplicity of the addition it
    /// stems from. It is never set for leaves.
    lazy: Vec<V>,
}

const ROOT: usize = 1;

#[inline(always)]
fn left(i: usize) -> usize {
    2 * i
}
#[inline(always)]
fn right(i: usize) -> usize {
    2 * i + 1
}

/// Number of slots required for `width` leaves
///
/// Splitting at the midpoint yields a tree of depth `ceil(log2(width))`, so
/// all indices are below `2 * width.next_power_of_two()`.
#[inline]
fn slots(width: usize) -> usize {
    2 * width.next_power_of_two()
}

impl<V: Value> InnerTree<V> {
    /// Create a tree whose column `j` initially holds `column_totals[j]`
    ///
    /// Fails if `column_totals` is empty. Runs in O(width).
    pub fn build(column_totals: &[V]) -> Result<Self, InvalidDimension> {
        if column_totals.is_empty() {
            return Err(InvalidDimension::EmptyColumns);
        }
        Ok(Self::from_totals(column_totals))
    }

    /// Create a tree with `width` columns, all zero
    pub fn zeroed(width: usize) -> Result<Self, InvalidDimension> {
        if width == 0 {
            return Err(InvalidDimension::EmptyColumns);
        }
        Ok(Self::zeroed_unchecked(width))
    }

    pub(crate) fn zeroed_unchecked(width: usize) -> Self {
        debug_assert_ne!(width, 0);
        let n = slots(width);
        Self {
            width,
            sum: vec![V::zero(); n],
            lazy: vec![V::zero(); n],
        }
    }

    pub(crate) fn from_totals(column_totals: &[V]) -> Self {
        let mut tree = Self::zeroed_unchecked(column_totals.len());
        tree.build_rec(ROOT, tree.span(), column_totals);
        tree
    }

    fn build_rec(&mut self, node: usize, span: Span, column_totals: &[V]) {
        if span.is_unit() {
            self.sum[node] = column_totals[span.lo()].clone();
            return;
        }
        let (l, r) = span.split();
        self.build_rec(left(node), l, column_totals);
        self.build_rec(right(node), r, column_totals);
        self.pull(node);
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sum over all columns
    #[inline]
    pub fn total(&self) -> &V {
        &self.sum[ROOT]
    }

    #[inline]
    fn span(&self) -> Span {
        Span::new(0, self.width - 1)
    }

    /// Add `delta` to every column in `cols`
    ///
    /// Columns outside of `0..width` are ignored, an empty range is a no-op.
    pub fn range_add(&mut self, cols: impl RangeBounds<usize>, delta: &V) {
        if let Some(cols) = Span::clamp(cols, self.width) {
            self.add(cols, delta, 1);
        }
    }

    /// Sum of all columns in `cols`
    ///
    /// Columns outside of `0..width` are ignored, an empty range yields zero.
    pub fn range_sum(&mut self, cols: impl RangeBounds<usize>) -> V {
        let mut acc = V::zero();
        if let Some(cols) = Span::clamp(cols, self.width) {
            self.sum_into(cols, &mut acc);
        }
        acc
    }

    /// Add `delta` to every cell of `rows` rows in the columns `cols`
    ///
    /// `cols` must lie within `0..width`.
    pub(crate) fn add(&mut self, cols: Span, delta: &V, rows: usize) {
        debug_assert!(cols.hi() < self.width);
        let amount = delta.scale(rows);
        if amount.is_zero() {
            return;
        }
        self.add_rec(ROOT, self.span(), cols, &amount);
    }

    fn add_rec(&mut self, node: usize, span: Span, target: Span, amount: &V) {
        stat!(inner_node);
        match span.classify(target) {
            Overlap::Disjoint => {}
            Overlap::Covered => self.apply(node, span, amount),
            Overlap::Partial => {
                self.push_down(node, span);
                let (l, r) = span.split();
                self.add_rec(left(node), l, target, amount);
                self.add_rec(right(node), r, target, amount);
                self.pull(node);
            }
        }
    }

    /// Add the sum over `cols` to `acc`
    ///
    /// `cols` must lie within `0..width`.
    pub(crate) fn sum_into(&mut self, cols: Span, acc: &mut V) {
        debug_assert!(cols.hi() < self.width);
        self.sum_rec(ROOT, self.span(), cols, acc);
    }

    fn sum_rec(&mut self, node: usize, span: Span, target: Span, acc: &mut V) {
        stat!(inner_node);
        match span.classify(target) {
            Overlap::Disjoint => {}
            Overlap::Covered => *acc += &self.sum[node],
            Overlap::Partial => {
                self.push_down(node, span);
                let (l, r) = span.split();
                self.sum_rec(left(node), l, target, acc);
                self.sum_rec(right(node), r, target, acc);
            }
        }
    }

    /// Record `amount` per column for the whole subtree rooted at `node`
    #[inline]
    fn apply(&mut self, node: usize, span: Span, amount: &V) {
        self.sum[node] += &amount.scale(span.len());
        if !span.is_unit() {
            self.lazy[node] += amount;
        }
    }

    /// Hand the pending amount of `node` over to its children
    fn push_down(&mut self, node: usize, span: Span) {
        if self.lazy[node].is_zero() {
            return;
        }
        stat!(push_down);
        let amount = std::mem::replace(&mut self.lazy[node], V::zero());
        let (l, r) = span.split();
        self.apply(left(node), l, &amount);
        self.apply(right(node), r, &amount);
    }

    #[inline]
    fn pull(&mut self, node: usize) {
        let mut sum = self.sum[left(node)].clone();
        sum += &self.sum[right(node)];
        self.sum[node] = sum;
    }

    /// Project the tree down to its columns (apply all pending amounts)
    pub fn to_columns(&self) -> Vec<V> {
        fn rec<V: Value>(
            t: &InnerTree<V>,
            out: &mut Vec<V>,
            node: usize,
            span: Span,
            pending: V,
        ) {
            if span.is_unit() {
                let mut v = t.sum[node].clone();
                v += &pending;
                out.push(v);
                return;
            }
            let mut pending = pending;
            pending += &t.lazy[node];
            let (l, r) = span.split();
            rec(t, out, left(node), l, pending.clone());
            rec(t, out, right(node), r, pending);
        }

        let mut out = Vec::with_capacity(self.width);
        rec(self, &mut out, ROOT, self.span(), V::zero());
        out
    }
}

impl<V: fmt::Debug> fmt::Debug for InnerTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "InnerTree {{")?;
        write!(f, "    width: {}", self.width)?;
        let mut i = 1;
        while i < self.sum.len() {
            write!(f, "\n   ")?;
            for (sum, lazy) in self.sum[i..2 * i].iter().zip(&self.lazy[i..2 * i]) {
                write!(f, " {sum:?}/{lazy:?}")?;
            }
            i *= 2;
        }
        write!(f, "\n}}")
    }
}

#[cfg(test)]
mod test {
    use segtree2d_core::{InvalidDimension, Span};

    use super::InnerTree;

    #[test]
    fn build() {
        let t = InnerTree::build(&[-2i64, 5, 3, -2, -3, 4]).unwrap();
        assert_eq!(t.width(), 6);
        assert_eq!(*t.total(), 5);
        assert_eq!(t.to_columns(), [-2, 5, 3, -2, -3, 4]);
        assert_eq!(t.sum.len(), 16);

        assert_eq!(
            InnerTree::<i64>::build(&[]),
            Err(InvalidDimension::EmptyColumns)
        );
        assert_eq!(
            InnerTree::<i64>::zeroed(0),
            Err(InvalidDimension::EmptyColumns)
        );
    }

    #[test]
    fn lazy_stays_at_canonical_node() {
        let mut t = InnerTree::zeroed(4).unwrap();
        t.range_add(0..=3, &3i64);
        // only the root is touched
        assert_eq!(t.sum[1], 12);
        assert_eq!(t.lazy[1], 3);
        assert_eq!(t.sum[2..], [0; 6]);

        // a partial query pushes the pending amount one level down
        assert_eq!(t.range_sum(0..=0), 3);
        assert_eq!(t.lazy[1], 0);
        assert_eq!((t.sum[2], t.sum[3]), (6, 6));
        assert_eq!(t.lazy[3], 3);
        assert_eq!(t.to_columns(), [3, 3, 3, 3]);
    }

    #[test]
    fn row_multiplicity_is_exact() {
        // 3 rows, 5 columns; leaves get odd-length parents
        let mut t = InnerTree::zeroed(5).unwrap();
        t.add(Span::new(0, 4), &7i64, 3);
        t.add(Span::new(1, 3), &-2, 3);
        assert_eq!(*t.total(), 7 * 3 * 5 - 2 * 3 * 3);
        assert_eq!(t.range_sum(0..=0), 21);
        assert_eq!(t.range_sum(1..=2), 2 * 15);
        assert_eq!(t.range_sum(4..), 21);
        assert_eq!(t.to_columns(), [21, 15, 15, 15, 21]);
    }

    #[test]
    fn clamping() {
        let mut t = InnerTree::build(&[1i64, 2, 3]).unwrap();
        t.range_add(2..100, &10);
        assert_eq!(t.to_columns(), [1, 2, 13]);
        t.range_add(5.., &10);
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 2..=1;
        t.range_add(inverted, &10);
        assert_eq!(t.to_columns(), [1, 2, 13]);
        assert_eq!(t.range_sum(..), 16);
        assert_eq!(t.range_sum(3..), 0);
    }

    #[test]
    fn zero_delta_does_not_touch_nodes() {
        let mut t = InnerTree::build(&[1i64, 2, 3, 4]).unwrap();
        let before = t.clone();
        t.range_add(1..=2, &0);
        t.add(Span::new(0, 3), &5, 0);
        assert_eq!(t, before);
    }
}
