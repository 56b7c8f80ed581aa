//! Rectangle sums

use segtree2d_core::{Overlap, Span, Value};

use crate::outer::{NodeId, OuterTree};
use crate::stat;

impl<V: Value> OuterTree<V> {
    /// Sum of all cells in `rows × cols`
    ///
    /// Both spans must lie within the grid. Takes `&mut self` since the column
    /// trees push pending amounts down while descending.
    pub(crate) fn sum(&mut self, rows: Span, cols: Span) -> V {
        debug_assert!(rows.hi() < self.height() && cols.hi() < self.width());
        let mut acc = V::zero();
        self.sum_rec(self.root(), rows, cols, &mut acc);
        acc
    }

    fn sum_rec(&mut self, id: NodeId, rows: Span, cols: Span, acc: &mut V) {
        stat!(outer_node);
        let node = self.node_mut(id);
        match node.rows.classify(rows) {
            Overlap::Disjoint => {}
            Overlap::Covered => node.total.sum_into(cols, acc),
            Overlap::Partial => {
                // Additions that covered this node stopped here, so the
                // descendants do not know about them.
                let mut per_row = V::zero();
                node.cover.sum_into(cols, &mut per_row);
                if !per_row.is_zero() {
                    *acc += &per_row.scale(node.rows.overlap_len(rows));
                }

                let Some([l, r]) = node.children else {
                    unreachable!("a single row is either covered or disjoint");
                };
                self.sum_rec(l, rows, cols, acc);
                self.sum_rec(r, rows, cols, acc);
            }
        }
    }
}
