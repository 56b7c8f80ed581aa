//! Rectangle additions

use segtree2d_core::{Overlap, Span, Value};

use crate::outer::{NodeId, OuterTree};
use crate::stat;

impl<V: Value> OuterTree<V> {
    /// Add `delta` to every cell in `rows × cols`
    ///
    /// Both spans must lie within the grid. The row axis is decomposed into
    /// O(log height) canonical nodes, each of which receives an
    /// O(log width) column update.
    pub(crate) fn add(&mut self, rows: Span, cols: Span, delta: &V) {
        debug_assert!(rows.hi() < self.height() && cols.hi() < self.width());
        self.add_rec(self.root(), rows, cols, delta);
    }

    fn add_rec(&mut self, id: NodeId, rows: Span, cols: Span, delta: &V) {
        stat!(outer_node);
        let node = self.node_mut(id);
        match node.rows.classify(rows) {
            Overlap::Disjoint => {}
            Overlap::Covered => {
                // Every row below this node receives the same delta. The row
                // count accounts for all of them, so we stop here.
                node.total.add(cols, delta, node.rows.len());
                node.cover.add(cols, delta, 1);
            }
            Overlap::Partial => {
                node.total.add(cols, delta, node.rows.overlap_len(rows));
                let Some([l, r]) = node.children else {
                    unreachable!("a single row is either covered or disjoint");
                };
                self.add_rec(l, rows, cols, delta);
                self.add_rec(r, rows, cols, delta);
            }
        }
    }
}
