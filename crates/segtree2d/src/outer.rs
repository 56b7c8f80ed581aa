//! Segment tree over the row axis whose nodes own column trees

use segtree2d_core::{Span, Value};

use crate::inner::InnerTree;

/// Index of an [`OuterNode`] in the [`OuterTree`] arena
pub(crate) type NodeId = usize;

/// A node covering the rows `rows`
///
/// Every node exclusively owns its two column trees and (via the arena) its
/// children.
#[derive(Clone)]
pub(crate) struct OuterNode<V> {
    pub(crate) rows: Span,
    /// `None` iff `rows` is a single row
    pub(crate) children: Option<[NodeId; 2]>,
    /// Totals over all rows of this node of every addition overlapping them
    pub(crate) total: InnerTree<V>,
    /// Per-row amounts of additions whose row range covered this node
    ///
    /// These additions stop at this node. Descendants never see them, so
    /// queries passing through this node account for them here.
    pub(crate) cover: InnerTree<V>,
}

/// Arena of [`OuterNode`]s
///
/// Nodes are stored in post-order, so the root is the last node. A tree over
/// `height` rows has exactly `2 * height - 1` nodes.
#[derive(Clone)]
pub(crate) struct OuterTree<V> {
    nodes: Vec<OuterNode<V>>,
    width: usize,
}

impl<V: Value> OuterTree<V> {
    /// Build the tree for a rectangular, non-empty `grid`
    pub(crate) fn build<R: AsRef<[V]>>(grid: &[R], width: usize) -> Self {
        debug_assert!(!grid.is_empty() && width != 0);
        let mut nodes = Vec::with_capacity(2 * grid.len() - 1);
        Self::build_rec(&mut nodes, Span::new(0, grid.len() - 1), grid);
        Self { nodes, width }
    }

    /// Returns the id of the new node together with its column totals
    fn build_rec<R: AsRef<[V]>>(
        nodes: &mut Vec<OuterNode<V>>,
        rows: Span,
        grid: &[R],
    ) -> (NodeId, Vec<V>) {
        if rows.is_unit() {
            let column_totals = grid[rows.lo()].as_ref().to_vec();
            return (
                Self::push(nodes, rows, None, &column_totals),
                column_totals,
            );
        }

        let (l, r) = rows.split();
        let (l_id, mut column_totals) = Self::build_rec(nodes, l, grid);
        let (r_id, r_totals) = Self::build_rec(nodes, r, grid);
        for (acc, v) in column_totals.iter_mut().zip(&r_totals) {
            *acc += v;
        }

        (
            Self::push(nodes, rows, Some([l_id, r_id]), &column_totals),
            column_totals,
        )
    }

    fn push(
        nodes: &mut Vec<OuterNode<V>>,
        rows: Span,
        children: Option<[NodeId; 2]>,
        column_totals: &[V],
    ) -> NodeId {
        let id = nodes.len();
        nodes.push(OuterNode {
            rows,
            children,
            total: InnerTree::from_totals(column_totals),
            cover: InnerTree::zeroed_unchecked(column_totals.len()),
        });
        id
    }

    /// Build the tree for an all-zero grid
    pub(crate) fn zeroed(height: usize, width: usize) -> Self {
        fn rec<V: Value>(
            nodes: &mut Vec<OuterNode<V>>,
            rows: Span,
            width: usize,
        ) -> NodeId {
            let children = if rows.is_unit() {
                None
            } else {
                let (l, r) = rows.split();
                Some([rec(nodes, l, width), rec(nodes, r, width)])
            };
            let id = nodes.len();
            nodes.push(OuterNode {
                rows,
                children,
                total: InnerTree::zeroed_unchecked(width),
                cover: InnerTree::zeroed_unchecked(width),
            });
            id
        }

        debug_assert!(height != 0 && width != 0);
        let mut nodes = Vec::with_capacity(2 * height - 1);
        rec(&mut nodes, Span::new(0, height - 1), width);
        Self { nodes, width }
    }
}

impl<V> OuterTree<V> {
    #[inline]
    pub(crate) fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &OuterNode<V> {
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut OuterNode<V> {
        &mut self.nodes[id]
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.node(self.root()).rows.len()
    }

    #[inline]
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub(crate) fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}
