//! Node visit counts of single operations
//!
//! The statistics counters are global, so this binary must contain only one
//! test.

#![cfg(feature = "statistics")]

use segtree2d::{take_stats, SegTree2d, Stats};
use segtree2d_test_utils::{Op, RandomOps};

/// `ceil(log2(len))`, the depth of a tree over `len` indices
fn depth(len: usize) -> u64 {
    len.next_power_of_two().trailing_zeros() as u64
}

/// Nodes visited by one canonical decomposition: the root plus at most four
/// nodes per level below it
fn max_visits(len: usize) -> u64 {
    4 * depth(len) + 1
}

#[test]
fn logarithmic_node_visits() {
    let (height, width) = (1000, 700);
    let max_outer = max_visits(height);
    // every row node runs at most two column operations
    let max_inner_per_outer = 2 * max_visits(width);

    let mut tree = SegTree2d::<i64>::new(height, width).unwrap();
    take_stats();

    // covering the whole grid stops at both roots
    tree.range_add(.., .., 3);
    let stats = take_stats();
    assert_eq!((stats.outer_nodes, stats.inner_nodes), (1, 2));
    assert_eq!(tree.range_sum(.., ..), 3 * 1000 * 700);
    assert_eq!(
        take_stats(),
        Stats {
            outer_nodes: 1,
            inner_nodes: 1,
            push_downs: 0
        }
    );

    let mut checked = 0;
    for (i, op) in RandomOps::new(17, height, width, 1000).take(2000).enumerate() {
        match &op {
            Op::Add { rows, cols, delta } => tree.range_add(rows.clone(), cols.clone(), *delta),
            Op::Sum { rows, cols } => {
                tree.range_sum(rows.clone(), cols.clone());
            }
        }
        let stats = take_stats();
        assert!(
            stats.outer_nodes <= max_outer,
            "op {i} ({op}) visited {} row nodes, at most {max_outer} expected",
            stats.outer_nodes
        );
        assert!(
            stats.inner_nodes <= stats.outer_nodes * max_inner_per_outer,
            "op {i} ({op}) visited {} column nodes in {} row nodes",
            stats.inner_nodes,
            stats.outer_nodes
        );
        assert!(stats.push_downs <= stats.inner_nodes);
        if stats.outer_nodes > 1 {
            checked += 1;
        }
    }
    assert!(checked > 1000);
}
