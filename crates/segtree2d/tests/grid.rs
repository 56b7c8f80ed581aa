//! Tests for SegTree2d against a brute-force grid

use rayon::prelude::*;

use segtree2d::{InvalidDimension, SegTree2d};
use segtree2d_test_utils::{all_rects, NaiveGrid, Op, Progress, RandomOps};

/// Apply `op` to both grids, returning `(actual, expected)` for sums
fn apply(tree: &mut SegTree2d, naive: &mut NaiveGrid<i64>, op: &Op) -> Option<(i64, i64)> {
    match op {
        Op::Add { rows, cols, delta } => {
            tree.range_add(rows.clone(), cols.clone(), *delta);
            naive.range_add(rows.clone(), cols.clone(), delta);
            None
        }
        Op::Sum { rows, cols } => Some((
            tree.range_sum(rows.clone(), cols.clone()),
            naive.range_sum(rows.clone(), cols.clone()),
        )),
    }
}

fn assert_all_rects(tree: &mut SegTree2d, naive: &NaiveGrid<i64>, context: &dyn Fn() -> String) {
    for (rows, cols) in all_rects(naive.height(), naive.width()) {
        let actual = tree.range_sum(rows.clone(), cols.clone());
        let expected = naive.range_sum(rows.clone(), cols.clone());
        assert_eq!(
            actual,
            expected,
            "sum of {rows:?} × {cols:?} differs ({})",
            context()
        );
    }
}

#[test]
fn concrete_scenario() {
    let mut tree = SegTree2d::new(4, 4).unwrap();
    let mut naive = NaiveGrid::new(4, 4);

    tree.range_add(0..=1, 0..=1, 5);
    naive.range_add(0..=1, 0..=1, &5);
    assert_eq!(tree.range_sum(0..=0, 0..=0), 5);
    assert_eq!(tree.range_sum(0..=3, 0..=3), 20);
    assert_eq!(tree.range_sum(2..=3, 2..=3), 0);

    tree.range_add(1..=2, 1..=2, 3);
    naive.range_add(1..=2, 1..=2, &3);
    assert_eq!(tree.range_sum(1..=1, 1..=1), 8);
    assert_eq!(tree.range_sum(0..=3, 0..=3), 32);
    assert_eq!(naive.range_sum(0..=3, 0..=3), 32);

    let before = tree.range_sum(0..=2, 0..=2);
    tree.range_add(3..=3, 3..=3, -100);
    naive.range_add(3..=3, 3..=3, &-100);
    assert_eq!(tree.range_sum(3..=3, 3..=3), -100);
    assert_eq!(tree.range_sum(0..=2, 0..=2), before);

    assert_eq!(tree.to_rows(), naive.rows());
    assert_all_rects(&mut tree, &naive, &|| "final".into());
}

#[test]
fn brute_force_small_shapes() {
    let shapes: Vec<(usize, usize)> = (1..=7)
        .flat_map(|h| (1..=7).map(move |w| (h, w)))
        .collect();
    let progress = Progress::new("small shapes", shapes.len() as u64);

    shapes.par_iter().for_each(|&(height, width)| {
        let seed = (height * 31 + width) as u64;
        let mut tree = SegTree2d::new(height, width).unwrap();
        let mut naive = NaiveGrid::new(height, width);
        for (i, op) in RandomOps::new(seed, height, width, 20).take(60).enumerate() {
            if let Some((actual, expected)) = apply(&mut tree, &mut naive, &op) {
                assert_eq!(actual, expected, "{height}×{width}, op {i}: {op}");
            } else {
                assert_all_rects(&mut tree, &naive, &|| {
                    format!("{height}×{width}, after op {i}: {op}")
                });
            }
        }
        progress.step();
    });

    progress.done();
}

#[test]
fn brute_force_random_initial_grid() {
    let cases = [(1u64, 9usize, 5usize), (2, 1, 13), (3, 16, 16), (4, 11, 1)];
    for (seed, height, width) in cases {
        let mut ops = RandomOps::new(seed, height, width, 1000);
        let grid = ops.grid();
        let mut tree = SegTree2d::build(&grid).unwrap();
        let mut naive = NaiveGrid::from_rows(&grid).unwrap();
        assert_eq!(tree.height(), height);
        assert_eq!(tree.width(), width);
        assert_all_rects(&mut tree, &naive, &|| format!("{height}×{width}, initial"));

        for (i, op) in ops.take(300).enumerate() {
            if let Some((actual, expected)) = apply(&mut tree, &mut naive, &op) {
                assert_eq!(actual, expected, "{height}×{width}, op {i}: {op}");
            }
        }
        assert_eq!(*tree.total(), naive.range_sum(.., ..));
        assert_all_rects(&mut tree, &naive, &|| format!("{height}×{width}, final"));
    }
}

#[test]
fn brute_force_large() {
    let (height, width) = (57, 43);
    let mut tree = SegTree2d::new(height, width).unwrap();
    let mut naive = NaiveGrid::new(height, width);
    let mut sums = 0;
    for (i, op) in RandomOps::new(0xdead_beef, height, width, 1 << 20)
        .take(3000)
        .enumerate()
    {
        if let Some((actual, expected)) = apply(&mut tree, &mut naive, &op) {
            assert_eq!(actual, expected, "op {i}: {op}");
            sums += 1;
        }
    }
    assert!(sums > 1000);
    assert_eq!(tree.to_rows(), naive.rows());
}

#[test]
fn additivity() {
    let rects = [(0..=2, 1..=3), (1..=4, 0..=0), (3..=3, 2..=4)];
    for (rows, cols) in rects {
        let mut twice = SegTree2d::<i64>::new(5, 5).unwrap();
        let mut once = SegTree2d::<i64>::new(5, 5).unwrap();
        twice.range_add(rows.clone(), cols.clone(), 7);
        twice.range_add(rows.clone(), cols.clone(), -3);
        once.range_add(rows, cols, 4);
        for (r, c) in all_rects(5, 5) {
            assert_eq!(twice.range_sum(r.clone(), c.clone()), once.range_sum(r, c));
        }
    }
}

#[test]
fn decomposition_consistency() {
    let mut ops = RandomOps::new(7, 10, 12, 50);
    let grid = ops.grid();
    let mut tree = SegTree2d::build(&grid).unwrap();
    for op in ops.take(200) {
        if let Op::Add { rows, cols, delta } = op {
            tree.range_add(rows, cols, delta);
        }
    }

    let full = tree.range_sum(.., ..);
    for split in 1..10 {
        let bands = tree.range_sum(..split, ..) + tree.range_sum(split.., ..);
        assert_eq!(bands, full, "row split at {split}");
    }
    for split in 1..12 {
        let bands = tree.range_sum(.., ..split) + tree.range_sum(.., split..);
        assert_eq!(bands, full, "column split at {split}");
    }

    // the same holds inside an arbitrary rectangle
    let rows = 2..=8;
    let inner = tree.range_sum(rows.clone(), 3..=10);
    for split in 3..10 {
        let bands =
            tree.range_sum(rows.clone(), 3..split) + tree.range_sum(rows.clone(), split..=10);
        assert_eq!(bands, inner, "column split at {split}");
    }
    assert_eq!(full, *tree.total());
}

#[test]
fn zero_update_is_idempotent() {
    let grid = RandomOps::new(3, 6, 6, 9).grid();
    let mut tree = SegTree2d::build(&grid).unwrap();
    let naive = NaiveGrid::from_rows(&grid).unwrap();

    for (rows, cols) in all_rects(6, 6) {
        tree.range_add(rows, cols, 0);
    }
    assert_all_rects(&mut tree, &naive, &|| "after zero updates".into());
}

#[test]
#[allow(clippy::reversed_empty_ranges)]
fn empty_and_out_of_range() {
    for (height, width) in [(1, 1), (1, 5), (4, 1), (3, 3)] {
        let mut tree = SegTree2d::new(height, width).unwrap();
        tree.range_add(.., .., 1);
        let before = tree.to_rows();

        // inverted
        tree.range_add(2..=1, .., 10);
        tree.range_add(.., 2..=1, 10);
        assert_eq!(tree.range_sum(2..=1, ..), 0);
        assert_eq!(tree.range_sum(.., 1..=0), 0);
        // entirely outside
        tree.range_add(height.., .., 10);
        tree.range_add(.., width..100, 10);
        assert_eq!(tree.range_sum(height..=height + 3, ..), 0);
        assert_eq!(tree.range_sum(.., width..), 0);
        assert_eq!(tree.point_get(height, 0), 0);
        assert_eq!(tree.to_rows(), before);

        // partially outside: clamped
        tree.range_add(height - 1..height + 5, ..=usize::MAX, 2);
        assert_eq!(
            tree.range_sum(.., ..),
            (height * width) as i64 + 2 * width as i64
        );
    }
}

#[test]
fn build_errors() {
    assert_eq!(
        SegTree2d::build(&[vec![1i64, 2], vec![3, 4], vec![5]]).unwrap_err(),
        InvalidDimension::RaggedRow {
            row: 2,
            len: 1,
            expected: 2
        }
    );
    assert_eq!(
        SegTree2d::<i64>::build::<Vec<i64>>(&[]).unwrap_err(),
        InvalidDimension::EmptyRows
    );
}

#[test]
fn wide_values() {
    // 2^62 per cell overflows i64 as soon as two cells are summed up
    let mut tree = SegTree2d::<i128>::new(64, 64).unwrap();
    tree.range_add(.., .., 1 << 62);
    tree.range_add(10..20, 30..40, -(1 << 62));
    assert_eq!(tree.range_sum(.., ..), (64 * 64 - 100) << 62);
    assert_eq!(tree.range_sum(10..20, ..40), (30 * 10) << 62);
}

#[cfg(feature = "bigint")]
#[test]
fn bigint_values() {
    use segtree2d::BigInt;

    let big = BigInt::from(u64::MAX) * BigInt::from(u64::MAX);
    let mut tree = SegTree2d::<BigInt>::new(5, 7).unwrap();
    tree.range_add(1..=3, 2..=6, big.clone());
    tree.point_add(2, 4, BigInt::from(-1));
    assert_eq!(
        tree.range_sum(.., ..),
        &big * BigInt::from(15) - BigInt::from(1)
    );
    assert_eq!(tree.point_get(3, 6), big);
    assert_eq!(tree.point_get(0, 0), BigInt::from(0));
}
