//! Brute-force reference grid and other testing utilities

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod naive;
pub mod ops;
pub mod progress;

pub use naive::NaiveGrid;
pub use ops::{Op, RandomOps};
pub use progress::Progress;

use std::ops::RangeInclusive;

/// Iterate over all non-empty rectangles `(rows, cols)` of a `height × width`
/// grid
///
/// There are `(h(h+1)/2) · (w(w+1)/2)` of them, so only use this for small
/// grids.
pub fn all_rects(
    height: usize,
    width: usize,
) -> impl Iterator<Item = (RangeInclusive<usize>, RangeInclusive<usize>)> {
    all_spans(height)
        .flat_map(move |rows| all_spans(width).map(move |cols| (rows.clone(), cols)))
}

fn all_spans(len: usize) -> impl Iterator<Item = RangeInclusive<usize>> + Clone {
    (0..len).flat_map(move |lo| (lo..len).map(move |hi| lo..=hi))
}
