//! Brute-force grid applying every operation cell by cell

use std::ops::RangeBounds;

use segtree2d_core::error::check_dimensions;
use segtree2d_core::{InvalidDimension, Span, Value};

/// Plain `height × width` array with the same clamping rules as the real
/// structure
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NaiveGrid<V> {
    rows: Vec<Vec<V>>,
    width: usize,
}

impl<V: Value> NaiveGrid<V> {
    /// All-zero grid
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            rows: vec![vec![V::zero(); width]; height],
            width,
        }
    }

    /// Grid with the given initial values
    pub fn from_rows<R: AsRef<[V]>>(grid: &[R]) -> Result<Self, InvalidDimension> {
        let (_, width) = check_dimensions(grid)?;
        Ok(Self {
            rows: grid.iter().map(|r| r.as_ref().to_vec()).collect(),
            width,
        })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    fn clamp(
        &self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
    ) -> Option<(Span, Span)> {
        Some((
            Span::clamp(rows, self.height())?,
            Span::clamp(cols, self.width)?,
        ))
    }

    /// Add `delta` to every cell in `rows × cols`
    pub fn range_add(
        &mut self,
        rows: impl RangeBounds<usize>,
        cols: impl RangeBounds<usize>,
        delta: &V,
    ) {
        let Some((rows, cols)) = self.clamp(rows, cols) else {
            return;
        };
        for row in &mut self.rows[rows.lo()..=rows.hi()] {
            for cell in &mut row[cols.lo()..=cols.hi()] {
                *cell += delta;
            }
        }
    }

    /// Sum of all cells in `rows × cols`
    pub fn range_sum(&self, rows: impl RangeBounds<usize>, cols: impl RangeBounds<usize>) -> V {
        let mut acc = V::zero();
        if let Some((rows, cols)) = self.clamp(rows, cols) {
            for row in &self.rows[rows.lo()..=rows.hi()] {
                for cell in &row[cols.lo()..=cols.hi()] {
                    acc += cell;
                }
            }
        }
        acc
    }

    /// The current cell values
    pub fn rows(&self) -> &[Vec<V>] {
        &self.rows
    }
}
