//! Random operation sequences

use std::fmt;
use std::ops::RangeInclusive;

use nanorand::{Rng, WyRand};

/// A rectangle operation
///
/// The ranges may be inverted or reach beyond the grid to exercise clamping.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Op {
    /// Add `delta` to every cell of the rectangle
    Add {
        /// Row range
        rows: RangeInclusive<usize>,
        /// Column range
        cols: RangeInclusive<usize>,
        /// Value to add
        delta: i64,
    },
    /// Sum up the rectangle
    Sum {
        /// Row range
        rows: RangeInclusive<usize>,
        /// Column range
        cols: RangeInclusive<usize>,
    },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add { rows, cols, delta } => write!(f, "add {rows:?} × {cols:?} += {delta}"),
            Op::Sum { rows, cols } => write!(f, "sum {rows:?} × {cols:?}"),
        }
    }
}

/// Seeded generator of [`Op`]s for a `height × width` grid
pub struct RandomOps {
    rng: WyRand,
    height: usize,
    width: usize,
    max_delta: i64,
}

impl RandomOps {
    /// Create a new generator
    ///
    /// Deltas are drawn from `-max_delta..=max_delta`.
    pub fn new(seed: u64, height: usize, width: usize, max_delta: i64) -> Self {
        assert!(height != 0 && width != 0 && max_delta >= 0);
        Self {
            rng: WyRand::new_seed(seed),
            height,
            width,
            max_delta,
        }
    }

    /// Random range for an axis of length `len`
    ///
    /// Mostly ranges within the axis, sometimes ranges sticking out of it and
    /// occasionally inverted ones.
    fn range(&mut self, len: usize) -> RangeInclusive<usize> {
        let a = self.rng.generate_range(0..len + 2);
        let b = self.rng.generate_range(0..len + 2);
        if self.rng.generate_range(0u32..16) == 0 {
            return std::cmp::max(a, b)..=std::cmp::min(a, b);
        }
        std::cmp::min(a, b)..=std::cmp::max(a, b)
    }

    /// Generate the next operation, an addition with probability 1/2
    pub fn next_op(&mut self) -> Op {
        let rows = self.range(self.height);
        let cols = self.range(self.width);
        if self.rng.generate::<bool>() {
            let delta = self.rng.generate_range(-self.max_delta..=self.max_delta);
            Op::Add { rows, cols, delta }
        } else {
            Op::Sum { rows, cols }
        }
    }

    /// Random initial grid with values drawn from `-max_delta..=max_delta`
    pub fn grid(&mut self) -> Vec<Vec<i64>> {
        (0..self.height)
            .map(|_| {
                (0..self.width)
                    .map(|_| self.rng.generate_range(-self.max_delta..=self.max_delta))
                    .collect()
            })
            .collect()
    }
}

impl Iterator for RandomOps {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        Some(self.next_op())
    }
}

#[cfg(test)]
mod test {
    use super::{Op, RandomOps};

    #[test]
    fn deterministic() {
        let a: Vec<Op> = RandomOps::new(42, 5, 7, 10).take(100).collect();
        let b: Vec<Op> = RandomOps::new(42, 5, 7, 10).take(100).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn bounds() {
        for op in RandomOps::new(1, 3, 4, 5).take(1000) {
            let (rows, cols) = match &op {
                Op::Add { rows, cols, delta } => {
                    assert!((-5..=5).contains(delta));
                    (rows, cols)
                }
                Op::Sum { rows, cols } => (rows, cols),
            };
            assert!(*rows.start() <= 4 && *rows.end() <= 4);
            assert!(*cols.start() <= 5 && *cols.end() <= 5);
        }
    }
}
