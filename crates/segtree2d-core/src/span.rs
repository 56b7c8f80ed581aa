//! Inclusive index ranges and canonical decomposition

use std::fmt;
use std::ops::{Bound, RangeBounds};

/// Inclusive, non-empty index range `lo..=hi` on one axis
///
/// Invariant: `lo <= hi`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    lo: usize,
    hi: usize,
}

/// How a tree node's span relates to a target span
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Overlap {
    /// No index in common
    Disjoint,
    /// The target contains the whole node span (canonical match)
    Covered,
    /// Some, but not all indices of the node are part of the target
    Partial,
}

impl Span {
    /// Create the span `lo..=hi`
    ///
    /// Panics if `lo > hi`.
    #[inline]
    #[track_caller]
    pub fn new(lo: usize, hi: usize) -> Self {
        assert!(lo <= hi, "span {lo}..={hi} is empty");
        Self { lo, hi }
    }

    /// Clamp `bounds` into `0..len`
    ///
    /// Returns `None` if nothing remains, in particular for inverted ranges
    /// like `5..=2` and ranges starting at or after `len`.
    pub fn clamp(bounds: impl RangeBounds<usize>, len: usize) -> Option<Self> {
        let lo = match bounds.start_bound() {
            Bound::Included(&lo) => lo,
            Bound::Excluded(&lo) => lo.checked_add(1)?,
            Bound::Unbounded => 0,
        };
        let hi = match bounds.end_bound() {
            Bound::Included(&hi) => hi,
            Bound::Excluded(&hi) => hi.checked_sub(1)?,
            Bound::Unbounded => usize::MAX,
        };
        let hi = std::cmp::min(hi, len.checked_sub(1)?);
        if lo > hi {
            return None;
        }
        Some(Self { lo, hi })
    }

    /// Lower bound (inclusive)
    #[inline(always)]
    pub fn lo(self) -> usize {
        self.lo
    }

    /// Upper bound (inclusive)
    #[inline(always)]
    pub fn hi(self) -> usize {
        self.hi
    }

    /// Number of indices in the span (always at least 1)
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> usize {
        self.hi - self.lo + 1
    }

    /// `true` iff `lo == hi`
    #[inline(always)]
    pub fn is_unit(self) -> bool {
        self.lo == self.hi
    }

    /// Split the span at its midpoint `(lo + hi) / 2`
    ///
    /// The left half receives the midpoint. Must not be called on a unit span.
    #[inline]
    pub fn split(self) -> (Self, Self) {
        debug_assert!(!self.is_unit());
        let mid = self.lo + (self.hi - self.lo) / 2;
        (
            Self {
                lo: self.lo,
                hi: mid,
            },
            Self {
                lo: mid + 1,
                hi: self.hi,
            },
        )
    }

    /// Common indices of `self` and `other`
    #[inline]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let lo = std::cmp::max(self.lo, other.lo);
        let hi = std::cmp::min(self.hi, other.hi);
        if lo <= hi {
            Some(Self { lo, hi })
        } else {
            None
        }
    }

    /// Number of common indices of `self` and `other`
    #[inline]
    pub fn overlap_len(self, other: Self) -> usize {
        self.intersect(other).map_or(0, Self::len)
    }

    /// Classify the node span `self` with respect to `target`
    #[inline]
    pub fn classify(self, target: Self) -> Overlap {
        if target.hi < self.lo || self.hi < target.lo {
            Overlap::Disjoint
        } else if target.lo <= self.lo && self.hi <= target.hi {
            Overlap::Covered
        } else {
            Overlap::Partial
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.lo, self.hi)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::{Overlap, Span};

    #[test]
    fn clamp() {
        assert_eq!(Span::clamp(.., 4), Some(Span::new(0, 3)));
        assert_eq!(Span::clamp(1..=2, 4), Some(Span::new(1, 2)));
        assert_eq!(Span::clamp(1..3, 4), Some(Span::new(1, 2)));
        assert_eq!(Span::clamp(2..=100, 4), Some(Span::new(2, 3)));
        assert_eq!(Span::clamp(3.., 4), Some(Span::new(3, 3)));

        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 3..=1;
        assert_eq!(Span::clamp(inverted, 4), None);
        assert_eq!(Span::clamp(4.., 4), None);
        assert_eq!(Span::clamp(0..0, 4), None);
        assert_eq!(Span::clamp(.., 0), None);
        assert_eq!(
            Span::clamp((std::ops::Bound::Excluded(usize::MAX), std::ops::Bound::Unbounded), 4),
            None
        );
    }

    #[test]
    fn split() {
        assert_eq!(Span::new(0, 3).split(), (Span::new(0, 1), Span::new(2, 3)));
        assert_eq!(Span::new(0, 4).split(), (Span::new(0, 2), Span::new(3, 4)));
        assert_eq!(Span::new(5, 6).split(), (Span::new(5, 5), Span::new(6, 6)));
    }

    #[test]
    fn classify() {
        let node = Span::new(2, 5);
        assert_eq!(node.classify(Span::new(0, 1)), Overlap::Disjoint);
        assert_eq!(node.classify(Span::new(6, 9)), Overlap::Disjoint);
        assert_eq!(node.classify(Span::new(2, 5)), Overlap::Covered);
        assert_eq!(node.classify(Span::new(0, 9)), Overlap::Covered);
        assert_eq!(node.classify(Span::new(3, 9)), Overlap::Partial);
        assert_eq!(node.classify(Span::new(0, 2)), Overlap::Partial);
    }

    #[test]
    fn intersect() {
        let a = Span::new(2, 5);
        assert_eq!(a.intersect(Span::new(4, 8)), Some(Span::new(4, 5)));
        assert_eq!(a.intersect(Span::new(6, 8)), None);
        assert_eq!(a.overlap_len(Span::new(0, 3)), 2);
        assert_eq!(a.overlap_len(Span::new(7, 7)), 0);
        assert_eq!(a.len(), 4);
    }
}
