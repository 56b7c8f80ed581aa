//! Fundamental types shared by the segtree2d crates
//!
//! # Overview
//!
//! A [`Value`] is the number type of grid cells, deltas, and sums. All
//! arithmetic on the update and query paths is expressed through
//! [`Value::scale()`] (multiplication by an exact cell count) and addition, so
//! results are bit-exact for every implementation.
//!
//! A [`Span`] is an inclusive, non-empty index range on one axis. Both levels
//! of the two-dimensional structure use [`Span::classify()`] to drive their
//! canonical decomposition.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod num;
pub mod span;

pub use error::InvalidDimension;
pub use num::Value;
pub use span::{Overlap, Span};
