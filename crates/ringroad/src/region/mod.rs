//! Feasible-region computer.
//!
//! Purpose
//! - For a fixed threshold `α` and each (caller, center) pair, describe the
//!   positions on the center's ring that keep the caller within `α`.
//! - Regions are a tagged variant (`Empty`, `Point`, `Arcs`) so placement can
//!   either average their boundary values or intersect them as sets.
//!
//! Layout
//! - `types.rs`: `RingArc` and `FeasibleRegion` with membership/intersection.
//! - `compute.rs`: the closed-form case analysis and the boundary values.

mod compute;
mod types;

pub use compute::BoundaryValues;
pub use types::{FeasibleRegion, RingArc};

#[cfg(test)]
mod tests;
