//! Numeric tolerances for the ring-road engine.
//!
//! Policy
//! - The case analysis compares a threshold against distances with `==`.
//!   Those ties, the infeasibility slack, and region membership all use a
//!   single epsilon so the three checks can never disagree.
//! - The tolerance is finite and non-negative. `RingCfg::new` rejects other
//!   values; a struct literal carrying one is read as an exact comparison.

use thiserror::Error;

/// Default tie tolerance.
pub(crate) const TIE_EPS: f64 = 1e-9;

/// Engine configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingCfg {
    /// Two values closer than this are treated as equal.
    pub eps_tie: f64,
}

/// Rejected tolerance passed to [`RingCfg::new`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CfgError {
    #[error("tie tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

impl Default for RingCfg {
    fn default() -> Self {
        Self { eps_tie: TIE_EPS }
    }
}

impl RingCfg {
    /// Checked constructor.
    pub fn new(eps_tie: f64) -> Result<Self, CfgError> {
        if eps_tie.is_finite() && eps_tie >= 0.0 {
            Ok(Self { eps_tie })
        } else {
            Err(CfgError::InvalidTolerance(eps_tie))
        }
    }

    /// Exact comparisons; mirrors the closed-form case split literally.
    pub fn exact() -> Self {
        Self { eps_tie: 0.0 }
    }

    /// Tolerance actually applied: `eps_tie` when valid, else `0`.
    #[inline]
    pub(crate) fn eps(&self) -> f64 {
        if self.eps_tie.is_finite() && self.eps_tie >= 0.0 {
            self.eps_tie
        } else {
            0.0
        }
    }

    #[inline]
    pub(crate) fn ties(&self, x: f64, y: f64) -> bool {
        (x - y).abs() <= self.eps()
    }

    /// `x < y` outside the tie band.
    #[inline]
    pub(crate) fn below(&self, x: f64, y: f64) -> bool {
        x < y - self.eps()
    }
}
