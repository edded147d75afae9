//! Closed-form feasible regions.
//!
//! For a pair with `A = a[i][j]`, `B = b[i][j]`, `D = d[j]`, `δ = min(A, B)`:
//! - `α < δ`: empty.
//! - `α = δ`: the single point `D/2`.
//! - `α > δ`, `A <= B`: the whole ring.
//! - `α > δ`, `A > B`: an arc of half-width `α − B` around `D/2`; once
//!   `α` reaches `A`, the point `0`; past `A`, arcs `[0, α−A]` and
//!   `[D−(α−A), D]` growing from access point A in both directions.
//!
//! The arc endpoints are the four boundary values
//! `μ* = α − A`, `μ** = D − α + A`, `ν* = D/2 + B − α`, `ν** = α + D/2 − B`.

use nalgebra::DMatrix;

use super::types::{FeasibleRegion, RingArc};
use crate::cfg::RingCfg;
use crate::instance::ProblemInstance;

/// Boundary values of every pair at one threshold, each `m × n`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryValues {
    /// `α − a`: reach past access point A.
    pub mu_star: DMatrix<f64>,
    /// `d − α + a`: start of the wrapped arc ending at A.
    pub mu_double_star: DMatrix<f64>,
    /// `d/2 + b − α`: lower end of the arc around B.
    pub nu_star: DMatrix<f64>,
    /// `α + d/2 − b`: upper end of the arc around B.
    pub nu_double_star: DMatrix<f64>,
}

#[derive(Clone, Copy, Debug)]
struct PairBounds {
    mu_star: f64,
    mu_double_star: f64,
    nu_star: f64,
    nu_double_star: f64,
}

impl PairBounds {
    #[inline]
    fn new(alpha: f64, a: f64, b: f64, d: f64) -> Self {
        let half = 0.5 * d;
        Self {
            mu_star: alpha - a,
            mu_double_star: d - alpha + a,
            nu_star: half + b - alpha,
            nu_double_star: alpha + half - b,
        }
    }
}

impl ProblemInstance {
    /// Feasible region of caller `i` on ring `j` at threshold `alpha`,
    /// using default tolerances.
    ///
    /// # Panics
    /// If `i >= m` or `j >= n`.
    pub fn feasible_region(&self, i: usize, j: usize, alpha: f64) -> FeasibleRegion {
        self.feasible_region_with(i, j, alpha, RingCfg::default())
    }

    /// Feasible region with explicit tolerances.
    ///
    /// # Panics
    /// If `i >= m` or `j >= n`.
    pub fn feasible_region_with(
        &self,
        i: usize,
        j: usize,
        alpha: f64,
        cfg: RingCfg,
    ) -> FeasibleRegion {
        let a = self.a()[(i, j)];
        let b = self.b()[(i, j)];
        let d = self.d()[j];
        let delta = self.delta()[(i, j)];

        if alpha.is_nan() || cfg.below(alpha, delta) {
            return FeasibleRegion::Empty;
        }
        if cfg.ties(alpha, delta) {
            return FeasibleRegion::Point(0.5 * d);
        }
        if a <= b {
            return FeasibleRegion::Arcs(vec![RingArc::clamped(0.0, d, d)]);
        }

        let pb = PairBounds::new(alpha, a, b, d);
        let around_b = RingArc::clamped(pb.nu_star, pb.nu_double_star, d);
        if cfg.below(alpha, a) {
            FeasibleRegion::Arcs(vec![around_b])
        } else if cfg.ties(alpha, a) {
            FeasibleRegion::Arcs(vec![RingArc::point(0.0), around_b])
        } else {
            FeasibleRegion::Arcs(vec![
                RingArc::clamped(0.0, pb.mu_star, d),
                around_b,
                RingArc::clamped(pb.mu_double_star, d, d),
            ])
        }
    }

    /// Regions of every pair at `alpha`, as an `m × n` table.
    pub fn feasible_regions(&self, alpha: f64, cfg: RingCfg) -> DMatrix<FeasibleRegion> {
        DMatrix::from_fn(self.m(), self.n(), |i, j| {
            self.feasible_region_with(i, j, alpha, cfg)
        })
    }

    /// The four boundary-value matrices at `alpha`.
    pub fn boundary_values(&self, alpha: f64) -> BoundaryValues {
        let pair = |i: usize, j: usize| {
            PairBounds::new(alpha, self.a()[(i, j)], self.b()[(i, j)], self.d()[j])
        };
        let (m, n) = (self.m(), self.n());
        BoundaryValues {
            mu_star: DMatrix::from_fn(m, n, |i, j| pair(i, j).mu_star),
            mu_double_star: DMatrix::from_fn(m, n, |i, j| pair(i, j).mu_double_star),
            nu_star: DMatrix::from_fn(m, n, |i, j| pair(i, j).nu_star),
            nu_double_star: DMatrix::from_fn(m, n, |i, j| pair(i, j).nu_double_star),
        }
    }
}
