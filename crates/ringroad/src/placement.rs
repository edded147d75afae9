//! Placement selector: one position per center from the per-pair regions.
//!
//! Policy
//! - `Aggregation::Mean` (default): average every boundary value contributed
//!   by callers with a non-empty region on the ring. The mean is not checked
//!   against the contributing regions; `audit` reports pairs it misses.
//! - `Aggregation::Intersection`: intersect the contributing regions and take
//!   the midpoint of the widest resulting arc, falling back to the mean when
//!   the intersection is empty.
//! - A ring with no contributing caller gets its midpoint `D/2`.

use thiserror::Error;
use tracing::debug;

use crate::cfg::RingCfg;
use crate::instance::ProblemInstance;
use crate::region::FeasibleRegion;

/// How per-caller regions on one ring are combined into a position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Aggregation {
    #[default]
    Mean,
    Intersection,
}

/// Threshold and chosen position of every center, in ring order.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimalSolution {
    pub alpha: f64,
    pub positions: Vec<f64>,
}

/// Errors returned by [`ProblemInstance::solve`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SolveError {
    /// The requested threshold is below the unavoidable minimum.
    #[error("infeasible threshold {alpha}: must be at least {alpha_tilde}")]
    InfeasibleThreshold { alpha: f64, alpha_tilde: f64 },
}

/// A caller whose non-empty region on a ring misses the chosen position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PairViolation {
    pub caller: usize,
    pub center: usize,
    pub position: f64,
}

impl ProblemInstance {
    /// Solve at `alpha` (or `α̃` when `None`) with mean aggregation and
    /// default tolerances.
    pub fn solve(&self, alpha: Option<f64>) -> Result<OptimalSolution, SolveError> {
        self.solve_with(alpha, Aggregation::Mean, RingCfg::default())
    }

    /// Solve with an explicit aggregation policy and tolerances.
    ///
    /// Fails with [`SolveError::InfeasibleThreshold`] when `alpha` lies more
    /// than the tie tolerance below `α̃` or is NaN; no partial result is
    /// returned.
    pub fn solve_with(
        &self,
        alpha: Option<f64>,
        aggregation: Aggregation,
        cfg: RingCfg,
    ) -> Result<OptimalSolution, SolveError> {
        let alpha_tilde = self.minimum_threshold();
        let alpha = alpha.unwrap_or(alpha_tilde);
        if alpha.is_nan() || cfg.below(alpha, alpha_tilde) {
            return Err(SolveError::InfeasibleThreshold { alpha, alpha_tilde });
        }
        debug!(alpha, alpha_tilde, ?aggregation, "solve");

        let positions = (0..self.n())
            .map(|j| self.place_center(j, alpha, aggregation, cfg))
            .collect();
        Ok(OptimalSolution { alpha, positions })
    }

    /// Pairs whose region is non-empty at `solution.alpha` but does not
    /// contain the chosen position.
    pub fn audit(&self, solution: &OptimalSolution, cfg: RingCfg) -> Vec<PairViolation> {
        let mut out = Vec::new();
        for (center, &position) in solution.positions.iter().enumerate().take(self.n()) {
            for caller in 0..self.m() {
                let region = self.feasible_region_with(caller, center, solution.alpha, cfg);
                if !region.is_empty() && !region.contains(position, cfg.eps()) {
                    out.push(PairViolation {
                        caller,
                        center,
                        position,
                    });
                }
            }
        }
        out
    }

    fn place_center(&self, j: usize, alpha: f64, aggregation: Aggregation, cfg: RingCfg) -> f64 {
        let d = self.d()[j];
        let regions: Vec<FeasibleRegion> = (0..self.m())
            .map(|i| self.feasible_region_with(i, j, alpha, cfg))
            .filter(|r| !r.is_empty())
            .collect();
        if regions.is_empty() {
            debug!(center = j, "no contributing caller; using midpoint");
            return 0.5 * d;
        }
        let position = match aggregation {
            Aggregation::Mean => mean_of_boundaries(&regions),
            Aggregation::Intersection => {
                widest_common_midpoint(&regions, cfg.eps()).unwrap_or_else(|| {
                    debug!(center = j, "regions do not intersect; using mean");
                    mean_of_boundaries(&regions)
                })
            }
        };
        debug!(center = j, contributors = regions.len(), position, "placed center");
        position.clamp(0.0, d)
    }
}

/// Arithmetic mean of all boundary values of `regions` (all non-empty).
fn mean_of_boundaries(regions: &[FeasibleRegion]) -> f64 {
    let values: Vec<f64> = regions.iter().flat_map(|r| r.boundary_values()).collect();
    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / count
    } else {
        // Near f64::MAX the plain sum overflows; scale first.
        values.iter().map(|x| x / count).sum()
    }
}

/// Midpoint of the widest arc common to all `regions`, if any.
fn widest_common_midpoint(regions: &[FeasibleRegion], eps: f64) -> Option<f64> {
    let (first, rest) = regions.split_first()?;
    let common = rest
        .iter()
        .fold(first.clone(), |acc, r| acc.intersect(r, eps));
    common
        .normalized_arcs()
        .into_iter()
        .max_by(|x, y| x.width().total_cmp(&y.width()))
        .map(|arc| arc.midpoint())
}
