//! Minimax threshold.
//!
//! No placement can promise caller `i` less than its best access distance
//! `min_j delta[i][j]`, and the overall guarantee is set by the worst-off
//! caller: `α̃ = max_i min_j delta[i][j]`.

use nalgebra::{DMatrix, DVector};

use crate::instance::ProblemInstance;

impl ProblemInstance {
    /// Per-caller best access distance `min_j delta[i][j]`.
    pub fn caller_best_distances(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.m(),
            self.delta()
                .row_iter()
                .map(|row| row.iter().copied().fold(f64::INFINITY, f64::min)),
        )
    }

    /// The tight lower bound `α̃` on any achievable worst-case distance.
    pub fn minimum_threshold(&self) -> f64 {
        self.caller_best_distances()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Caller attaining `α̃` (lowest index on ties).
    pub fn bottleneck_caller(&self) -> usize {
        let best = self.caller_best_distances();
        let alpha_tilde = self.minimum_threshold();
        best.iter().position(|&v| v == alpha_tilde).unwrap_or(0)
    }

    /// Worst access distance per pair, `max(a, b)`.
    pub fn rho(&self) -> DMatrix<f64> {
        self.a().zip_map(self.b(), f64::max)
    }
}
