//! Random problem instances (replay tokens for reproducibility).
//!
//! Model
//! - Draw `m` callers and `n` rings, circumferences uniform in
//!   `circumference`, access distances uniform in `[0, max_distance]`.
//! - With `integer_valued`, every value is rounded so threshold ties
//!   (`α == δ`, `α == A`) actually occur.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::instance::ProblemInstance;

/// Count distribution for callers or centers.
#[derive(Clone, Copy, Debug)]
pub enum Count {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl Count {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            Count::Fixed(n) => n.max(1),
            Count::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Instance sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct InstanceCfg {
    pub callers: Count,
    pub centers: Count,
    /// Circumference range `(lo, hi)`; `lo` is clamped to be non-negative.
    pub circumference: (f64, f64),
    /// Access distances are drawn from `[0, max_distance]`.
    pub max_distance: f64,
    pub integer_valued: bool,
}

impl Default for InstanceCfg {
    fn default() -> Self {
        Self {
            callers: Count::Uniform { min: 1, max: 8 },
            centers: Count::Uniform { min: 1, max: 6 },
            circumference: (4.0, 30.0),
            max_distance: 12.0,
            integer_valued: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a valid instance; the same `(cfg, tok)` always yields the same data.
pub fn draw_instance(cfg: InstanceCfg, tok: ReplayToken) -> ProblemInstance {
    let mut rng = tok.to_std_rng();
    let m = cfg.callers.sample(&mut rng);
    let n = cfg.centers.sample(&mut rng);
    let c_lo = cfg.circumference.0.max(0.0);
    let c_hi = cfg.circumference.1.max(c_lo);
    let dist_hi = cfg.max_distance.max(0.0);
    let round = |x: f64| if cfg.integer_valued { x.round() } else { x };

    let d = DVector::from_fn(n, |_, _| round(uniform(&mut rng, c_lo, c_hi)));
    let a = DMatrix::from_fn(m, n, |_, _| round(uniform(&mut rng, 0.0, dist_hi)));
    let b = DMatrix::from_fn(m, n, |_, _| round(uniform(&mut rng, 0.0, dist_hi)));
    ProblemInstance::from_parts(d, a, b)
}

#[inline]
fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}
