//! Emergency-service location on ring roads.
//!
//! Each caller reaches a ring only through its two access points A and B
//! (modeled antipodal, `D/2` apart) and then travels along the ring to the
//! service center. The engine is a closed-form case analysis, not an iterative
//! solver:
//!
//! 1. `instance`: validated distances and circumferences, derived `delta`.
//! 2. `threshold`: the minimax threshold `α̃ = max_i min_j delta[i][j]`.
//! 3. `region`: per (caller, center) feasible positions at a threshold `α`.
//! 4. `placement`: one position per center from the per-pair regions.
//!
//! Everything is a pure function of an immutable `ProblemInstance`.

pub mod cfg;
pub mod instance;
pub mod placement;
pub mod rand;
pub mod region;
pub mod threshold;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{CfgError, RingCfg};
pub use instance::{InstanceError, ProblemInstance};
pub use placement::{Aggregation, OptimalSolution, PairViolation, SolveError};
pub use region::{BoundaryValues, FeasibleRegion, RingArc};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::rand::{draw_instance, InstanceCfg, ReplayToken};
    pub use crate::{
        Aggregation, FeasibleRegion, InstanceError, OptimalSolution, ProblemInstance, RingArc,
        RingCfg, SolveError,
    };
    pub use nalgebra::{DMatrix, DVector};
}

/// Reference instance with five neighborhoods and four ring roads.
///
/// Used by the demo driver, the benches, and as a fixed regression fixture.
pub fn reference_instance() -> ProblemInstance {
    let a = [
        [3.0, 9.0, 6.0, 3.0],
        [4.0, 8.0, 7.0, 5.0],
        [6.0, 6.0, 9.0, 7.0],
        [7.0, 5.0, 3.0, 9.0],
        [8.0, 3.0, 5.0, 8.0],
    ];
    let b = [
        [3.0, 10.0, 6.0, 5.0],
        [6.0, 9.0, 8.0, 6.0],
        [7.0, 7.0, 10.0, 8.0],
        [7.0, 6.0, 2.0, 10.0],
        [8.0, 3.0, 4.0, 9.0],
    ];
    ProblemInstance::from_parts(
        nalgebra::DVector::from_column_slice(&[22.0, 22.0, 22.0, 16.0]),
        nalgebra::DMatrix::from_fn(5, 4, |i, j| a[i][j]),
        nalgebra::DMatrix::from_fn(5, 4, |i, j| b[i][j]),
    )
}
