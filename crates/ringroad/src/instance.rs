//! Validated problem data: caller/center counts, ring circumferences, and the
//! two caller-to-access-point distance matrices.
//!
//! Invariants (checked by `ProblemInstance::new`):
//! - `a` and `b` have shape `(m, n)`, `d` has length `n`, and `m, n >= 1`.
//! - Every entry is finite and non-negative. Zero-length rings are allowed.
//! - `delta = min(a, b)` elementwise is derived once and never changes.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Which distance matrix an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixName {
    A,
    B,
}

impl std::fmt::Display for MatrixName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixName::A => f.write_str("a"),
            MatrixName::B => f.write_str("b"),
        }
    }
}

/// Errors returned by [`ProblemInstance::new`] and [`ProblemInstance::from_rows`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstanceError {
    /// A distance matrix disagrees with the declared `(m, n)`.
    #[error("distance matrix {matrix} has shape {actual:?}, expected {expected:?}")]
    Shape {
        matrix: MatrixName,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// The circumference vector disagrees with the declared `n`.
    #[error("circumference list has length {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },
    /// No callers or no centers.
    #[error("instance needs at least one caller and one center (m={m}, n={n})")]
    EmptyDimension { m: usize, n: usize },
    /// A distance or circumference is negative, NaN, or infinite.
    #[error("{what} has invalid value {value} at {index:?}")]
    InvalidValue {
        what: &'static str,
        index: (usize, usize),
        value: f64,
    },
}

/// Immutable ring-road location problem.
///
/// Positions on ring `j` are arc-lengths from access point A in `[0, d[j]]`;
/// access point B sits at `d[j] / 2`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProblemInstance {
    m: usize,
    n: usize,
    d: DVector<f64>,
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    delta: DMatrix<f64>,
}

impl ProblemInstance {
    /// Validate and construct an instance from declared counts and data.
    pub fn new(
        m: usize,
        n: usize,
        d: DVector<f64>,
        a: DMatrix<f64>,
        b: DMatrix<f64>,
    ) -> Result<Self, InstanceError> {
        if a.shape() != (m, n) {
            return Err(InstanceError::Shape {
                matrix: MatrixName::A,
                expected: (m, n),
                actual: a.shape(),
            });
        }
        if b.shape() != (m, n) {
            return Err(InstanceError::Shape {
                matrix: MatrixName::B,
                expected: (m, n),
                actual: b.shape(),
            });
        }
        if d.len() != n {
            return Err(InstanceError::Length {
                expected: n,
                actual: d.len(),
            });
        }
        if m == 0 || n == 0 {
            return Err(InstanceError::EmptyDimension { m, n });
        }
        check_values("d", d.iter().enumerate().map(|(j, &v)| ((0, j), v)))?;
        check_values("a", indexed(&a))?;
        check_values("b", indexed(&b))?;
        Ok(Self::from_parts(d, a, b))
    }

    /// Build from nested rows; `m` and `n` are taken from `a_rows`.
    ///
    /// Ragged rows (or `b_rows` disagreeing with `a_rows`) are a shape error.
    pub fn from_rows(
        d: &[f64],
        a_rows: &[Vec<f64>],
        b_rows: &[Vec<f64>],
    ) -> Result<Self, InstanceError> {
        let m = a_rows.len();
        let n = a_rows.first().map_or(d.len(), Vec::len);
        let a = rows_to_matrix(MatrixName::A, a_rows, m, n)?;
        let b = rows_to_matrix(MatrixName::B, b_rows, m, n)?;
        Self::new(m, n, DVector::from_column_slice(d), a, b)
    }

    /// Unchecked constructor for data that is valid by construction.
    pub(crate) fn from_parts(d: DVector<f64>, a: DMatrix<f64>, b: DMatrix<f64>) -> Self {
        let delta = a.zip_map(&b, f64::min);
        Self {
            m: a.nrows(),
            n: a.ncols(),
            d,
            a,
            b,
            delta,
        }
    }

    /// Number of callers.
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }
    /// Number of centers (one per ring).
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }
    /// Ring circumferences.
    #[inline]
    pub fn d(&self) -> &DVector<f64> {
        &self.d
    }
    /// Caller to access point A distances.
    #[inline]
    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }
    /// Caller to access point B distances.
    #[inline]
    pub fn b(&self) -> &DMatrix<f64> {
        &self.b
    }
    /// `min(a, b)` per pair.
    #[inline]
    pub fn delta(&self) -> &DMatrix<f64> {
        &self.delta
    }
}

fn indexed(mat: &DMatrix<f64>) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
    (0..mat.nrows()).flat_map(move |i| (0..mat.ncols()).map(move |j| ((i, j), mat[(i, j)])))
}

fn check_values(
    what: &'static str,
    values: impl Iterator<Item = ((usize, usize), f64)>,
) -> Result<(), InstanceError> {
    for (index, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(InstanceError::InvalidValue { what, index, value });
        }
    }
    Ok(())
}

fn rows_to_matrix(
    name: MatrixName,
    rows: &[Vec<f64>],
    m: usize,
    n: usize,
) -> Result<DMatrix<f64>, InstanceError> {
    let shape_err = |actual| InstanceError::Shape {
        matrix: name,
        expected: (m, n),
        actual,
    };
    if rows.len() != m {
        return Err(shape_err((rows.len(), n)));
    }
    if let Some(bad) = rows.iter().find(|r| r.len() != n) {
        return Err(shape_err((m, bad.len())));
    }
    Ok(DMatrix::from_fn(m, n, |i, j| rows[i][j]))
}
