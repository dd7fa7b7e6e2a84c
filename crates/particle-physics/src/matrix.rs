//! Per-pair interaction coefficients
//!
//! Only the strict upper triangle (`i < j`) is ever consulted, so the table is
//! stored packed: row `i` holds the `n - i - 1` coefficients for partners
//! `i + 1..n`.

use rand::Rng;

use crate::sampling::{sample_non_zero, symmetric};

/// Fixed, read-only table of interaction strengths keyed by particle index
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientMatrix {
    size: usize,
    upper: Vec<f64>,
}

impl CoefficientMatrix {
    /// Matrix of `size` particles with every coefficient zero
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            upper: vec![0.0; Self::pair_count_for(size)],
        }
    }

    /// Build a matrix by evaluating `f(i, j)` for every `i < j`, in
    /// lexicographic order.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut upper = Vec::with_capacity(Self::pair_count_for(size));
        for i in 0..size {
            for j in (i + 1)..size {
                upper.push(f(i, j));
            }
        }
        Self { size, upper }
    }

    /// Random matrix with every coefficient non-zero and inside
    /// `(-max_force, max_force)`.
    ///
    /// A `max_force` that is zero, negative or not finite gives an all-zero
    /// matrix without touching the RNG.
    pub fn generate<R: Rng + ?Sized>(size: usize, max_force: f64, rng: &mut R) -> Self {
        if !(max_force.is_finite() && max_force > 0.0) {
            return Self::zeros(size);
        }

        let distribution = symmetric(max_force);
        Self::from_fn(size, |_, _| sample_non_zero(rng, &distribution))
    }

    /// Number of particles the matrix was built for
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored coefficients, `n * (n - 1) / 2`
    pub fn pair_count(&self) -> usize {
        self.upper.len()
    }

    fn pair_count_for(size: usize) -> usize {
        size * size.saturating_sub(1) / 2
    }

    /// Offset of the first coefficient of row `i` in the packed storage
    fn row_start(&self, i: usize) -> usize {
        // sum over rows k < i of (n - k - 1)
        i * (2 * self.size - i - 1) / 2
    }

    /// Coefficient for the ordered pair `(i, j)`.
    ///
    /// Entries outside the upper triangle are never used by the force model
    /// and read as `0.0`. Indices past `size` are a caller bug.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.size && j < self.size,
            "coefficient index ({i}, {j}) out of range for {} particles",
            self.size
        );
        if i >= j {
            return 0.0;
        }
        self.upper[self.row_start(i) + (j - i - 1)]
    }

    /// All coefficients of row `i`, for partners `i + 1..n`
    pub fn row(&self, i: usize) -> &[f64] {
        let start = self.row_start(i);
        &self.upper[start..start + (self.size - i - 1)]
    }
}
