//! Zero-rejecting random sampling
//!
//! Every random draw in the swarm (spawn positions, colors and coefficients)
//! treats an exact zero as degenerate and draws again.

use rand::distr::{Distribution, Open01};
use rand::Rng;

/// Sample `distribution` until it produces a value other than zero.
///
/// `T::default()` is taken as the zero value, which holds for the float types
/// this is used with. The caller must not pass a distribution that can only
/// ever return zero; [`crate::CoefficientMatrix::generate`] guards the
/// zero-width case before sampling.
pub fn sample_non_zero<T, D, R>(rng: &mut R, distribution: &D) -> T
where
    T: Default + PartialEq,
    D: Distribution<T>,
    R: Rng + ?Sized,
{
    let zero = T::default();
    loop {
        let value = distribution.sample(rng);
        if value != zero {
            return value;
        }
    }
}

/// Distribution of `f32` values uniform over `(0, extent)`.
pub fn unit_scaled(extent: f32) -> impl Distribution<f32> {
    Open01.map(move |u: f32| u * extent)
}

/// Distribution of `f64` values uniform over `(-bound, bound)`.
pub fn symmetric(bound: f64) -> impl Distribution<f64> {
    Open01.map(move |u: f64| u * (2.0 * bound) - bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Yields zero a fixed number of times before a non-zero value.
    struct ZerosThen {
        zeros: std::cell::Cell<u32>,
    }

    impl Distribution<f32> for ZerosThen {
        fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f32 {
            let left = self.zeros.get();
            if left > 0 {
                self.zeros.set(left - 1);
                0.0
            } else {
                0.25
            }
        }
    }

    #[test]
    fn test_rejects_zero_draws() {
        let mut rng = StdRng::seed_from_u64(1);
        let dist = ZerosThen {
            zeros: std::cell::Cell::new(3),
        };
        assert_eq!(sample_non_zero(&mut rng, &dist), 0.25);
        assert_eq!(dist.zeros.get(), 0);
    }

    #[test]
    fn test_unit_scaled_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = unit_scaled(1080.0);
        for _ in 0..1000 {
            let v = sample_non_zero(&mut rng, &dist);
            assert!(v > 0.0 && v < 1080.0);
        }
    }

    #[test]
    fn test_symmetric_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = symmetric(3.0);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..1000 {
            let v = sample_non_zero(&mut rng, &dist);
            assert!(v > -3.0 && v < 3.0 && v != 0.0);
            saw_negative |= v < 0.0;
            saw_positive |= v > 0.0;
        }
        assert!(saw_negative && saw_positive);
    }
}
