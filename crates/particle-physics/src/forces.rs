//! Pairwise force accumulation
//!
//! The interaction is one-sided: for a pair `(i, j)` with `i < j` only
//! particle `i` is pushed, and its velocity is halved after every such pair.
//! Low indices therefore lose speed far faster than high ones. Pairs must be
//! visited outer `i`, inner `j` for results to be reproducible.

use glam::Vec2;

use crate::constants::{FORCE_SCALE, MAX_INTERACTION_DISTANCE, PAIR_DECAY};
use crate::matrix::CoefficientMatrix;
use crate::particle::Particle;

/// Velocity change that `other` imposes on `particle` for one pair, before
/// the pair decay. Zero for coincident or out-of-range pairs.
pub fn pair_force(position: Vec2, other: Vec2, coefficient: f64) -> Vec2 {
    let delta = position - other;
    let distance = f64::from(delta.x * delta.x + delta.y * delta.y).sqrt();

    if distance > 0.0 && distance < MAX_INTERACTION_DISTANCE {
        let factor = (coefficient * FORCE_SCALE / distance) as f32;
        factor * delta
    } else {
        Vec2::ZERO
    }
}

/// Apply one pair update to `particle`: add the force from `other`, then decay.
pub fn apply_pair(particle: &mut Particle, other: Vec2, coefficient: f64) {
    particle.velocity += pair_force(particle.position, other, coefficient);
    particle.velocity *= PAIR_DECAY;
}

/// Run every pair update for one tick, in place.
///
/// `matrix` must have been built for `particles.len()` particles.
pub fn accumulate_forces(particles: &mut [Particle], matrix: &CoefficientMatrix) {
    assert_eq!(
        particles.len(),
        matrix.size(),
        "coefficient matrix size does not match particle count"
    );

    for i in 0..particles.len() {
        let (head, partners) = particles.split_at_mut(i + 1);
        let particle = &mut head[i];
        for (other, &coefficient) in partners.iter().zip(matrix.row(i)) {
            apply_pair(particle, other.position, coefficient);
        }
    }
}
