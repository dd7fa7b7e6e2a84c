//! Per-tick velocity damping, position advance and wall reflection

use crate::constants::TICK_DAMPING;
use crate::particle::Particle;

/// Size of the surface particles are kept inside, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Clamp one axis into `[0, max]`, flipping `velocity` when a wall is hit.
fn reflect_axis(position: &mut f32, velocity: &mut f32, max: f32) {
    if *position < 0.0 {
        *position = 0.0;
        *velocity = -*velocity;
    } else if *position > max {
        *position = max;
        *velocity = -*velocity;
    }
}

/// Advance one particle by one tick.
pub fn integrate_particle(particle: &mut Particle, bounds: Bounds) {
    particle.velocity *= TICK_DAMPING;
    particle.position += particle.velocity;

    reflect_axis(
        &mut particle.position.x,
        &mut particle.velocity.x,
        bounds.width,
    );
    reflect_axis(
        &mut particle.position.y,
        &mut particle.velocity.y,
        bounds.height,
    );
}

/// Advance every particle by one tick. Must run after all pair updates of
/// the same tick.
pub fn integrate(particles: &mut [Particle], bounds: Bounds) {
    for particle in particles.iter_mut() {
        integrate_particle(particle, bounds);
    }
}
