//! Particle state and the initial swarm layout

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rand::Rng;

use crate::constants::{REFERENCE_POSITION, SPAWN_HEIGHT, SPAWN_WIDTH};
use crate::sampling::{sample_non_zero, unit_scaled};

/// A single point in the swarm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels, origin bottom-left
    pub position: Vec2,
    /// Displacement applied per tick
    pub velocity: Vec2,
    /// RGB color, each component in `(0, 1]`
    pub color: Vec3,
}

/// Interleaved render vertex: `vec2 position` followed by `vec3 color`.
///
/// 20 bytes, no padding, so a slice of vertices can be handed to the GPU as
/// a flat `f32` stream with a stride of five elements.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, color: Vec3) -> Self {
        Self {
            position,
            velocity,
            color,
        }
    }

    /// Particle at rest at `position`, colored white
    pub fn at_rest(position: Vec2) -> Self {
        Self::new(position, Vec2::ZERO, Vec3::ONE)
    }

    /// The fixed first particle of every swarm
    pub fn reference() -> Self {
        Self::at_rest(Vec2::from_array(REFERENCE_POSITION))
    }

    /// Random position inside the spawn region with a random non-black color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = sample_non_zero(rng, &unit_scaled(SPAWN_WIDTH));
        let y = sample_non_zero(rng, &unit_scaled(SPAWN_HEIGHT));

        let channel = unit_scaled(1.0);
        let r = sample_non_zero(rng, &channel);
        let g = sample_non_zero(rng, &channel);
        let b = sample_non_zero(rng, &channel);

        Self::new(Vec2::new(x, y), Vec2::ZERO, Vec3::new(r, g, b))
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn vertex(&self) -> Vertex {
        Vertex {
            position: self.position.to_array(),
            color: self.color.to_array(),
        }
    }
}

/// Build the starting swarm: the reference particle followed by `count - 1`
/// random ones. `count == 0` yields an empty swarm.
pub fn spawn_particles<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    if count == 0 {
        return particles;
    }

    particles.push(Particle::reference());
    for _ in 1..count {
        particles.push(Particle::random(rng));
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        let v = Particle::new(Vec2::new(1.0, 2.0), Vec2::ZERO, Vec3::new(0.1, 0.2, 0.3)).vertex();
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_spawn_starts_with_reference() {
        let mut rng = StdRng::seed_from_u64(42);
        let particles = spawn_particles(64, &mut rng);

        assert_eq!(particles.len(), 64);
        assert_eq!(particles[0], Particle::reference());
        assert_eq!(particles[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(particles[0].color, Vec3::ONE);

        for p in &particles[1..] {
            assert!(p.position.x > 0.0 && p.position.x < SPAWN_WIDTH);
            assert!(p.position.y > 0.0 && p.position.y < SPAWN_HEIGHT);
            assert!(p.color.min_element() > 0.0 && p.color.max_element() <= 1.0);
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_spawn_edge_counts() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(spawn_particles(0, &mut rng).is_empty());
        assert_eq!(spawn_particles(1, &mut rng), vec![Particle::reference()]);
    }
}
