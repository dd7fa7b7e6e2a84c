//! CPU particle simulation manager
//!
//! Owns the swarm and its coefficient table and advances them one tick at a
//! time. Each tick runs strictly in order: every pair update, then
//! integration, then the render feed rebuild. Nothing here is shared across
//! threads.

use crate::feed::RenderFeed;
use crate::SimulationParams;
use particle_physics::{
    accumulate_forces, integrate, spawn_particles, Bounds, CoefficientMatrix, Particle,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Particle swarm simulation
pub struct ParticleSimulation {
    particles: Vec<Particle>,
    matrix: CoefficientMatrix,
    bounds: Bounds,
    feed: RenderFeed,
    tick_count: u64,
}

impl ParticleSimulation {
    /// Spawn a new swarm from `params`, seeded from `params.seed` when set.
    pub fn new(params: &SimulationParams, bounds: Bounds) -> Self {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(params, bounds, &mut rng)
    }

    /// Spawn a new swarm drawing all randomness from `rng`.
    ///
    /// Particles are drawn before the coefficient table.
    pub fn with_rng<R: Rng + ?Sized>(params: &SimulationParams, bounds: Bounds, rng: &mut R) -> Self {
        log::info!("Initializing ParticleSimulation...");

        let particles = spawn_particles(params.particle_count, rng);
        let matrix = CoefficientMatrix::generate(particles.len(), params.max_force, rng);

        log::info!(
            "✓ Spawned {} particles, {} pair coefficients (max force {})",
            particles.len(),
            matrix.pair_count(),
            params.max_force
        );

        Self::from_parts(particles, matrix, bounds)
    }

    /// Build a simulation from an explicit state.
    ///
    /// Panics if `matrix` was built for a different particle count.
    pub fn from_parts(particles: Vec<Particle>, matrix: CoefficientMatrix, bounds: Bounds) -> Self {
        assert_eq!(
            particles.len(),
            matrix.size(),
            "coefficient matrix size does not match particle count"
        );

        let feed = RenderFeed::new(&particles);
        Self {
            particles,
            matrix,
            bounds,
            feed,
            tick_count: 0,
        }
    }

    /// Advance the swarm by one tick and rebuild the render feed.
    pub fn step(&mut self) {
        accumulate_forces(&mut self.particles, &self.matrix);
        integrate(&mut self.particles, self.bounds);
        self.feed.rebuild(&self.particles);

        self.tick_count += 1;
        log::trace!(
            "tick {} done ({} particles)",
            self.tick_count,
            self.particles.len()
        );
    }

    /// Step until `should_stop` returns true. The check runs before every
    /// tick, never in the middle of one. Returns the number of ticks run.
    pub fn run(&mut self, mut should_stop: impl FnMut(&Self) -> bool) -> u64 {
        let start = self.tick_count;
        while !should_stop(self) {
            self.step();
        }
        self.tick_count - start
    }

    /// Surface resized; the next tick clamps against the new size.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if bounds != self.bounds {
            log::debug!(
                "simulation bounds {}x{} -> {}x{}",
                self.bounds.width,
                self.bounds.height,
                bounds.width,
                bounds.height
            );
        }
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn matrix(&self) -> &CoefficientMatrix {
        &self.matrix
    }

    /// Vertex stream for the latest completed tick
    pub fn feed(&self) -> &RenderFeed {
        &self.feed
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Mean particle speed, `0.0` for an empty swarm
    pub fn mean_speed(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        self.particles.iter().map(Particle::speed).sum::<f32>() / self.particles.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_step_runs_forces_then_integration() {
        let particles = vec![
            Particle::at_rest(Vec2::new(0.0, 50.0)),
            Particle::at_rest(Vec2::new(10.0, 50.0)),
        ];
        let matrix = CoefficientMatrix::from_fn(2, |_, _| -10.0);
        let mut sim = ParticleSimulation::from_parts(particles, matrix, Bounds::new(100, 100));

        sim.step();

        // pair: +20 toward particle 1, halved to 10; tick damping 0.99
        let p0 = sim.particles()[0];
        assert_eq!(p0.velocity, Vec2::new(10.0 * 0.99, 0.0));
        assert_eq!(p0.position, Vec2::new(10.0 * 0.99, 50.0));
        assert_eq!(sim.particles()[1].position, Vec2::new(10.0, 50.0));
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn test_feed_tracks_latest_tick() {
        let particles = vec![Particle::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0), Vec3::ONE)];
        let mut sim =
            ParticleSimulation::from_parts(particles, CoefficientMatrix::zeros(1), Bounds::new(100, 100));

        assert_eq!(sim.feed().as_floats(), &[5.0, 5.0, 1.0, 1.0, 1.0]);
        sim.step();
        assert_eq!(sim.feed().as_floats()[0], 5.0 + 0.99);
    }

    #[test]
    fn test_run_checks_between_ticks() {
        let mut sim = ParticleSimulation::with_rng(
            &SimulationParams {
                particle_count: 8,
                max_force: 1.0,
                seed: None,
            },
            Bounds::new(1920, 1080),
            &mut StdRng::seed_from_u64(5),
        );

        assert_eq!(sim.run(|s| s.tick_count() >= 12), 12);
        assert_eq!(sim.run(|_| true), 0);
        assert_eq!(sim.tick_count(), 12);
    }

    #[test]
    fn test_resize_applies_next_tick() {
        let particles = vec![Particle::at_rest(Vec2::new(900.0, 700.0))];
        let mut sim =
            ParticleSimulation::from_parts(particles, CoefficientMatrix::zeros(1), Bounds::new(1920, 1080));

        sim.set_bounds(Bounds::new(800, 600));
        sim.step();
        assert_eq!(sim.particles()[0].position, Vec2::new(800.0, 600.0));
        assert_eq!(sim.bounds(), Bounds::new(800, 600));
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn test_mismatched_matrix_panics() {
        ParticleSimulation::from_parts(
            vec![Particle::reference()],
            CoefficientMatrix::zeros(3),
            Bounds::new(10, 10),
        );
    }
}
