//! Render feed: the per-tick vertex stream handed to the renderer

use particle_physics::{Particle, Vertex};

/// Interleaved `(x, y, r, g, b)` vertices, one per particle in index order.
///
/// Rebuilt from scratch every tick; the allocation is reused.
#[derive(Debug, Clone, Default)]
pub struct RenderFeed {
    vertices: Vec<Vertex>,
}

impl RenderFeed {
    pub fn new(particles: &[Particle]) -> Self {
        let mut feed = Self {
            vertices: Vec::with_capacity(particles.len()),
        };
        feed.rebuild(particles);
        feed
    }

    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.vertices.clear();
        self.vertices.extend(particles.iter().map(Particle::vertex));
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Flat view of `FLOATS_PER_VERTEX * len()` values
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of vertices (particles) in the feed
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use particle_physics::FLOATS_PER_VERTEX;

    #[test]
    fn test_interleaving_in_index_order() {
        let particles = vec![
            Particle::new(Vec2::new(1.0, 2.0), Vec2::new(9.0, 9.0), Vec3::new(0.1, 0.2, 0.3)),
            Particle::new(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec3::new(0.4, 0.5, 0.6)),
        ];
        let feed = RenderFeed::new(&particles);

        assert_eq!(feed.len(), 2);
        assert_eq!(feed.as_floats().len(), 2 * FLOATS_PER_VERTEX);
        assert_eq!(
            feed.as_floats(),
            &[1.0, 2.0, 0.1, 0.2, 0.3, 3.0, 4.0, 0.4, 0.5, 0.6]
        );
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut feed = RenderFeed::new(&[Particle::reference(), Particle::reference()]);
        feed.rebuild(&[Particle::at_rest(Vec2::new(5.0, 6.0))]);

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.as_floats(), &[5.0, 6.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_empty_feed() {
        let feed = RenderFeed::new(&[]);
        assert!(feed.is_empty());
        assert!(feed.as_floats().is_empty());
    }
}
