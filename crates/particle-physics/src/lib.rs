//! # Particle Physics Engine
//!
//! CPU force model for the particle swarm: a fixed random coefficient table,
//! one-sided pairwise forces, damped integration and wall reflection.

pub mod constants;
pub mod forces;
pub mod integrator;
pub mod matrix;
pub mod particle;
pub mod sampling;

pub use constants::*;
pub use forces::*;
pub use integrator::*;
pub use matrix::*;
pub use particle::*;
pub use sampling::*;
