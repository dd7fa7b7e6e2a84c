//! # Particle Simulation Engine
//!
//! Single-threaded tick loop for the particle swarm: pair forces, integration
//! and the interleaved render feed handed to the renderer every frame.

pub mod feed;
pub mod params;
pub mod simulation;

pub use feed::*;
pub use params::*;
pub use simulation::*;
