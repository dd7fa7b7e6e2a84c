//! # Particle Renderer
//!
//! Draws the swarm's render feed as a point list with wgpu.

pub mod context;
pub mod error;
pub mod projection;
pub mod renderer;

pub use context::*;
pub use error::*;
pub use projection::*;
pub use renderer::*;
