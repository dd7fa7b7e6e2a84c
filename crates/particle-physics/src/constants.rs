//! Tuning constants for the swarm force model
//!
//! These are the fixed values of the interaction rule. Only the particle count
//! and the maximum force magnitude are configurable at runtime.

/// Pairs further apart than this exert no force on each other
pub const MAX_INTERACTION_DISTANCE: f64 = 100_000.0;

/// Multiplier applied to `coefficient / distance` when computing a pair force
pub const FORCE_SCALE: f64 = 2.0;

/// Velocity decay applied to the first particle of every visited pair
pub const PAIR_DECAY: f32 = 0.5;

/// Velocity decay applied to every particle once per tick
pub const TICK_DAMPING: f32 = 0.99;

/// Width of the region random particles are spawned in
pub const SPAWN_WIDTH: f32 = 1920.0;

/// Height of the region random particles are spawned in
pub const SPAWN_HEIGHT: f32 = 1080.0;

/// Starting position of the reference particle (index 0)
pub const REFERENCE_POSITION: [f32; 2] = [100.0, 100.0];

/// Number of `f32` values per particle in the render feed: `x, y, r, g, b`
pub const FLOATS_PER_VERTEX: usize = 5;
