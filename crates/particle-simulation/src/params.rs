//! Simulation parameters supplied by the configuration layer

/// Values the simulation consumes at startup
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    /// Total particle count, including the reference particle
    pub particle_count: usize,
    /// Coefficients are drawn from `(-max_force, max_force)`
    pub max_force: f64,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            particle_count: 500,
            max_force: 1.0,
            seed: None,
        }
    }
}
