//! Simulation dynamics: force accumulation and time integration.

pub mod forces;
pub mod integrator;

pub use integrator::Integrator;
