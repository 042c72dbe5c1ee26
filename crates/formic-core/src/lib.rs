//! Formic core engine
//!
//! Host-side simulation of emergent ant foraging: a fixed population of
//! agents communicates indirectly through two decaying pheromone fields
//! (to-food / to-home) laid over a bounded 2D world.

pub mod sim;

pub use sim::*;

// Re-export params so hosts only need one dependency.
pub use formic_params::*;
