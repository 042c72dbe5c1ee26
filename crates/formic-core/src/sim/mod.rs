pub mod agents;
pub mod fields;
pub mod world;

pub use agents::{Agent, AgentStats};
pub use fields::{sample_probe, FieldKind, FieldStats, PheromoneField, WorldBounds};
pub use world::SimulationWorld;
