//! Shared parameter types for the formic foraging simulation
//!
//! These structures are used by both the core engine and the headless runner
//! so the two cannot drift apart. All values are validated at the boundary:
//! a `SimulationWorld` refuses to be built from (or updated with) a config
//! that fails [`SimulationConfig::validate`].

use serde::{Deserialize, Serialize};

/// Rejected configuration value. The simulation never clamps or repairs a
/// bad parameter; it reports it and leaves the previous state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("{name} must be {requirement}, got {value}")]
    OutOfRange {
        name: &'static str,
        requirement: &'static str,
        value: f32,
    },
    #[error("grid_size must be at least 1")]
    EmptyGrid,
}

impl ParamError {
    fn out_of_range(name: &'static str, requirement: &'static str, value: f32) -> Self {
        Self::OutOfRange {
            name,
            requirement,
            value,
        }
    }
}

/// Steering and pheromone tuning, adjustable between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorParams {
    /// World units per second at full speed.
    pub max_speed: f32,
    /// Distance from the agent to each of the three probe points.
    pub sense_distance: f32,
    /// Half-cone of the left/right probes, radians, in (0, pi).
    pub sense_angle: f32,
    /// Proximity threshold for picking up food / dropping it at home.
    pub detection_radius: f32,
    /// Scale of the random turn noise, radians.
    pub wander_strength: f32,
    /// Per-tick multiplicative retention of field intensity, in (0, 1).
    pub decay_factor: f32,
    /// Field intensity deposited per second of agent presence.
    pub deposit_rate: f32,
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self {
            max_speed: 0.4,
            sense_distance: 2.5,
            sense_angle: 0.5,
            detection_radius: 2.5,
            wander_strength: 0.08,
            decay_factor: 0.995,
            deposit_rate: 10.0,
        }
    }
}

impl BehaviorParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.max_speed > 0.0) {
            return Err(ParamError::out_of_range(
                "max_speed",
                "positive",
                self.max_speed,
            ));
        }
        if !(self.sense_distance > 0.0) {
            return Err(ParamError::out_of_range(
                "sense_distance",
                "positive",
                self.sense_distance,
            ));
        }
        if !(self.sense_angle > 0.0 && self.sense_angle < std::f32::consts::PI) {
            return Err(ParamError::out_of_range(
                "sense_angle",
                "in (0, pi)",
                self.sense_angle,
            ));
        }
        if !(self.detection_radius > 0.0) {
            return Err(ParamError::out_of_range(
                "detection_radius",
                "positive",
                self.detection_radius,
            ));
        }
        if !(self.wander_strength > 0.0) {
            return Err(ParamError::out_of_range(
                "wander_strength",
                "positive",
                self.wander_strength,
            ));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(ParamError::out_of_range(
                "decay_factor",
                "in (0, 1)",
                self.decay_factor,
            ));
        }
        if !(self.deposit_rate > 0.0) {
            return Err(ParamError::out_of_range(
                "deposit_rate",
                "positive",
                self.deposit_rate,
            ));
        }
        Ok(())
    }
}

/// World geometry, population and run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// The world is the square [-half_extent, half_extent] on both axes.
    pub half_extent: f32,
    /// Field resolution per axis; fixed for the world's lifetime.
    pub grid_size: u32,
    /// Number of agents; fixed for a run.
    pub population: u32,
    /// Nest location.
    pub home: [f32; 2],
    /// Food source location.
    pub food: [f32; 2],
    /// RNG seed for deterministic runs.
    pub seed: u64,
    /// Step count for the headless runner.
    pub steps: u32,
    /// Simulation step for the headless runner, seconds.
    pub dt: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_extent: 20.0,
            grid_size: 128,
            population: 500,
            home: [-10.0, 0.0],
            food: [10.0, 10.0],
            seed: 1337,
            steps: 2000,
            dt: 0.01,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.half_extent > 0.0) {
            return Err(ParamError::out_of_range(
                "half_extent",
                "positive",
                self.half_extent,
            ));
        }
        if self.grid_size == 0 {
            return Err(ParamError::EmptyGrid);
        }
        Ok(())
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub behavior: BehaviorParams,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ParamError> {
        self.world.validate()?;
        self.behavior.validate()
    }
}
