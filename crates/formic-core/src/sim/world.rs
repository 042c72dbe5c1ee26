use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use formic_params::{BehaviorParams, ParamError, SimulationConfig};

use super::agents::{spawn_colony, Agent, AgentStats};
use super::fields::{sample_probe, FieldKind, PheromoneField, WorldBounds};

/// Owns the full simulation state: the agent population, both pheromone
/// fields, the points of interest, the behavior parameters, and the RNG.
///
/// One call to [`tick`](Self::tick) advances everything by `dt` seconds:
/// each agent in index order runs proximity toggle, directional sensing,
/// turn, deposit, move, and boundary reflection; then both fields decay
/// exactly once.
pub struct SimulationWorld {
    bounds: WorldBounds,
    params: BehaviorParams,
    home: Vec2,
    food: Vec2,
    to_food: PheromoneField,
    to_home: PheromoneField,
    agents: Vec<Agent>,
    rng: ChaCha8Rng,
}

impl SimulationWorld {
    pub fn new(config: &SimulationConfig) -> Result<Self, ParamError> {
        config.validate()?;
        let bounds = WorldBounds::new(config.world.half_extent);
        let home = Vec2::from(config.world.home);
        let food = Vec2::from(config.world.food);
        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let agents = spawn_colony(config.world.population as usize, home, &mut rng);
        log::info!(
            "world created: {} agents, {}x{} grid, home {:?}, food {:?}",
            agents.len(),
            config.world.grid_size,
            config.world.grid_size,
            home,
            food
        );
        Ok(Self {
            bounds,
            params: config.behavior,
            home,
            food,
            to_food: PheromoneField::new(config.world.grid_size, bounds),
            to_home: PheromoneField::new(config.world.grid_size, bounds),
            agents,
            rng,
        })
    }

    /// Respawns the population at `home`, zeroes both fields, and reseeds
    /// the RNG. With `Some(seed)` the subsequent run is fully deterministic.
    pub fn reset(&mut self, population: usize, home: Vec2, food: Vec2, seed: Option<u64>) {
        self.rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.home = home;
        self.food = food;
        self.agents = spawn_colony(population, home, &mut self.rng);
        self.to_food.clear();
        self.to_home.clear();
        log::debug!("reset: {} agents at {:?}", population, home);
    }

    /// Advances the simulation by `dt` seconds. `dt` is assumed positive and
    /// sane; the host owns step-size policy.
    pub fn tick(&mut self, dt: f32) {
        for i in 0..self.agents.len() {
            let mut agent = self.agents[i];

            // Proximity state transitions, each gated by the carry flag so
            // at most one can fire per tick. Reversing the heading is the
            // "bounce back the way you came" cue.
            if !agent.carrying_food && agent.pos.distance(self.food) < self.params.detection_radius
            {
                agent.carrying_food = true;
                agent.heading = -agent.heading;
            } else if agent.carrying_food
                && agent.pos.distance(self.home) < self.params.detection_radius
            {
                agent.carrying_food = false;
                agent.heading = -agent.heading;
            }

            // Sensing uses the post-toggle state: returning agents read the
            // to-home field, seeking agents read the to-food field.
            let read_field = if agent.carrying_food {
                &self.to_home
            } else {
                &self.to_food
            };
            let current_angle = agent.heading.y.atan2(agent.heading.x);
            let turn = steer(
                read_field,
                agent.pos,
                current_angle,
                &self.params,
                &mut self.rng,
            );
            agent.heading = Vec2::from_angle(current_angle + turn);

            // Deposit at the pre-movement position, cross-wired: a returning
            // agent marks the to-food trail for seekers, and vice versa.
            let amount = self.params.deposit_rate * dt;
            if agent.carrying_food {
                self.to_food.deposit(agent.pos, amount);
            } else {
                self.to_home.deposit(agent.pos, amount);
            }

            agent.pos += agent.heading * dt * self.params.max_speed;

            // Elastic bounce off the world edge, per axis; a corner hit
            // reflects both components.
            let l = self.bounds.half_extent;
            if agent.pos.x < -l {
                agent.pos.x = -l;
                agent.heading.x = -agent.heading.x;
            }
            if agent.pos.x > l {
                agent.pos.x = l;
                agent.heading.x = -agent.heading.x;
            }
            if agent.pos.y < -l {
                agent.pos.y = -l;
                agent.heading.y = -agent.heading.y;
            }
            if agent.pos.y > l {
                agent.pos.y = l;
                agent.heading.y = -agent.heading.y;
            }

            self.agents[i] = agent;
        }

        self.to_food.decay_all(self.params.decay_factor);
        self.to_home.decay_all(self.params.decay_factor);
    }

    /// Read-only agent snapshot, one entry per agent in stable index order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn field(&self, kind: FieldKind) -> &PheromoneField {
        match kind {
            FieldKind::ToFood => &self.to_food,
            FieldKind::ToHome => &self.to_home,
        }
    }

    pub fn params(&self) -> &BehaviorParams {
        &self.params
    }

    /// Replaces the behavior parameters between ticks. Invalid values are
    /// rejected and the previous parameters stay in effect.
    pub fn set_params(&mut self, params: BehaviorParams) -> Result<(), ParamError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    pub fn food(&self) -> Vec2 {
        self.food
    }

    /// Points of interest may be relocated between ticks.
    pub fn set_home(&mut self, home: Vec2) {
        self.home = home;
    }

    pub fn set_food(&mut self, food: Vec2) {
        self.food = food;
    }

    pub fn agent_stats(&self) -> AgentStats {
        AgentStats::collect(&self.agents, self.home, self.food)
    }

    /// Overwrites one agent's state. Scenario setup hook for experiments and
    /// tests; the tick protocol itself never needs it.
    pub fn place_agent(&mut self, index: usize, pos: Vec2, heading: Vec2, carrying_food: bool) {
        let agent = &mut self.agents[index];
        agent.pos = pos;
        agent.heading = heading;
        agent.carrying_food = carrying_food;
    }
}

/// Turn decision from the three-probe sample, in radians.
///
/// The branch order is load-bearing: the forward branch compares with `>=`
/// against both neighbors, while an exact left/right tie that beats forward
/// falls through to a wider random turn independent of `wander_strength`.
/// This is not equivalent to "pick the max probe".
fn steer(
    field: &PheromoneField,
    pos: Vec2,
    current_angle: f32,
    params: &BehaviorParams,
    rng: &mut impl Rng,
) -> f32 {
    let forward = Vec2::from_angle(current_angle);
    let left = Vec2::from_angle(current_angle + params.sense_angle);
    let right = Vec2::from_angle(current_angle - params.sense_angle);

    let ahead = sample_probe(field, pos, forward, params.sense_distance);
    let to_left = sample_probe(field, pos, left, params.sense_distance);
    let to_right = sample_probe(field, pos, right, params.sense_distance);

    if ahead >= to_left && ahead >= to_right {
        rng.gen_range(-1.0..1.0) * params.wander_strength
    } else if to_left > to_right {
        params.sense_angle + rng.gen_range(-1.0..1.0) * params.wander_strength
    } else if to_right > to_left {
        -params.sense_angle + rng.gen_range(-1.0..1.0) * params.wander_strength
    } else {
        rng.gen_range(-1.0..1.0) * 0.1
    }
}
