use glam::Vec2;
use rand::Rng;

/// Magnitude of the random velocity agents spawn with.
const SPAWN_JITTER: f32 = 0.02;

/// Per-ant state. The heading is renormalized to unit length by the steering
/// step every tick; speed is applied separately at move time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub(crate) pos: Vec2,
    pub(crate) heading: Vec2,
    pub(crate) carrying_food: bool,
}

impl Agent {
    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    /// `false` while seeking food, `true` while returning home. Toggles only
    /// on proximity to the matching point of interest.
    pub fn is_carrying_food(&self) -> bool {
        self.carrying_food
    }
}

/// Spawns a full population at the nest, not carrying, each with a small
/// random initial velocity so the colony disperses instead of stacking.
pub fn spawn_colony(population: usize, home: Vec2, rng: &mut impl Rng) -> Vec<Agent> {
    let mut agents = Vec::with_capacity(population);
    for _ in 0..population {
        let heading = Vec2::new(
            rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER),
            rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER),
        );
        agents.push(Agent {
            pos: home,
            heading,
            carrying_food: false,
        });
    }
    agents
}

/// Population summary for metrics output.
#[derive(Debug, Clone, Default)]
pub struct AgentStats {
    pub carrying: u32,
    pub seeking: u32,
    pub mean_dist_home: f32,
    pub mean_dist_food: f32,
}

impl AgentStats {
    pub fn collect(agents: &[Agent], home: Vec2, food: Vec2) -> Self {
        if agents.is_empty() {
            return Self::default();
        }
        let mut carrying = 0u32;
        let mut dist_home = 0.0;
        let mut dist_food = 0.0;
        for agent in agents {
            if agent.carrying_food {
                carrying += 1;
            }
            dist_home += agent.pos.distance(home);
            dist_food += agent.pos.distance(food);
        }
        let count = agents.len() as f32;
        Self {
            carrying,
            seeking: agents.len() as u32 - carrying,
            mean_dist_home: dist_home / count,
            mean_dist_food: dist_food / count,
        }
    }
}
