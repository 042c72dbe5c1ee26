use formic_core::sim::{FieldKind, SimulationWorld};
use formic_core::{BehaviorParams, SimulationConfig};
use glam::Vec2;

/// Small deterministic colony with near-zero turn noise, so scenario tests
/// can reason about headings.
fn quiet_config(population: u32) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.population = population;
    config.world.seed = 42;
    config.behavior.wander_strength = 1e-6;
    config
}

#[test]
fn seeded_runs_are_identical() {
    let mut config = SimulationConfig::default();
    config.world.population = 100;
    config.world.seed = 1234;

    let mut a = SimulationWorld::new(&config).unwrap();
    let mut b = SimulationWorld::new(&config).unwrap();
    for _ in 0..50 {
        a.tick(0.01);
        b.tick(0.01);
    }

    assert_eq!(a.agents(), b.agents());
    assert_eq!(
        a.field(FieldKind::ToFood).values(),
        b.field(FieldKind::ToFood).values()
    );
    assert_eq!(
        a.field(FieldKind::ToHome).values(),
        b.field(FieldKind::ToHome).values()
    );
}

#[test]
fn agents_stay_in_bounds_with_unit_headings() {
    let mut config = SimulationConfig::default();
    config.world.population = 50;
    config.behavior.max_speed = 5.0;
    let mut world = SimulationWorld::new(&config).unwrap();

    let l = world.bounds().half_extent;
    for _ in 0..200 {
        world.tick(0.5);
        for agent in world.agents() {
            let pos = agent.position();
            assert!(pos.x >= -l && pos.x <= l, "x out of bounds: {pos:?}");
            assert!(pos.y >= -l && pos.y <= l, "y out of bounds: {pos:?}");
            assert!(
                (agent.heading().length() - 1.0).abs() < 1e-4,
                "heading not unit length: {:?}",
                agent.heading()
            );
        }
    }
}

#[test]
fn entering_food_radius_picks_up_and_reverses() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    world.reset(1, Vec2::ZERO, Vec2::new(5.0, 0.0), Some(7));

    let pre_heading = Vec2::new(0.8, 0.6);
    world.place_agent(0, Vec2::new(4.6, 0.0), pre_heading, false);
    world.tick(0.01);

    let agent = &world.agents()[0];
    assert!(agent.is_carrying_food());
    // Fields are empty, so the only turn applied after the reversal is the
    // near-zero wander noise.
    assert!(agent.heading().dot(-pre_heading) > 0.999);
}

#[test]
fn entering_home_radius_drops_off_and_reverses() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    world.reset(1, Vec2::new(-5.0, 0.0), Vec2::new(15.0, 15.0), Some(7));

    let pre_heading = Vec2::new(-1.0, 0.0);
    world.place_agent(0, Vec2::new(-4.0, 0.0), pre_heading, true);
    world.tick(0.01);

    let agent = &world.agents()[0];
    assert!(!agent.is_carrying_food());
    assert!(agent.heading().dot(-pre_heading) > 0.999);
}

#[test]
fn seeker_deposit_lands_in_one_to_home_cell_then_decays() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    // Default POIs are far from (0.1, 0.1); no toggle fires.
    world.place_agent(0, Vec2::new(0.1, 0.1), Vec2::new(1.0, 0.0), false);
    world.tick(0.01);

    // Deposit then decay, in that order.
    let expected = (10.0f32 * 0.01) * 0.995;
    let to_home = world.field(FieldKind::ToHome);
    assert_eq!(to_home.get(64, 64), expected);
    let total: f32 = to_home.values().iter().sum();
    assert_eq!(total, expected, "exactly one cell should hold the deposit");

    // Cross-wiring: a seeking agent never writes the to-food field.
    assert!(world
        .field(FieldKind::ToFood)
        .values()
        .iter()
        .all(|&v| v == 0.0));
}

#[test]
fn carrier_deposits_into_to_food_field() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    // Away from home so the drop-off branch cannot fire.
    world.place_agent(0, Vec2::new(3.0, -2.0), Vec2::new(0.0, 1.0), true);
    world.tick(0.01);

    let to_food: f32 = world.field(FieldKind::ToFood).values().iter().sum();
    let to_home: f32 = world.field(FieldKind::ToHome).values().iter().sum();
    assert!(to_food > 0.0);
    assert_eq!(to_home, 0.0);
}

#[test]
fn carrier_steers_toward_trail_laid_by_seekers() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    let sense_angle = world.params().sense_angle;
    let sense_distance = world.params().sense_distance;

    // A seeking agent parked exactly at the left probe point marks the
    // to-home trail there.
    let left_probe = Vec2::from_angle(sense_angle) * sense_distance;
    world.place_agent(0, left_probe, Vec2::new(1.0, 0.0), false);
    world.tick(0.01);

    // A returning agent at the origin now reads that mark with its left
    // probe and turns onto it.
    world.place_agent(0, Vec2::ZERO, Vec2::new(1.0, 0.0), true);
    world.tick(0.01);

    let heading = world.agents()[0].heading();
    let angle = heading.y.atan2(heading.x);
    assert!(
        (angle - sense_angle).abs() < 1e-3,
        "expected a left turn of ~{sense_angle}, got {angle}"
    );
}

#[test]
fn agent_on_the_edge_is_clamped_and_reflected() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    let l = world.bounds().half_extent;
    world.place_agent(0, Vec2::new(l, 0.0), Vec2::new(1.0, 0.0), false);
    world.tick(0.01);

    let agent = &world.agents()[0];
    assert_eq!(agent.position().x, l);
    assert!(agent.heading().x < 0.0);
}

#[test]
fn empty_population_ticks_without_panicking() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    world.reset(0, Vec2::ZERO, Vec2::new(5.0, 5.0), Some(1));
    world.tick(0.01);
    world.tick(10.0);

    assert!(world.agents().is_empty());
    assert!(world
        .field(FieldKind::ToFood)
        .values()
        .iter()
        .all(|&v| v == 0.0));
}

#[test]
fn reset_with_same_seed_reproduces_spawn() {
    let config = quiet_config(20);
    let mut world = SimulationWorld::new(&config).unwrap();
    world.tick(0.01);

    world.reset(20, Vec2::new(-10.0, 0.0), Vec2::new(10.0, 10.0), Some(42));
    let first: Vec<_> = world.agents().to_vec();
    world.reset(20, Vec2::new(-10.0, 0.0), Vec2::new(10.0, 10.0), Some(42));
    assert_eq!(world.agents(), &first[..]);
    assert!(world
        .field(FieldKind::ToHome)
        .values()
        .iter()
        .all(|&v| v == 0.0));
}

#[test]
fn invalid_params_are_rejected_and_state_kept() {
    let mut world = SimulationWorld::new(&quiet_config(1)).unwrap();
    let good = *world.params();

    let mut bad = good;
    bad.decay_factor = 1.5;
    assert!(world.set_params(bad).is_err());
    assert_eq!(world.params(), &good);

    let mut bad_config = SimulationConfig::default();
    bad_config.behavior = BehaviorParams {
        sense_distance: -2.0,
        ..BehaviorParams::default()
    };
    assert!(SimulationWorld::new(&bad_config).is_err());
}
