mod metrics;
mod snapshots;

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use formic_core::sim::{FieldKind, SimulationWorld};
use formic_core::SimulationConfig;
use metrics::MetricsWriter;
use snapshots::SnapshotWriter;

#[derive(Parser)]
#[command(name = "formic-headless")]
#[command(about = "Headless CLI runner for formic foraging experiments")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Output directory for results
    #[arg(short, long, value_name = "DIR")]
    out: PathBuf,

    /// Override the configured step count
    #[arg(long)]
    steps: Option<u32>,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Loading configuration from {}", cli.config.display());
    let mut config: SimulationConfig =
        serde_yaml::from_str(&std::fs::read_to_string(&cli.config)?)?;
    if let Some(steps) = cli.steps {
        config.world.steps = steps;
    }

    if config.world.steps == 0 {
        anyhow::bail!("Step count must be greater than 0.");
    }
    if config.world.dt <= 0.0 {
        anyhow::bail!("Time step (dt) must be positive.");
    }
    if config.world.population == 0 {
        anyhow::bail!("Population must be greater than 0.");
    }
    config.validate()?;

    std::fs::create_dir_all(&cli.out)?;

    let mut world = SimulationWorld::new(&config)?;
    let mut metrics_writer = MetricsWriter::new(&cli.out)?;
    let snapshot_writer = SnapshotWriter::new(&cli.out);
    let snapshot_steps = [0, config.world.steps / 2, config.world.steps];

    println!("Starting simulation for {} steps...", config.world.steps);
    let start_time = Instant::now();

    for step in 0..=config.world.steps {
        let step_start = Instant::now();
        if step > 0 {
            world.tick(config.world.dt);
        }

        if step % 50 == 0 {
            let agent_stats = world.agent_stats();
            let to_food = world.field(FieldKind::ToFood).stats();
            let to_home = world.field(FieldKind::ToHome).stats();
            let step_time = step_start.elapsed();
            metrics_writer.write_step(step, &to_food, &to_home, &agent_stats, step_time)?;

            println!(
                "Step {}: carrying={} to_food.mean={:.5} to_home.mean={:.5} Time={:?}",
                step, agent_stats.carrying, to_food.mean, to_home.mean, step_time
            );
        }

        if snapshot_steps.contains(&step) {
            snapshot_writer.write_field_snapshot(step, "to_food", world.field(FieldKind::ToFood))?;
            snapshot_writer.write_field_snapshot(step, "to_home", world.field(FieldKind::ToHome))?;
            snapshot_writer.write_agents_snapshot(step, world.agents())?;
            println!("Snapshot written for step {}", step);
        }
    }

    let total_time = start_time.elapsed();
    println!("Simulation completed in {:?}", total_time);
    println!("Results written to {}", cli.out.display());

    Ok(())
}
