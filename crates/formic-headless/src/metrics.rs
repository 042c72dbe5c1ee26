use csv::Writer;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

use formic_core::sim::{AgentStats, FieldStats};

/// Appends one CSV record per sampled step to `metrics.csv`.
pub struct MetricsWriter {
    csv_writer: Writer<File>,
}

impl MetricsWriter {
    pub fn new(output_dir: &Path) -> Result<Self, anyhow::Error> {
        let csv_path = output_dir.join("metrics.csv");
        let file = File::create(&csv_path)?;
        let mut csv_writer = Writer::from_writer(file);

        csv_writer.write_record([
            "step",
            "to_food_mean",
            "to_food_max",
            "to_food_total",
            "to_food_occupied",
            "to_home_mean",
            "to_home_max",
            "to_home_total",
            "to_home_occupied",
            "carrying",
            "seeking",
            "mean_dist_home",
            "mean_dist_food",
            "wall_time_ms",
        ])?;

        Ok(Self { csv_writer })
    }

    pub fn write_step(
        &mut self,
        step: u32,
        to_food: &FieldStats,
        to_home: &FieldStats,
        agents: &AgentStats,
        step_time: Duration,
    ) -> Result<(), anyhow::Error> {
        let wall_time_ms = step_time.as_secs_f64() * 1000.0;

        self.csv_writer.write_record([
            step.to_string(),
            to_food.mean.to_string(),
            to_food.max.to_string(),
            to_food.total.to_string(),
            to_food.occupied_fraction.to_string(),
            to_home.mean.to_string(),
            to_home.max.to_string(),
            to_home.total.to_string(),
            to_home.occupied_fraction.to_string(),
            agents.carrying.to_string(),
            agents.seeking.to_string(),
            agents.mean_dist_home.to_string(),
            agents.mean_dist_food.to_string(),
            wall_time_ms.to_string(),
        ])?;

        self.csv_writer.flush()?;
        Ok(())
    }
}
