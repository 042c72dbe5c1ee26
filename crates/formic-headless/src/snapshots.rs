use anyhow::Result;
use csv::Writer;
use image::{GrayImage, Luma};
use std::fs::File;
use std::path::{Path, PathBuf};

use formic_core::sim::{Agent, PheromoneField};

/// Writes field intensities as grayscale PNGs and agent state as CSV.
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Normalized grayscale image of one field, `<name>_<step>.png`.
    /// Intensities are scaled by the field's max so faint trails stay visible.
    pub fn write_field_snapshot(
        &self,
        step: u32,
        name: &str,
        field: &PheromoneField,
    ) -> Result<()> {
        let filename = format!("{}_{:04}.png", name, step);
        let filepath = self.output_dir.join(&filename);

        let size = field.size();
        let max = field
            .values()
            .iter()
            .fold(0.0f32, |acc, &v| acc.max(v))
            .max(f32::MIN_POSITIVE);

        let mut img = GrayImage::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let value = field.get(x, y) / max;
                img.put_pixel(x, y, Luma([(value * 255.0).clamp(0.0, 255.0) as u8]));
            }
        }

        img.save(&filepath)?;
        Ok(())
    }

    /// Agent positions, headings and carry state, `agents_<step>.csv`.
    pub fn write_agents_snapshot(&self, step: u32, agents: &[Agent]) -> Result<()> {
        let filename = format!("agents_{:04}.csv", step);
        let filepath = self.output_dir.join(&filename);

        let file = File::create(&filepath)?;
        let mut csv_writer = Writer::from_writer(file);

        csv_writer.write_record(["id", "x", "y", "hx", "hy", "carrying"])?;

        for (i, agent) in agents.iter().enumerate() {
            let pos = agent.position();
            let heading = agent.heading();
            csv_writer.write_record([
                i.to_string(),
                pos.x.to_string(),
                pos.y.to_string(),
                heading.x.to_string(),
                heading.y.to_string(),
                (agent.is_carrying_food() as u8).to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
