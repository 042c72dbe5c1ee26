use glam::Vec2;

/// Square world region `[-half_extent, half_extent]` on both axes. Defines
/// both where agents may move and how world positions map onto field cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub half_extent: f32,
}

impl WorldBounds {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    /// Maps a world position to a grid cell, independently per axis:
    /// `cell = floor((pos + L) / (2L) * grid_size)`. Returns `None` when the
    /// position falls outside the grid on either axis.
    pub fn cell_for(&self, pos: Vec2, grid_size: u32) -> Option<(u32, u32)> {
        let span = 2.0 * self.half_extent;
        let gx = ((pos.x + self.half_extent) / span * grid_size as f32).floor();
        let gy = ((pos.y + self.half_extent) / span * grid_size as f32).floor();
        if gx < 0.0 || gx >= grid_size as f32 || gy < 0.0 || gy >= grid_size as f32 {
            return None;
        }
        Some((gx as u32, gy as u32))
    }
}

/// Which of the two trail fields to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Laid by returning agents, read by seeking agents.
    ToFood,
    /// Laid by seeking agents, read by returning agents.
    ToHome,
}

/// A fixed-resolution grid of non-negative trail intensities over the world
/// bounds. Single flat row-major allocation; never resized after creation.
///
/// Out-of-bounds access is a normal condition here, not an error: sampling
/// past the world edge reads zero and depositing there is dropped.
pub struct PheromoneField {
    size: u32,
    bounds: WorldBounds,
    data: Vec<f32>,
}

impl PheromoneField {
    pub fn new(size: u32, bounds: WorldBounds) -> Self {
        Self {
            size,
            bounds,
            data: vec![0.0; (size as usize) * (size as usize)],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.size + x) as usize
    }

    /// Intensity at a grid cell. Panics on out-of-grid indices; callers that
    /// start from world positions should go through [`sample`](Self::sample).
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Intensity at the cell containing a world position, or 0.0 when the
    /// position maps outside the grid.
    pub fn sample(&self, pos: Vec2) -> f32 {
        match self.bounds.cell_for(pos, self.size) {
            Some((x, y)) => self.get(x, y),
            None => 0.0,
        }
    }

    /// Adds `amount` to the cell containing a world position. Deposits that
    /// map outside the grid are silently discarded.
    pub fn deposit(&mut self, pos: Vec2, amount: f32) {
        if let Some((x, y)) = self.bounds.cell_for(pos, self.size) {
            let idx = self.index(x, y);
            self.data[idx] += amount;
        }
    }

    /// Multiplies every cell by `factor`. Applied once per tick, after all
    /// deposits for that tick are recorded.
    pub fn decay_all(&mut self, factor: f32) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Row-major cell values, `y * size + x`.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    pub fn stats(&self) -> FieldStats {
        let mut total = 0.0;
        let mut max = 0.0f32;
        let mut occupied = 0usize;
        for &value in &self.data {
            total += value;
            max = max.max(value);
            if value > 0.0 {
                occupied += 1;
            }
        }
        let count = self.data.len() as f32;
        FieldStats {
            mean: total / count,
            max,
            total,
            occupied_fraction: occupied as f32 / count,
        }
    }
}

/// Summary of a field sweep, for metrics output.
#[derive(Debug, Clone, Default)]
pub struct FieldStats {
    pub mean: f32,
    pub max: f32,
    pub total: f32,
    pub occupied_fraction: f32,
}

/// Probe sample used by the steering policy: the field intensity at
/// `position + direction * sense_distance`. All inputs explicit so the
/// sensing geometry is testable apart from the tick loop.
pub fn sample_probe(
    field: &PheromoneField,
    position: Vec2,
    direction: Vec2,
    sense_distance: f32,
) -> f32 {
    field.sample(position + direction * sense_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn field() -> PheromoneField {
        PheromoneField::new(128, WorldBounds::new(20.0))
    }

    #[test]
    fn cell_mapping_floors_per_axis() {
        let bounds = WorldBounds::new(20.0);
        assert_eq!(bounds.cell_for(Vec2::new(-20.0, -20.0), 128), Some((0, 0)));
        assert_eq!(bounds.cell_for(Vec2::new(0.0, 0.0), 128), Some((64, 64)));
        assert_eq!(
            bounds.cell_for(Vec2::new(19.99, 19.99), 128),
            Some((127, 127))
        );
        // +L maps exactly onto grid_size and is out.
        assert_eq!(bounds.cell_for(Vec2::new(20.0, 0.0), 128), None);
        assert_eq!(bounds.cell_for(Vec2::new(-20.01, 0.0), 128), None);
    }

    #[test]
    fn sample_out_of_bounds_reads_zero() {
        let mut f = field();
        f.deposit(Vec2::ZERO, 3.0);
        assert_eq!(f.sample(Vec2::new(25.0, 0.0)), 0.0);
        assert_eq!(f.sample(Vec2::new(0.0, -100.0)), 0.0);
        assert_eq!(f.sample(Vec2::ZERO), 3.0);
    }

    #[test]
    fn deposit_out_of_bounds_is_dropped() {
        let mut f = field();
        f.deposit(Vec2::new(20.0, 0.0), 5.0);
        f.deposit(Vec2::new(-31.0, 4.0), 5.0);
        assert!(f.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn decay_multiplies_every_cell_exactly() {
        let mut f = field();
        f.deposit(Vec2::new(1.0, 2.0), 4.0);
        f.deposit(Vec2::new(-8.0, 7.5), 2.0);
        let before: Vec<f32> = f.values().to_vec();
        f.decay_all(0.995);
        for (prev, now) in before.iter().zip(f.values()) {
            assert_eq!(*now, prev * 0.995);
        }
    }

    #[test]
    fn random_deposit_decay_sequence_stays_non_negative() {
        let mut f = field();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let pos = Vec2::new(rng.gen_range(-25.0..25.0), rng.gen_range(-25.0..25.0));
            f.deposit(pos, rng.gen_range(0.0..10.0));
            f.decay_all(rng.gen_range(0.9..0.9999));
        }
        assert!(f.values().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn probe_samples_ahead_of_position() {
        let mut f = field();
        let probe_point = Vec2::new(2.5, 0.0);
        f.deposit(probe_point, 1.5);
        let got = sample_probe(&f, Vec2::ZERO, Vec2::X, 2.5);
        assert_eq!(got, 1.5);
        // Opposite direction misses the deposit.
        assert_eq!(sample_probe(&f, Vec2::ZERO, -Vec2::X, 2.5), 0.0);
    }

    #[test]
    fn stats_sweep() {
        let mut f = PheromoneField::new(2, WorldBounds::new(1.0));
        f.deposit(Vec2::new(-0.5, -0.5), 4.0);
        let stats = f.stats();
        assert_eq!(stats.total, 4.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 1.0);
        assert_eq!(stats.occupied_fraction, 0.25);
    }
}
