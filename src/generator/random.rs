use ndarray::Array2;
use rand::prelude::*;

use super::MineGenerator;
use crate::{CellCount, Coord2, GameConfig, ToNdIndex};

/// Uniform placement by rejection sampling: draw a random cell, resample
/// on collision. Terminates with probability 1 while `mines < rows * cols`,
/// which [`GameConfig`] guarantees; the resample cost grows as the board
/// fills up, an accepted property of the scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        let mut mask: Array2<bool> =
            Array2::default((config.rows() as usize, config.cols() as usize));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;

        while placed < config.mines() {
            let coords: Coord2 = (
                rng.random_range(0..config.rows()),
                rng.random_range(0..config.cols()),
            );
            let cell = &mut mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        mask
    }
}
