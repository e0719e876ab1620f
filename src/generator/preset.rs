use ndarray::Array2;

use super::MineGenerator;
use crate::{Coord2, GameConfig, ToNdIndex};

/// Fixed mine layout, used by tests and scripted boards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetMineGenerator {
    coords: Vec<Coord2>,
}

impl PresetMineGenerator {
    pub fn new(coords: impl Into<Vec<Coord2>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }
}

impl MineGenerator for PresetMineGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        let mut mask: Array2<bool> =
            Array2::default((config.rows() as usize, config.cols() as usize));

        for coords in self.coords {
            if coords.0 >= config.rows() || coords.1 >= config.cols() {
                log::warn!("preset mine at {coords:?} is outside the board, dropped");
                continue;
            }
            mask[coords.to_nd_index()] = true;
        }

        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_the_given_cells_and_drops_out_of_bounds_ones() {
        let config = GameConfig::new(3, 3, 2).unwrap();
        let mask = PresetMineGenerator::new([(0, 0), (2, 2), (9, 9)]).generate(config);

        assert!(mask[[0, 0]]);
        assert!(mask[[2, 2]]);
        assert_eq!(mask.iter().filter(|&&mine| mine).count(), 2);
    }
}
