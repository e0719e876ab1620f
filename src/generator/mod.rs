use ndarray::Array2;

use crate::GameConfig;

pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Produces the hidden mine mask for a board. Adjacency is derived from
/// the finished mask afterwards, never from a partially generated one.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool>;
}
