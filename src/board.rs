use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{
    CellCount, Coord2, GameConfig, GameError, MineGenerator, NeighborIterExt, Result, Tile,
    ToNdIndex,
};

/// Owns the tile grid and the algorithmic core: mine placement, adjacency
/// risk, flood-fill reveal, and the termination predicates.
///
/// Adjacency counts every tile's 8 surrounding positions, but flood-fill
/// expands only through the 4 orthogonal ones. The asymmetry is deliberate:
/// a blank region reachable only diagonally stays closed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
    mine_count: CellCount,
    opened_count: CellCount,
    flagged_count: CellCount,
}

/// What a single reveal did to the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RevealSweep {
    /// Newly opened tiles with their adjacency numbers.
    pub(crate) opened: Vec<(Coord2, u8)>,
    pub(crate) hit_mine: bool,
}

impl Board {
    pub(crate) fn generate(config: GameConfig, generator: impl MineGenerator) -> Self {
        Self::from_mine_mask(config, generator.generate(config))
    }

    fn from_mine_mask(config: GameConfig, mask: Array2<bool>) -> Self {
        let mine_count = mask.iter().filter(|&&mine| mine).count() as CellCount;
        if mine_count != config.mines() {
            log::warn!(
                "mine mask holds {mine_count} mines, requested {}",
                config.mines()
            );
        }

        let tiles = mask.map(|&is_mine| Tile {
            is_mine,
            ..Tile::default()
        });
        let mut board = Self {
            tiles,
            mine_count,
            opened_count: 0,
            flagged_count: 0,
        };
        board.compute_adjacency();
        board
    }

    /// Stores the 8-neighbor mine count on every tile. Runs exactly once,
    /// strictly after the full mine mask is in place; a partial mask would
    /// yield undercounts.
    fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let count = self
                    .tiles
                    .iter_ring((row, col))
                    .filter(|&pos| self.tiles[pos.to_nd_index()].is_mine)
                    .count() as u8;
                self.tiles[(row, col).to_nd_index()].adjacent_mines = count;
            }
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (
            dim.0.try_into().expect("board dimension exceeds Coord"),
            dim.1.try_into().expect("board dimension exceeds Coord"),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Outstanding flag budget: mine count minus flags currently placed.
    /// Negative when the player holds more flags than mines exist.
    pub fn flags_remaining(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flagged_count)
    }

    /// True iff every non-mine tile is already opened, i.e. no further
    /// productive reveal remains. Cheap readiness gate for win evaluation.
    pub fn is_end_possible(&self) -> bool {
        self.opened_count == self.safe_cell_count()
    }

    /// Layout inspection for finished-game rendering and tests; never
    /// consult this to drive play decisions.
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.tiles[coords.to_nd_index()].is_mine
    }

    pub(crate) fn all_mines_flagged(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| !tile.is_mine || tile.is_flagged)
    }

    pub(crate) fn mine_coords(&self) -> Vec<Coord2> {
        self.tiles
            .indexed_iter()
            .filter(|(_, tile)| tile.is_mine)
            .map(|((row, col), _)| (row as crate::Coord, col as crate::Coord))
            .collect()
    }

    pub(crate) fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Opens the target tile. A mine ends the sweep immediately; a blank
    /// tile (adjacency 0) floods through connected blanks via an explicit
    /// worklist, opening each blank's orthogonal neighbors as it goes; a
    /// numbered tile opens alone.
    pub(crate) fn reveal(&mut self, coords: Coord2) -> Result<RevealSweep> {
        let coords = self.validate_coords(coords)?;
        let target = self.tiles[coords.to_nd_index()];
        if !target.can_open() {
            return Err(GameError::InvalidTargetState);
        }

        if target.is_mine {
            self.tiles[coords.to_nd_index()].is_open = true;
            return Ok(RevealSweep {
                opened: Vec::new(),
                hit_mine: true,
            });
        }

        let mut opened = Vec::new();
        let mut worklist = VecDeque::from([coords]);
        while let Some(pos) = worklist.pop_front() {
            let idx = pos.to_nd_index();
            if !self.tiles[idx].can_open() {
                continue;
            }
            self.tiles[idx].is_open = true;
            self.opened_count += 1;

            let adjacent = self.tiles[idx].adjacent_mines;
            opened.push((pos, adjacent));

            // Blanks border no mines, so every neighbor pushed here is safe.
            if adjacent == 0 {
                worklist.extend(
                    self.tiles
                        .iter_orthogonal(pos)
                        .filter(|&next| self.tiles[next.to_nd_index()].can_open()),
                );
            }
        }

        Ok(RevealSweep {
            opened,
            hit_mine: false,
        })
    }

    /// Flips the flag on an unopened tile and keeps the flag budget current.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let idx = coords.to_nd_index();
        if self.tiles[idx].is_open {
            return Err(GameError::InvalidTargetState);
        }

        let now_flagged = !self.tiles[idx].is_flagged;
        self.tiles[idx].is_flagged = now_flagged;
        if now_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(now_flagged)
    }
}
