//! Logic core of a grid-based mine-sweeping puzzle.
//!
//! Owns board state, hidden mine placement, per-cell adjacency risk,
//! flood-fill reveals, and win/loss termination. A front end constructs a
//! [`GameSession`], forwards the player's reveal/flag actions, and renders
//! the returned reports; everything visual lives outside this crate.
//!
//! All operations are synchronous and run to completion on the calling
//! thread. A session has no interior mutability, so concurrent front ends
//! must serialize mutating calls externally.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod session;
mod tile;
mod types;

/// Static configuration of one playthrough: grid shape and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    /// Both dimensions must be positive and `0 < mines < rows * cols`; a
    /// board with no free cell could never be won.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines == 0 || mines >= mult(rows, cols) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}
