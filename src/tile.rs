use serde::{Deserialize, Serialize};

/// Atomic unit of board state, addressed by `(row, col)`.
///
/// `is_mine` and `adjacent_mines` are fixed during board construction;
/// `is_open` only ever transitions false to true; `is_flagged` toggles
/// freely until the tile is opened.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) is_open: bool,
    pub(crate) is_flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Tile {
    /// Admission test for reveal and flood-fill: not opened and not held
    /// by a flag.
    pub const fn can_open(self) -> bool {
        !self.is_open && !self.is_flagged
    }

    pub const fn is_open(self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Mine count among the 8 surrounding positions, in `[0, 8]`.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }
}

/// Presentation-facing snapshot of one tile.
///
/// `is_mine` stays `None` while the session is in progress so a front end
/// cannot leak the layout by inspection; it is populated once the session
/// reaches a terminal outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub is_open: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
    pub is_mine: Option<bool>,
}
