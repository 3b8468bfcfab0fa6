use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One grid position of a [`Board`](crate::Board).
///
/// `adjacent_mines` is fixed at generation time and only meaningful for safe cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub is_revealed: bool,
    pub is_flagged: bool,
}

impl Cell {
    pub const fn hidden((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            adjacent_mines: 0,
            is_revealed: false,
            is_flagged: false,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// A safe, never-revealed cell: the only kind that blocks a win.
    pub const fn is_hidden_safe(&self) -> bool {
        !self.is_mine && !self.is_revealed
    }

    /// Whether revealing this cell may continue into its neighbors.
    pub const fn is_blank(&self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }
}

/// Player-visible state of a cell, as handed to the rendering side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCell {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl PlayerCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for PlayerCell {
    fn default() -> Self {
        Self::Hidden
    }
}
