use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable snapshot of a whole grid.
///
/// Reveal and flag operations return a new `Board`, the receiver is left untouched.
///
/// Serialized as its size plus row-major cells, deserializing goes through [`Board::from_cells`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardRepr", try_from = "BoardRepr")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    size: Coord2,
    cells: Vec<Cell>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        Self {
            size: board.size(),
            cells: board.cells.iter().copied().collect(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        Self::from_cells(repr.size, repr.cells)
    }
}

impl Board {
    /// Builds a board from a row-major mine mask, computing adjacency counts once.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let (rows, cols) = mine_mask.dim();
        let size: Coord2 = (rows as Coord, cols as Coord);

        let cells = Array2::from_shape_fn((rows, cols), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let mut cell = Cell::hidden(coords);
            if mine_mask[coords.to_nd_index()] {
                cell.is_mine = true;
            } else {
                cell.adjacent_mines = NeighborIter::new(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
            }
            cell
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Self { cells, mine_count }
    }

    /// Places mines at exactly the given coordinates, duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= rows || coords.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let board = Self::from_mine_mask(&mine_mask);
        if board.mine_count >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }
        Ok(board)
    }

    /// Restores a board from row-major cells, e.g. a saved or replayed snapshot.
    ///
    /// Cell coordinates and adjacency counts must agree with the layout.
    pub fn from_cells(size: Coord2, cells: Vec<Cell>) -> Result<Self> {
        let (rows, cols) = size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let cells = Array2::from_shape_vec(size.to_nd_index(), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        let mine_mask = cells.map(|cell| cell.is_mine);
        let layout = Self::from_mine_mask(&mine_mask);

        let consistent = cells.iter().zip(layout.cells.iter()).all(|(given, expected)| {
            given.coords() == expected.coords()
                && (given.is_mine || given.adjacent_mines == expected.adjacent_mines)
                && !(given.is_revealed && given.is_flagged)
        });
        if !consistent {
            return Err(GameError::InvalidBoardShape);
        }
        if layout.mine_count >= mult(rows, cols) {
            return Err(GameError::TooManyMines);
        }

        Ok(Self {
            cells,
            mine_count: layout.mine_count,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn config(&self) -> GameConfig {
        let (rows, cols) = self.size();
        GameConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    /// Mines minus placed flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count() as isize)
    }

    pub fn hidden_safe_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_hidden_safe()).count() as CellCount
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// Cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn adjacency_counts_match_layout() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board[(1, 1)].adjacent_mines, 2);
        assert_eq!(board[(0, 1)].adjacent_mines, 1);
        assert_eq!(board[(0, 2)].adjacent_mines, 0);
        assert_eq!(board[(2, 0)].adjacent_mines, 0);
        assert!(board[(0, 0)].is_mine);
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let board = Board::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(board.mine_count(), 1);
    }

    #[test]
    fn from_mine_coords_rejects_bad_input() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Board::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(Board::from_mine_coords((0, 2), &[]), Err(GameError::EmptyBoard));
    }

    #[test]
    fn cells_know_their_coordinates() {
        let board = Board::from_mine_coords((2, 3), &[]).unwrap();

        let coords: Vec<_> = board.iter_cells().map(Cell::coords).collect();

        assert_eq!(coords, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn cell_lookup_fails_fast_out_of_bounds() {
        let board = Board::from_mine_coords((2, 3), &[]).unwrap();

        assert_eq!(board.cell((1, 3)), Err(GameError::InvalidCoords));
        assert_eq!(board.cell((1, 2)).map(Cell::coords), Ok((1, 2)));
    }

    #[test]
    fn from_cells_restores_a_snapshot() {
        let board = Board::from_mine_coords((2, 2), &[(0, 1)]).unwrap();
        let cells: Vec<_> = board.iter_cells().copied().collect();

        assert_eq!(Board::from_cells((2, 2), cells), Ok(board));
    }

    #[test]
    fn from_cells_rejects_inconsistent_input() {
        let board = Board::from_mine_coords((2, 2), &[(0, 1)]).unwrap();
        let cells: Vec<_> = board.iter_cells().copied().collect();

        assert_eq!(
            Board::from_cells((3, 2), cells.clone()),
            Err(GameError::InvalidBoardShape)
        );

        let mut wrong_count = cells.clone();
        wrong_count[0].adjacent_mines = 3;
        assert_eq!(
            Board::from_cells((2, 2), wrong_count),
            Err(GameError::InvalidBoardShape)
        );

        let mut swapped = cells;
        swapped.swap(0, 3);
        assert_eq!(
            Board::from_cells((2, 2), swapped),
            Err(GameError::InvalidBoardShape)
        );

        let all_mines = vec![
            Cell { is_mine: true, ..Cell::hidden((0, 0)) },
            Cell { is_mine: true, ..Cell::hidden((0, 1)) },
        ];
        assert_eq!(
            Board::from_cells((1, 2), all_mines),
            Err(GameError::TooManyMines)
        );
    }

    #[test]
    fn deserialize_validates_cells() {
        let board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(serde_json::from_value::<Board>(json.clone()).unwrap(), board);

        let mut stale = json.clone();
        stale["cells"][3]["adjacent_mines"] = serde_json::json!(7);
        assert!(serde_json::from_value::<Board>(stale).is_err());

        let mut resized = json.clone();
        resized["size"] = serde_json::json!([1, 4]);
        assert!(serde_json::from_value::<Board>(resized).is_err());

        let mut too_large = json;
        too_large["size"] = serde_json::json!([300, 2]);
        assert!(serde_json::from_value::<Board>(too_large).is_err());
    }
}
