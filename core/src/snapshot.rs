use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the rendering side gets after every move: the visible grid plus session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub size: Coord2,
    pub status: GameStatus,
    pub elapsed: u32,
    pub mines_left: isize,
    pub best_record: Option<u32>,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<PlayerCell>,
}

impl SessionSnapshot {
    pub fn from_session<G: BoardGenerator>(session: &GameSession<G>) -> Self {
        let status = session.status();
        let cells = visible_cells(session.board(), status);

        Self {
            difficulty: session.difficulty(),
            size: session.board().size(),
            status,
            elapsed: session.elapsed(),
            mines_left: session.mines_left(),
            best_record: session.best_record(session.difficulty()),
            triggered_mine: session.triggered_mine(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<PlayerCell> {
        self.cells
            .get(coords.to_nd_index())
            .copied()
            .ok_or(GameError::InvalidCoords)
    }
}

/// Mines stay hidden while playing, are uncovered on a loss and shown flagged on a win.
pub fn visible_cells(board: &Board, status: GameStatus) -> Array2<PlayerCell> {
    let mut cells = Array2::default(board.size().to_nd_index());

    for cell in board.iter_cells() {
        cells[cell.coords().to_nd_index()] = match (status, cell) {
            (_, Cell { is_revealed: true, is_mine: true, .. }) => PlayerCell::Mine,
            (_, Cell { is_revealed: true, adjacent_mines, .. }) => PlayerCell::Revealed(*adjacent_mines),
            (GameStatus::Lost, Cell { is_mine: true, .. }) => PlayerCell::Mine,
            (GameStatus::Won, Cell { is_mine: true, .. }) => PlayerCell::Flagged,
            (_, Cell { is_flagged: true, .. }) => PlayerCell::Flagged,
            _ => PlayerCell::Hidden,
        };
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn in_progress_hides_mines() {
        let board = layout((2, 2), &[(0, 0)])
            .reveal((1, 1))
            .unwrap()
            .toggle_flag((0, 1))
            .unwrap();

        let cells = visible_cells(&board, GameStatus::InProgress);

        assert_eq!(cells[[0, 0]], PlayerCell::Hidden);
        assert_eq!(cells[[0, 1]], PlayerCell::Flagged);
        assert_eq!(cells[[1, 1]], PlayerCell::Revealed(1));
        assert_eq!(cells[[1, 0]], PlayerCell::Hidden);
    }

    #[test]
    fn loss_uncovers_mines() {
        let board = layout((1, 3), &[(0, 0), (0, 2)]).reveal((0, 2)).unwrap();

        let cells = visible_cells(&board, GameStatus::Lost);

        assert_eq!(cells[[0, 0]], PlayerCell::Mine);
        assert_eq!(cells[[0, 1]], PlayerCell::Hidden);
        assert_eq!(cells[[0, 2]], PlayerCell::Mine);
    }

    #[test]
    fn win_shows_mines_flagged() {
        let board = layout((1, 2), &[(0, 0)]).reveal((0, 1)).unwrap();

        let cells = visible_cells(&board, GameStatus::Won);

        assert_eq!(cells[[0, 0]], PlayerCell::Flagged);
        assert_eq!(cells[[0, 1]], PlayerCell::Revealed(1));
    }

    #[test]
    fn snapshot_reports_session_state() {
        let mut session = GameSession::seeded(
            DifficultyTable::default(),
            Difficulty::Medium,
            11,
            BestRecords::new(),
        )
        .unwrap();
        session.tick();
        session.toggle_flag((3, 4)).unwrap();

        let snapshot = session.snapshot();

        assert_eq!(snapshot.difficulty, Difficulty::Medium);
        assert_eq!(snapshot.size, (16, 16));
        assert_eq!(snapshot.status, GameStatus::InProgress);
        assert_eq!(snapshot.elapsed, 1);
        assert_eq!(snapshot.mines_left, 39);
        assert_eq!(snapshot.best_record, None);
        assert_eq!(snapshot.cell_at((3, 4)), Ok(PlayerCell::Flagged));
        assert_eq!(snapshot.cell_at((16, 0)), Err(GameError::InvalidCoords));
    }
}
