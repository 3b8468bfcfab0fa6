use alloc::collections::VecDeque;

use crate::*;

impl Board {
    /// Reveals the cell at `coords`, flood-filling through blank cells.
    pub fn reveal(&self, coords: Coord2) -> Result<Board> {
        self.reveal_with_outcome(coords).map(|(board, _)| board)
    }

    pub fn reveal_with_outcome(&self, coords: Coord2) -> Result<(Board, RevealOutcome)> {
        let coords = self.validate_coords(coords)?;
        let mut next = self.clone();
        let outcome = next.open_cell(coords);
        Ok((next, outcome))
    }

    /// Flips the flag on a hidden cell, revealed cells are left as they are.
    pub fn toggle_flag(&self, coords: Coord2) -> Result<Board> {
        self.toggle_flag_with_outcome(coords).map(|(board, _)| board)
    }

    pub fn toggle_flag_with_outcome(&self, coords: Coord2) -> Result<(Board, MarkOutcome)> {
        let coords = self.validate_coords(coords)?;
        let mut next = self.clone();

        let cell = next.cell_mut(coords);
        if cell.is_revealed {
            return Ok((next, MarkOutcome::NoChange));
        }
        cell.is_flagged = !cell.is_flagged;
        log::trace!("Flag at {:?} set to {}", coords, cell.is_flagged);

        Ok((next, MarkOutcome::Changed))
    }

    /// Every safe cell is revealed, flags are not considered.
    pub fn check_win(&self) -> bool {
        self.iter_cells().all(|cell| !cell.is_hidden_safe())
    }

    fn open_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cell_mut(coords);
        if cell.is_revealed || cell.is_flagged {
            return RevealOutcome::NoChange;
        }

        cell.is_revealed = true;
        if cell.is_mine {
            log::debug!("Revealed mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }
        log::debug!(
            "Open cell at {:?}, mine count: {}",
            coords,
            cell.adjacent_mines
        );

        if cell.is_blank() {
            // cells are marked revealed when queued, so each one enters at most once
            let mut to_visit = VecDeque::from([coords]);
            while let Some(visit_coords) = to_visit.pop_front() {
                for pos in self.neighbors(visit_coords) {
                    let neighbor = self.cell_mut(pos);
                    if neighbor.is_revealed || neighbor.is_flagged || neighbor.is_mine {
                        continue;
                    }

                    neighbor.is_revealed = true;
                    log::trace!(
                        "Flood opened cell at {:?}, mine count: {}",
                        pos,
                        neighbor.adjacent_mines
                    );
                    if neighbor.adjacent_mines == 0 {
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }
}
