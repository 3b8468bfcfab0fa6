use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game at a time on top of the board engine, plus the records that survive restarts.
///
/// The session is the only owner of its board. Moves must be applied one after another, each
/// one builds the next snapshot from the current one.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    generator: G,
    difficulties: DifficultyTable,
    difficulty: Difficulty,
    board: Board,
    status: GameStatus,
    elapsed: u32,
    first_move: bool,
    triggered_mine: Option<Coord2>,
    new_record: bool,
    best_records: BestRecords,
}

impl<G: BoardGenerator> GameSession<G> {
    pub fn new(
        difficulties: DifficultyTable,
        difficulty: Difficulty,
        mut generator: G,
        best_records: BestRecords,
    ) -> Result<Self> {
        let board = generate_board(&mut generator, difficulties.get(difficulty)?)?;
        log::debug!("New {} game, {:?}", difficulty, board.config());

        Ok(Self {
            generator,
            difficulties,
            difficulty,
            board,
            status: GameStatus::InProgress,
            elapsed: 0,
            first_move: true,
            triggered_mine: None,
            new_record: false,
            best_records,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn difficulties(&self) -> &DifficultyTable {
        &self.difficulties
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    pub fn best_record(&self, difficulty: Difficulty) -> Option<u32> {
        self.best_records.get(difficulty)
    }

    pub fn best_records(&self) -> &BestRecords {
        &self.best_records
    }

    /// Whether the last win of this game improved the best record for its difficulty.
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(self)
    }

    /// Reveals a cell, the first reveal of a game never hits a mine.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        let cell = self.board[coords];
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if self.first_move {
            self.make_first_move_safe(coords)?;
            self.first_move = false;
        }

        let (board, outcome) = self.board.reveal_with_outcome(coords)?;
        self.board = board;

        match outcome {
            RevealOutcome::HitMine => {
                self.triggered_mine = Some(coords);
                self.end_game(GameStatus::Lost);
            }
            RevealOutcome::Won => self.end_game(GameStatus::Won),
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }

        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let (board, outcome) = self.board.toggle_flag_with_outcome(coords)?;
        self.board = board;
        Ok(outcome)
    }

    /// Advances the elapsed counter by one unit, returns whether the tick counted.
    pub fn tick(&mut self) -> bool {
        if self.status.is_finished() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    /// Starts over on `difficulty`, keeping only the best records.
    ///
    /// On error the current game is left as it was.
    pub fn restart(&mut self, difficulty: Difficulty) -> Result<()> {
        let config = self.difficulties.get(difficulty)?;
        let board = generate_board(&mut self.generator, config)?;
        log::debug!("Restart as {} game, {:?}", difficulty, config);

        self.difficulty = difficulty;
        self.board = board;
        self.status = GameStatus::InProgress;
        self.elapsed = 0;
        self.first_move = true;
        self.triggered_mine = None;
        self.new_record = false;
        Ok(())
    }

    /// Replaces the whole board until `coords` holds no mine.
    fn make_first_move_safe(&mut self, coords: Coord2) -> Result<()> {
        let config = self.board.config();
        let mut regenerated = 0usize;

        while self.board[coords].is_mine {
            self.board = generate_board(&mut self.generator, config)?;
            regenerated += 1;
        }

        if regenerated > 0 {
            log::debug!(
                "First reveal at {:?} hit a mine, regenerated board {} time(s)",
                coords,
                regenerated
            );
        }
        Ok(())
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        log::debug!("{} game ended as {:?} after {}", self.difficulty, status, self.elapsed);
        if status == GameStatus::Won {
            self.new_record = self.best_records.submit(self.difficulty, self.elapsed);
            if self.new_record {
                log::info!("New best record for {}: {}", self.difficulty, self.elapsed);
            }
        }
    }
}

/// Moves are validated against the current board, so every replacement must keep its shape.
fn generate_board<G: BoardGenerator>(generator: &mut G, config: GameConfig) -> Result<Board> {
    let board = generator.generate(config)?;
    if board.config() != config {
        log::warn!("Generator returned {:?} for {:?}", board.config(), config);
        return Err(GameError::InvalidBoardShape);
    }
    Ok(board)
}

impl GameSession<RandomBoardGenerator> {
    /// Session backed by a seeded random generator.
    pub fn seeded(
        difficulties: DifficultyTable,
        difficulty: Difficulty,
        seed: u64,
        best_records: BestRecords,
    ) -> Result<Self> {
        Self::new(
            difficulties,
            difficulty,
            RandomBoardGenerator::from_seed(seed),
            best_records,
        )
    }
}
