use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Places `config.mines` mines uniformly at random by rejection sampling.
///
/// Draws `(row, col)` pairs until enough distinct cells hold a mine, so the expected number of
/// draws grows as the board fills up. [`GameConfig::validate`] guarantees at least one safe cell.
pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Board> {
    config.validate()?;

    let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
    let mut mines_placed: CellCount = 0;
    let mut draws: usize = 0;

    while mines_placed < config.mines {
        let coords: Coord2 = (
            rng.random_range(0..config.rows),
            rng.random_range(0..config.cols),
        );
        draws += 1;

        let cell = &mut mine_mask[coords.to_nd_index()];
        if !*cell {
            *cell = true;
            mines_placed += 1;
        }
    }
    log::trace!(
        "Placed {} mines on {}x{} with {} draws",
        mines_placed,
        config.rows,
        config.cols,
        draws
    );

    Ok(Board::from_mine_mask(&mine_mask))
}

/// Generator that owns its random source.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomBoardGenerator<SmallRng> {
    /// Reproducible generator, the same seed yields the same sequence of boards.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        generate(config, &mut self.rng)
    }
}
