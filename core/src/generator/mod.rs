use crate::*;
pub use random::*;

mod random;

/// Source of fresh boards for a [`GameSession`].
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board>;
}

/// Any closure producing boards can stand in for a generator, mostly useful for scripted tests.
impl<F> BoardGenerator for F
where
    F: FnMut(GameConfig) -> Result<Board>,
{
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        self(config)
    }
}
