//! Boundary between a game session and the services around it: the score leaderboard, the local
//! best-record store and file-based settings. Failures here never interrupt a game.

pub use error::*;
pub use leaderboard::*;
pub use records::*;
pub use settings::*;

mod error;
mod leaderboard;
mod records;
mod settings;
