pub mod difficulty;
pub mod random;

use crate::engine::problem::Problem;

pub use difficulty::{Difficulty, DifficultyError, DifficultyLevel};
pub use random::RandomProblemGenerator;

/// Supplies the next problem for a session.
pub trait ProblemSource {
    fn next_problem(&mut self) -> Problem;
}
