use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::engine::problem::Problem;
use crate::generator::ProblemSource;
use crate::generator::difficulty::{Difficulty, DifficultyError};

/// Rejection-sampling attempts before falling back to enumerating the domain.
pub const MAX_GENERATION_ATTEMPTS: usize = 1000;

pub struct RandomProblemGenerator {
    difficulty: Difficulty,
    rng: SmallRng,
}

impl RandomProblemGenerator {
    pub fn new(difficulty: Difficulty, rng: SmallRng) -> Result<Self, DifficultyError> {
        difficulty.validate()?;
        Ok(Self { difficulty, rng })
    }

    pub fn from_entropy(difficulty: Difficulty) -> Result<Self, DifficultyError> {
        Self::new(difficulty, SmallRng::from_entropy())
    }

    pub fn seeded(difficulty: Difficulty, seed: u64) -> Result<Self, DifficultyError> {
        Self::new(difficulty, SmallRng::seed_from_u64(seed))
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// Seed for a successor generator, drawn from this one's stream so a
    /// seeded run stays repeatable without restarting its sequence.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn draw(&mut self) -> (i32, i32) {
        let d = &self.difficulty;
        (
            self.rng.gen_range(d.root_min..=d.root_max),
            self.rng.gen_range(d.root_min..=d.root_max),
        )
    }

    fn fallback(&mut self) -> Problem {
        let draws = self.difficulty.admissible_draws();
        debug!(candidates = draws.len(), "generation retries exhausted, enumerating");
        // validate() guarantees at least one admissible draw
        let (p, q) = draws[self.rng.gen_range(0..draws.len())];
        Problem::from_roots(p, q)
    }
}

impl ProblemSource for RandomProblemGenerator {
    fn next_problem(&mut self) -> Problem {
        for attempt in 0..MAX_GENERATION_ATTEMPTS {
            let (p, q) = self.draw();
            if self.difficulty.admits(p, q) {
                if attempt > 0 {
                    debug!(attempt, p, q, "accepted after resampling");
                }
                return Problem::from_roots(p, q);
            }
        }
        self.fallback()
    }
}
