use serde::{Deserialize, Serialize};

pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;
pub const DEFAULT_MILESTONES: [u32; 3] = [5, 10, 20];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub points_per_correct: u32,
    /// Sorted ascending, no duplicates, no zero.
    pub milestones: Vec<u32>,
}

impl ScoreRules {
    pub fn new(points_per_correct: u32, milestones: &[u32]) -> Self {
        let mut milestones: Vec<u32> = milestones.iter().copied().filter(|&m| m > 0).collect();
        milestones.sort_unstable();
        milestones.dedup();
        Self {
            points_per_correct,
            milestones,
        }
    }

    /// The milestone reached by exactly this combo, if any.
    pub fn milestone_hit(&self, combo: u32) -> Option<u32> {
        self.milestones.binary_search(&combo).ok().map(|_| combo)
    }

    pub fn next_milestone(&self, combo: u32) -> Option<u32> {
        self.milestones.iter().copied().find(|&m| m > combo)
    }

    /// Fraction of the way from the previous milestone to the next one.
    pub fn milestone_progress(&self, combo: u32) -> f64 {
        let Some(next) = self.next_milestone(combo) else {
            return 1.0;
        };
        let prev = self
            .milestones
            .iter()
            .copied()
            .filter(|&m| m <= combo)
            .max()
            .unwrap_or(0);
        (combo - prev) as f64 / (next - prev) as f64
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_PER_CORRECT, &DEFAULT_MILESTONES)
    }
}

pub fn accuracy(correct: u64, attempts: u64) -> f64 {
    if attempts == 0 {
        return 100.0;
    }
    correct as f64 / attempts as f64 * 100.0
}
