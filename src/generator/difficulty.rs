use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest root magnitude any difficulty may draw from.
pub const ROOT_LIMIT: i32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Normal,
    Hard,
    Custom,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Normal,
        DifficultyLevel::Hard,
        DifficultyLevel::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Normal => "normal",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Custom => "custom",
        }
    }

    /// Built-in bounds. `Custom` has none; its bounds come from the config.
    pub fn preset(self) -> Option<Difficulty> {
        match self {
            DifficultyLevel::Easy => Some(EASY),
            DifficultyLevel::Normal => Some(NORMAL),
            DifficultyLevel::Hard => Some(HARD),
            DifficultyLevel::Custom => None,
        }
    }
}

const EASY: Difficulty = Difficulty {
    root_min: -5,
    root_max: 5,
    max_linear: 6,
    max_constant: 12,
    allow_zero_roots: true,
};

// Nonzero single-digit roots.
const NORMAL: Difficulty = Difficulty {
    root_min: -9,
    root_max: 9,
    max_linear: 18,
    max_constant: 81,
    allow_zero_roots: false,
};

const HARD: Difficulty = Difficulty {
    root_min: -15,
    root_max: 15,
    max_linear: 30,
    max_constant: 225,
    allow_zero_roots: true,
};

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, normal, hard or custom)")]
pub struct UnknownDifficulty(String);

impl FromStr for DifficultyLevel {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DifficultyLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DifficultyError {
    #[error("root range {min}..={max} is empty")]
    EmptyRange { min: i32, max: i32 },
    #[error("root range {min}..={max} exceeds ±{limit}", limit = ROOT_LIMIT)]
    RangeTooWide { min: i32, max: i32 },
    #[error("no root pair satisfies |b| <= {max_linear} and |c| <= {max_constant}")]
    Unsatisfiable { max_linear: i32, max_constant: i32 },
}

/// Bounds for problem generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub root_min: i32,
    pub root_max: i32,
    /// Ceiling on `|b|`.
    pub max_linear: i32,
    /// Ceiling on `|c|`.
    pub max_constant: i32,
    pub allow_zero_roots: bool,
}

impl Difficulty {
    pub fn admits(&self, p: i32, q: i32) -> bool {
        if !self.allow_zero_roots && (p == 0 || q == 0) {
            return false;
        }
        (p + q).abs() <= self.max_linear && (p * q).abs() <= self.max_constant
    }

    /// Every ordered `(p, q)` draw in range that would be accepted.
    pub fn admissible_draws(&self) -> Vec<(i32, i32)> {
        let range = self.root_min..=self.root_max;
        range
            .clone()
            .flat_map(|p| range.clone().map(move |q| (p, q)))
            .filter(|&(p, q)| self.admits(p, q))
            .collect()
    }

    pub fn validate(&self) -> Result<(), DifficultyError> {
        let (min, max) = (self.root_min, self.root_max);
        if min > max {
            return Err(DifficultyError::EmptyRange { min, max });
        }
        if min < -ROOT_LIMIT || max > ROOT_LIMIT {
            return Err(DifficultyError::RangeTooWide { min, max });
        }
        if self.admissible_draws().is_empty() {
            return Err(DifficultyError::Unsatisfiable {
                max_linear: self.max_linear,
                max_constant: self.max_constant,
            });
        }
        Ok(())
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        NORMAL
    }
}
