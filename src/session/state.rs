use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::engine::parser::{self, ParseError};
use crate::engine::problem::{self, Problem};
use crate::engine::scoring::{self, ScoreRules};
use crate::generator::ProblemSource;
use crate::session::history::{AttemptHistory, AttemptRecord};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no active problem; request a new problem first")]
    NoActiveProblem,
}

/// Result of one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Unreadable answer. Nothing was recorded.
    FormatError(ParseError),
    /// `milestone` is set when the combo just reached a milestone.
    Correct { milestone: Option<u32> },
    Incorrect { expected: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    current: Option<Problem>,
    score: u32,
    combo: u32,
    best_combo: u32,
    history: AttemptHistory,
    rules: ScoreRules,
}

impl SessionState {
    pub fn new(rules: ScoreRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&Problem> {
        self.current.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn best_combo(&self) -> u32 {
        self.best_combo
    }

    pub fn history(&self) -> &AttemptHistory {
        &self.history
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    pub fn accuracy(&self) -> f64 {
        scoring::accuracy(self.history.correct(), self.history.attempts())
    }

    /// Replaces the current problem. Score, combo and history are untouched.
    pub fn request_new_problem(&mut self, source: &mut dyn ProblemSource) -> &Problem {
        self.current.insert(source.next_problem())
    }

    pub fn submit(
        &mut self,
        raw: &str,
        source: &mut dyn ProblemSource,
    ) -> Result<Outcome, SessionError> {
        let problem = self.current.ok_or(SessionError::NoActiveProblem)?;

        let pair = match parser::parse_answer(raw) {
            Ok(pair) => pair,
            Err(err) => return Ok(Outcome::FormatError(err)),
        };

        let correct = problem::check_answer(pair, &problem);
        self.history.push(AttemptRecord {
            question: problem.question_text(),
            answer: raw.trim().to_string(),
            expected: problem.answer_text(),
            correct,
            at: Utc::now(),
        });

        if !correct {
            info!(question = %problem.question_text(), answer = raw.trim(), "incorrect");
            self.combo = 0;
            return Ok(Outcome::Incorrect {
                expected: problem.answer_text(),
            });
        }

        self.score = self.score.saturating_add(self.rules.points_per_correct);
        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        let milestone = self.rules.milestone_hit(self.combo);
        info!(score = self.score, combo = self.combo, ?milestone, "correct");

        self.current = Some(source.next_problem());
        Ok(Outcome::Correct { milestone })
    }

    /// Clears everything except the scoring rules.
    pub fn reset(&mut self) {
        info!(score = self.score, attempts = self.history.attempts(), "session reset");
        *self = Self::new(self.rules.clone());
    }
}
