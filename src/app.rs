use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::parser::SYNTAX_HINT;
use crate::generator::{DifficultyLevel, RandomProblemGenerator};
use crate::session::{Outcome, ParseError, SessionError, SessionState};
use crate::ui::components::celebration::Celebration;
use crate::ui::line_input::AnswerInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Drill,
    ConfirmReset,
}

/// What the drill panel says about the last action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct { points: u32 },
    Incorrect { expected: String },
    Unreadable { hint: &'static str },
    OutOfRange { constant: String },
    Empty { hint: &'static str },
    NewProblem,
    Reset,
    Difficulty { level: DifficultyLevel },
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub session: SessionState,
    pub input: AnswerInput,
    pub feedback: Option<Feedback>,
    pub celebration: Option<Celebration>,
    pub should_quit: bool,
    generator: RandomProblemGenerator,
    /// Set by `--seed`; later generators are seeded from the current one.
    seeded: bool,
    /// Where difficulty changes are written back; `None` keeps them in memory.
    config_path: Option<PathBuf>,
}

fn build_generator(config: &Config, seed: Option<u64>) -> Result<RandomProblemGenerator> {
    let difficulty = config.difficulty();
    let generator = match seed {
        Some(seed) => RandomProblemGenerator::seeded(difficulty, seed),
        None => RandomProblemGenerator::from_entropy(difficulty),
    };
    generator.with_context(|| format!("invalid `{}` difficulty", config.difficulty))
}

impl App {
    pub fn new(
        config: Config,
        theme: Theme,
        seed: Option<u64>,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let generator = build_generator(&config, seed)?;
        let session = SessionState::new(config.score_rules());
        let mut app = Self {
            screen: AppScreen::Drill,
            config,
            theme,
            session,
            input: AnswerInput::default(),
            feedback: None,
            celebration: None,
            should_quit: false,
            generator,
            seeded: seed.is_some(),
            config_path,
        };
        app.ensure_problem();
        Ok(app)
    }

    /// The session never asks for a problem itself; the host keeps one current.
    fn ensure_problem(&mut self) {
        if self.session.current().is_none() {
            let problem = self.session.request_new_problem(&mut self.generator);
            debug!(question = %problem.question_text(), "new problem");
        }
    }

    pub fn question_text(&self) -> Option<String> {
        self.session.current().map(|p| p.question_text())
    }

    pub fn submit(&mut self) {
        if self.input.is_blank() {
            self.feedback = Some(Feedback::Empty { hint: SYNTAX_HINT });
            return;
        }
        self.ensure_problem();

        let raw = self.input.value().to_string();
        match self.session.submit(&raw, &mut self.generator) {
            Ok(Outcome::FormatError(err)) => {
                debug!(%err, "unreadable answer");
                self.feedback = Some(match err {
                    ParseError::ConstantOutOfRange(constant) => Feedback::OutOfRange { constant },
                    ParseError::Empty => Feedback::Empty { hint: SYNTAX_HINT },
                    ParseError::Malformed(_) => Feedback::Unreadable { hint: SYNTAX_HINT },
                });
            }
            Ok(Outcome::Correct { milestone }) => {
                self.input.take();
                self.feedback = Some(Feedback::Correct {
                    points: self.session.rules().points_per_correct,
                });
                if let Some(combo) = milestone {
                    info!(combo, "milestone reached");
                    self.celebration = Some(Celebration::new(combo, Instant::now()));
                }
            }
            Ok(Outcome::Incorrect { expected }) => {
                self.input.take();
                self.feedback = Some(Feedback::Incorrect { expected });
            }
            Err(SessionError::NoActiveProblem) => {
                warn!("submission without an active problem");
            }
        }
    }

    pub fn new_problem(&mut self) {
        let problem = self.session.request_new_problem(&mut self.generator);
        debug!(question = %problem.question_text(), "skipped to new problem");
        self.input.clear();
        self.feedback = Some(Feedback::NewProblem);
    }

    pub fn request_reset(&mut self) {
        self.screen = AppScreen::ConfirmReset;
    }

    pub fn confirm_reset(&mut self, confirmed: bool) {
        self.screen = AppScreen::Drill;
        if !confirmed {
            return;
        }
        self.session.reset();
        self.celebration = None;
        self.input.clear();
        self.ensure_problem();
        self.feedback = Some(Feedback::Reset);
    }

    /// Moves to the next difficulty whose bounds are usable.
    pub fn cycle_difficulty(&mut self) {
        let levels = DifficultyLevel::ALL;
        let start = levels
            .iter()
            .position(|&l| l == self.config.difficulty)
            .unwrap_or(0);

        // Drawn once so a skipped level does not shift the sequence.
        let seed = self.seeded.then(|| self.generator.next_seed());

        for offset in 1..=levels.len() {
            let level = levels[(start + offset) % levels.len()];
            let mut candidate = self.config.clone();
            candidate.difficulty = level;
            match build_generator(&candidate, seed) {
                Ok(generator) => {
                    self.config = candidate;
                    self.generator = generator;
                    break;
                }
                Err(err) => warn!("skipping difficulty {level}: {err:#}"),
            }
        }

        if let Some(path) = &self.config_path {
            if let Err(err) = self.config.save_to(path) {
                warn!("could not save config: {err:#}");
            }
        }

        self.new_problem();
        self.feedback = Some(Feedback::Difficulty {
            level: self.config.difficulty,
        });
    }

    pub fn tick(&mut self, now: Instant) {
        if self.celebration.as_ref().is_some_and(|c| c.is_over(now)) {
            self.celebration = None;
        }
    }
}
