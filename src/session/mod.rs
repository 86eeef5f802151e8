//! Drill session: the state machine and the value-in/value-out facade that
//! hosts drive it through.

pub mod history;
pub mod state;

pub use history::{AttemptHistory, AttemptRecord};
pub use state::{Outcome, SessionError, SessionState};

use crate::engine::problem::Problem;
use crate::engine::root_pair::RootPair;
use crate::generator::ProblemSource;

pub use crate::engine::parser::{ParseError, parse_answer};

pub fn generate_problem(source: &mut dyn ProblemSource) -> Problem {
    source.next_problem()
}

pub fn check_answer(pair: RootPair, problem: &Problem) -> bool {
    crate::engine::problem::check_answer(pair, problem)
}

/// The state is handed back on error too, unchanged.
pub fn apply_submission(
    mut state: SessionState,
    raw: &str,
    source: &mut dyn ProblemSource,
) -> (SessionState, Result<Outcome, SessionError>) {
    let outcome = state.submit(raw, source);
    (state, outcome)
}

pub fn reset_session(mut state: SessionState) -> SessionState {
    state.reset();
    state
}
