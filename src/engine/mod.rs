pub mod format;
pub mod parser;
pub mod problem;
pub mod root_pair;
pub mod scoring;

pub use parser::{ParseError, parse_answer};
pub use problem::{Problem, check_answer};
pub use root_pair::{RootPair, roots_match};
