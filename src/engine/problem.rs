use serde::{Deserialize, Serialize};

use crate::engine::format;
use crate::engine::root_pair::{self, RootPair};

/// A single drill question `x^2 + bx + c = (x+p)(x+q)`.
///
/// Only constructible from its roots, so `b == p + q` and `c == p * q`
/// always hold and `p <= q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    b: i32,
    c: i32,
    p: i32,
    q: i32,
}

impl Problem {
    pub fn from_roots(p: i32, q: i32) -> Self {
        let roots = RootPair::new(p, q);
        let (b, c) = roots.coefficients();
        Self {
            b,
            c,
            p: roots.low(),
            q: roots.high(),
        }
    }

    pub fn b(&self) -> i32 {
        self.b
    }

    pub fn c(&self) -> i32 {
        self.c
    }

    pub fn p(&self) -> i32 {
        self.p
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn answer(&self) -> RootPair {
        RootPair::new(self.p, self.q)
    }

    pub fn question_text(&self) -> String {
        format::format_polynomial(self.b, self.c)
    }

    pub fn answer_text(&self) -> String {
        format::format_factors(self.answer())
    }
}

pub fn check_answer(pair: RootPair, problem: &Problem) -> bool {
    root_pair::roots_match(pair, problem.answer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_roots_derives_coefficients() {
        let problem = Problem::from_roots(3, -2);
        assert_eq!(problem.b(), 1);
        assert_eq!(problem.c(), -6);
        assert_eq!((problem.p(), problem.q()), (-2, 3));
    }

    #[test]
    fn test_check_answer_any_order() {
        let problem = Problem::from_roots(3, -2);
        assert!(check_answer(RootPair::new(-2, 3), &problem));
        assert!(check_answer(RootPair::new(3, -2), &problem));
        assert!(!check_answer(RootPair::new(3, 2), &problem));
    }

    #[test]
    fn test_texts() {
        let problem = Problem::from_roots(3, -2);
        assert_eq!(problem.question_text(), "x^2 + x - 6");
        assert_eq!(problem.answer_text(), "(x-2)(x+3)");
    }
}
