use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::format;

/// Unordered pair of constants from `(x+p)(x+q)`.
///
/// Always stored with `low <= high`, so the derived equality is the
/// order-independent comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RootPair {
    low: i32,
    high: i32,
}

impl RootPair {
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    pub fn is_repeated(&self) -> bool {
        self.low == self.high
    }

    /// Coefficients `(b, c)` of the expanded quadratic.
    pub fn coefficients(&self) -> (i32, i32) {
        (self.low + self.high, self.low * self.high)
    }
}

impl From<(i32, i32)> for RootPair {
    fn from((a, b): (i32, i32)) -> Self {
        Self::new(a, b)
    }
}

impl fmt::Display for RootPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_factors(*self))
    }
}

pub fn roots_match(a: RootPair, b: RootPair) -> bool {
    a.low == b.low && a.high == b.high
}
