//! Answer parser.
//!
//! Input is normalised (Unicode NFKC, whitespace, case), then recognised in
//! two stages: a squared single factor is expanded into the equivalent
//! product, and the product is matched against one anchored pattern.

use std::borrow::Cow;
use std::sync::LazyLock;

use icu_normalizer::ComposingNormalizerBorrowed;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::engine::root_pair::RootPair;

/// Example shown to the user whenever an answer cannot be read.
pub const SYNTAX_HINT: &str = "(x+2)(x-3)";

static SQUARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\(x(?:[+-][0-9]+)?\))(?:\^2|\*\*2)$").unwrap());

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\)[*·×・]\(").unwrap());

static PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(x([+-][0-9]+)?\)\(x([+-][0-9]+)?\)$").unwrap());

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no answer given")]
    Empty,
    #[error("`{0}` is not of the form (x+2)(x-3)")]
    Malformed(String),
    #[error("constant `{0}` is out of range")]
    ConstantOutOfRange(String),
}

/// Parses `(x+p)(x+q)`, `(x+p)*(x+q)` or `(x+p)^2` into a root pair.
pub fn parse_answer(raw: &str) -> Result<RootPair, ParseError> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Err(ParseError::Empty);
    }

    let expanded = expand_square(&normalized);
    let product = strip_marker(&expanded);

    let Some(caps) = PRODUCT.captures(&product) else {
        debug!(input = %normalized, "rejected answer");
        return Err(ParseError::Malformed(normalized));
    };

    let first = constant(caps.get(1).map(|m| m.as_str()))?;
    let second = constant(caps.get(2).map(|m| m.as_str()))?;
    Ok(RootPair::new(first, second))
}

/// Folds full-width and compatibility characters to ASCII, drops whitespace
/// and lowercases the variable.
fn normalize(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|ch| match ch {
            '\u{2212}' => "-".to_string(),
            '²' => "^2".to_string(),
            other => other.to_string(),
        })
        .collect();

    let nfkc = ComposingNormalizerBorrowed::new_nfkc();
    nfkc.normalize(&mapped)
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Stage one: `(x+a)^2` becomes `(x+a)(x+a)`; anything else passes through.
fn expand_square(input: &str) -> Cow<'_, str> {
    match SQUARE.captures(input) {
        Some(caps) => {
            let factor = &caps[1];
            Cow::Owned(format!("{factor}{factor}"))
        }
        None => Cow::Borrowed(input),
    }
}

/// Drops a single multiplication marker between the two factor groups.
fn strip_marker(input: &str) -> Cow<'_, str> {
    MARKER.replacen(input, 1, ")(")
}

fn constant(text: Option<&str>) -> Result<i32, ParseError> {
    match text {
        None => Ok(0),
        Some(t) => t
            .parse::<i32>()
            .map_err(|_| ParseError::ConstantOutOfRange(t.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::format::format_factors;

    fn pair(a: i32, b: i32) -> RootPair {
        RootPair::new(a, b)
    }

    #[test]
    fn test_basic_product() {
        assert_eq!(parse_answer("(x+3)(x-2)"), Ok(pair(3, -2)));
    }

    #[test]
    fn test_whitespace_and_order_insensitive() {
        assert_eq!(parse_answer("(x+3)(x-2)"), parse_answer("( x - 2 ) ( x + 3 )"));
        assert_eq!(parse_answer("\t(x+3)\n(x-2) "), Ok(pair(-2, 3)));
    }

    #[test]
    fn test_uppercase_variable() {
        assert_eq!(parse_answer("(X+1)(X-1)"), Ok(pair(1, -1)));
    }

    #[test]
    fn test_omitted_constant_defaults_to_zero() {
        assert_eq!(parse_answer("(x)(x-8)"), Ok(pair(0, -8)));
        assert_eq!(parse_answer("(x)(x)"), Ok(pair(0, 0)));
    }

    #[test]
    fn test_square_forms() {
        assert_eq!(parse_answer("(x+3)^2"), Ok(pair(3, 3)));
        assert_eq!(parse_answer("(x-4)**2"), Ok(pair(-4, -4)));
        assert_eq!(parse_answer("(x+5)²"), Ok(pair(5, 5)));
        assert_eq!(parse_answer("(x)^2"), Ok(pair(0, 0)));
    }

    #[test]
    fn test_multiplication_marker_between_factors() {
        assert_eq!(parse_answer("(x+3)*(x-2)"), Ok(pair(3, -2)));
        assert_eq!(parse_answer("(x+3) × (x-2)"), Ok(pair(3, -2)));
        assert_eq!(parse_answer("(x+3)·(x-2)"), Ok(pair(3, -2)));
        assert_eq!(parse_answer("(x+3)・(x-2)"), Ok(pair(3, -2)));
        assert_eq!(parse_answer("（ｘ＋３）・（ｘ－２）"), Ok(pair(3, -2)));
        assert_eq!(parse_answer("(x+3)･(x-2)"), Ok(pair(3, -2)));
    }

    #[test]
    fn test_full_width_input() {
        assert_eq!(parse_answer("（ｘ＋３）（ｘ－２）"), Ok(pair(3, -2)));
        assert_eq!(parse_answer("(x\u{2212}2)(x+3)"), Ok(pair(3, -2)));
    }

    #[test]
    fn test_explicit_zero_and_leading_zeros() {
        assert_eq!(parse_answer("(x+0)(x-05)"), Ok(pair(0, -5)));
    }

    #[test]
    fn test_rejects_wrong_variable() {
        assert!(matches!(
            parse_answer("(x+3)(y-2)"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_missing_parentheses() {
        assert!(parse_answer("x+3)(x-2)").is_err());
        assert!(parse_answer("(x+3)(x-2").is_err());
        assert!(parse_answer("x^2+x-6").is_err());
    }

    #[test]
    fn test_rejects_trailing_characters() {
        assert!(parse_answer("(x+3)(x-2)7").is_err());
        assert!(parse_answer("(x+3)(x-2)^2").is_err());
    }

    #[test]
    fn test_rejects_non_integer_constant() {
        assert!(parse_answer("(x+1.5)(x-2)").is_err());
        assert!(parse_answer("(x+a)(x-2)").is_err());
    }

    #[test]
    fn test_rejects_marker_inside_factor() {
        assert!(parse_answer("(x*+3)(x-2)").is_err());
        assert!(parse_answer("(x+3)**(x-2)").is_err());
    }

    #[test]
    fn test_rejects_three_factors() {
        assert!(parse_answer("(x+1)(x+2)(x+3)").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_answer(""), Err(ParseError::Empty));
        assert_eq!(parse_answer("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_constant_overflow() {
        assert!(matches!(
            parse_answer("(x+99999999999)(x-2)"),
            Err(ParseError::ConstantOutOfRange(_))
        ));
    }

    #[test]
    fn test_malformed_carries_normalized_text() {
        assert_eq!(
            parse_answer("( X + 3 )( Y - 2 )"),
            Err(ParseError::Malformed("(x+3)(y-2)".to_string()))
        );
    }

    #[test]
    fn test_format_round_trip_over_range() {
        for p in -15..=15 {
            for q in p..=15 {
                let expected = pair(p, q);
                let text = format_factors(expected);
                assert_eq!(parse_answer(&text), Ok(expected), "round trip of {text}");
            }
        }
    }
}
