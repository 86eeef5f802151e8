use crate::engine::root_pair::RootPair;

/// Renders one linear factor: `(x)`, `(x+n)` or `(x-n)`.
fn format_factor(n: i32) -> String {
    match n {
        0 => "(x)".to_string(),
        n if n > 0 => format!("(x+{n})"),
        n => format!("(x-{})", n.unsigned_abs()),
    }
}

/// Canonical factor text, lower constant first. The double zero pair is
/// written as a square.
pub fn format_factors(pair: RootPair) -> String {
    if pair.low() == 0 && pair.high() == 0 {
        return "(x)^2".to_string();
    }
    format!("{}{}", format_factor(pair.low()), format_factor(pair.high()))
}

pub fn format_polynomial(b: i32, c: i32) -> String {
    let mut out = String::from("x^2");

    if b != 0 {
        let sign = if b > 0 { '+' } else { '-' };
        let magnitude = b.unsigned_abs();
        if magnitude == 1 {
            out.push_str(&format!(" {sign} x"));
        } else {
            out.push_str(&format!(" {sign} {magnitude}x"));
        }
    }

    if c != 0 {
        let sign = if c > 0 { '+' } else { '-' };
        out.push_str(&format!(" {sign} {}", c.unsigned_abs()));
    }

    out
}
