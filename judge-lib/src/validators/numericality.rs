//! numericality

use std::sync::LazyLock;

use regex::Regex;

use super::Context;
use crate::validation::Validation;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[+-]?\d+\z").expect("valid integer pattern"));

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?\z").expect("valid number pattern")
});

type Comparison = fn(f64, f64) -> bool;

const COMPARISONS: [(&str, Comparison); 5] = [
    ("greater_than", |v, bound| v > bound),
    ("greater_than_or_equal_to", |v, bound| v >= bound),
    ("less_than", |v, bound| v < bound),
    ("less_than_or_equal_to", |v, bound| v <= bound),
    ("equal_to", |v, bound| v == bound),
];

pub(super) fn validate(cx: &Context<'_>) -> Validation {
    let options = cx.options();
    let raw = cx.value().trim();

    let shape_ok = if options.flag("only_integer") {
        INTEGER.is_match(raw)
    } else {
        NUMBER.is_match(raw)
    };
    let number = match raw.parse::<f64>() {
        Ok(number) if shape_ok && number.is_finite() => number,
        _ if options.flag("only_integer") && NUMBER.is_match(raw) => {
            return Validation::invalid(cx.message("not_an_integer"));
        }
        _ => return Validation::invalid(cx.message("not_a_number")),
    };

    let mut messages = Vec::new();

    for (name, compare) in COMPARISONS {
        if let Some(bound) = options.number(name) {
            if !compare(number, bound) {
                messages.push(cx.message_count(name, format_number(bound)));
            }
        }
    }

    let odd = is_odd(raw, number);
    if options.flag("odd") && !odd {
        messages.push(cx.message("odd"));
    }
    if options.flag("even") && odd {
        messages.push(cx.message("even"));
    }

    Validation::closed(messages)
}

/// Parity of the integral part of the value.
///
/// Plain decimal input is judged by the last digit of its integral part so
/// that values beyond `f64` precision keep their parity. Exponent forms fall
/// back to the parsed number, where every magnitude from 2^53 up is even.
fn is_odd(raw: &str, number: f64) -> bool {
    if !raw.contains(['e', 'E']) {
        let integral = raw.split('.').next().unwrap_or_default();
        return integral
            .chars()
            .next_back()
            .and_then(|c| c.to_digit(10))
            .is_some_and(|d| d % 2 == 1);
    }

    const EXACT: f64 = 9_007_199_254_740_992.0;
    number.abs() < EXACT && (number.trunc() as i64) % 2 != 0
}

/// Renders a bound without a trailing `.0` for whole numbers.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
