//! format

use regex::Regex;

use super::Context;
use crate::error::Error;
use crate::error::InvalidPatternError;
use crate::validation::Validation;

/// Translates a Ruby regexp, as serialized by the server, into Rust syntax.
///
/// Accepts both `Regexp#to_s` output (`(?-mix:...)`) and the literal
/// `/.../flags` form. Ruby's `m` flag (dot matches newline) becomes `s`,
/// `\Z` becomes `\z` and `\h` becomes a hex digit class.
///
/// In Ruby `^` and `$` always match at line boundaries, so the result is
/// always compiled with Rust's `m` flag; `\A` and `\z` keep anchoring the
/// whole string.
pub fn ruby_to_rust_pattern(pattern: &str) -> String {
    let (body, flags) = split_literal(pattern);
    let mut out = String::with_capacity(body.len() + 8);

    out.push_str("(?m");
    out.push_str(&translate_flags(flags));
    out.push(')');

    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('Z') => out.push_str(r"\z"),
                Some('h') => out.push_str("[0-9a-fA-F]"),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '(' if chars.peek() == Some(&'?') => {
                out.push('(');
                out.push(chars.next().unwrap_or('?'));
                let mut group = String::new();
                while let Some(&f) = chars.peek() {
                    if matches!(f, 'm' | 'i' | 'x' | '-') {
                        group.push(f);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if group.is_empty() {
                    continue;
                }
                if matches!(chars.peek(), Some(':') | Some(')')) {
                    out.push_str(&translate_flags(&group).replace("-)", ")"));
                } else {
                    out.push_str(&group);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Splits `/body/flags` into its parts; anything else is all body.
fn split_literal(pattern: &str) -> (&str, &str) {
    if let Some(rest) = pattern.strip_prefix('/') {
        if let Some(end) = rest.rfind('/') {
            let flags = &rest[end + 1..];
            if flags.chars().all(|c| matches!(c, 'm' | 'i' | 'x')) {
                return (&rest[..end], flags);
            }
        }
    }
    (pattern, "")
}

fn translate_flags(flags: &str) -> String {
    flags.replace('m', "s")
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(&ruby_to_rust_pattern(pattern)).map_err(|e| {
        InvalidPatternError {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Compiles the rule's patterns without matching anything.
pub(super) fn check(cx: &Context<'_>) -> Result<(), Error> {
    let options = cx.options();
    for pattern in [options.string("with"), options.string("without")]
        .into_iter()
        .flatten()
    {
        compile(pattern)?;
    }
    Ok(())
}

pub(super) fn validate(cx: &Context<'_>) -> Result<Validation, Error> {
    let value = cx.value();
    let options = cx.options();

    if let Some(with) = options.string("with") {
        if !compile(with)?.is_match(value) {
            return Ok(Validation::invalid(cx.message("invalid")));
        }
    }

    if let Some(without) = options.string("without") {
        if compile(without)?.is_match(value) {
            return Ok(Validation::invalid(cx.message("invalid")));
        }
    }

    Ok(Validation::valid())
}
