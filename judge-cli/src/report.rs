//! Plain-text rendering of form outcomes.

use std::fmt::Write;

use judge_lib::ElementOutcome;

/// One line per element, messages indented below invalid ones.
pub fn render(outcomes: &[(String, ElementOutcome)]) -> String {
    let mut out = String::new();
    for (id, outcome) in outcomes {
        match outcome {
            ElementOutcome::Valid => {
                let _ = writeln!(out, "{id}: valid");
            }
            ElementOutcome::Pending => {
                let _ = writeln!(out, "{id}: pending");
            }
            ElementOutcome::Invalid(messages) => {
                let _ = writeln!(out, "{id}: invalid");
                for message in messages {
                    let _ = writeln!(out, "  - {message}");
                }
            }
        }
    }
    out
}
