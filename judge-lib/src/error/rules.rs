//! Rule-set decoding errors

/// Errors raised while decoding the rule-set attached to an element.
///
/// These are configuration errors: the server emitted something the engine
/// cannot interpret, so the element cannot be validated at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRuleSetError {
    /// The raw attribute is not parseable JSON.
    #[error("Rule-set is not valid JSON: {0}")]
    Syntax(String),

    /// The top-level value is not an array of rules.
    #[error("Rule-set must be an array of rules")]
    NotAnArray,

    /// A single rule entry has the wrong shape.
    #[error("Rule {index} is malformed: {message}")]
    Rule {
        /// Position of the offending rule in the rule-set.
        index: usize,
        /// Description of the problem.
        message: String,
    },
}

impl MalformedRuleSetError {
    /// Creates a new rule-level error.
    pub fn rule(index: usize, message: impl Into<String>) -> Self {
        Self::Rule {
            index,
            message: message.into(),
        }
    }
}
