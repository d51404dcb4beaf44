//! Validator context

use std::fmt::Display;

use crate::config::JudgeConfig;
use crate::element::Document;
use crate::element::Element;
use crate::network::Network;
use crate::rules::Messages;
use crate::rules::Options;
use crate::rules::Rule;

/// Everything a validator may look at while evaluating one rule.
pub struct Context<'a> {
    /// The element being validated.
    pub element: &'a dyn Element,
    /// The document the element belongs to (confirmation targets).
    pub document: &'a dyn Document,
    /// The rule being evaluated.
    pub rule: &'a Rule,
    /// Network primitive for server-backed checks.
    pub network: &'a Network,
    /// Engine configuration.
    pub config: &'a JudgeConfig,
}

impl<'a> Context<'a> {
    /// The element's current value.
    pub fn value(&self) -> &'a str {
        self.element.value()
    }

    pub fn options(&self) -> &'a Options {
        &self.rule.options
    }

    pub fn messages(&self) -> &'a Messages {
        &self.rule.messages
    }

    /// Returns `true` if the value is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.value().trim().is_empty()
    }

    /// Returns `true` if the value is blank and the rule allows blanks.
    pub fn skip_blank(&self) -> bool {
        self.options().allow_blank() && self.is_blank()
    }

    /// Resolves a message key of the current rule.
    pub fn message(&self, key: &str) -> String {
        self.messages().resolve(key)
    }

    /// Resolves a message key, interpolating `%{count}`.
    pub fn message_count(&self, key: &str, count: impl Display) -> String {
        self.messages().resolve_count(key, count)
    }
}
