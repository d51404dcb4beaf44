//! Localized rule messages

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

/// Messages a rule may report, keyed by message key (`blank`, `too_short`, ...).
///
/// The server resolves these through its I18n chain before attaching the
/// rule-set, so they are used verbatim apart from `%{count}` interpolation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(BTreeMap<String, String>);

impl Messages {
    /// Returns the message for `key`, if the rule carries one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets a message.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.0.insert(key.into(), text.into());
    }

    /// Returns `true` if the rule carries no messages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the message for `key`, falling back to the English default.
    pub fn resolve(&self, key: &str) -> String {
        self.get(key).unwrap_or_else(|| default_message(key)).to_string()
    }

    /// Like [`resolve`](Self::resolve), interpolating `%{count}`.
    pub fn resolve_count(&self, key: &str, count: impl Display) -> String {
        self.resolve(key).replace("%{count}", &count.to_string())
    }
}

/// English fallback for a message key the rule did not carry.
pub fn default_message(key: &str) -> &'static str {
    match key {
        "blank" => "can't be blank",
        "too_short" => "is too short (minimum is %{count} characters)",
        "too_long" => "is too long (maximum is %{count} characters)",
        "wrong_length" => "is the wrong length (should be %{count} characters)",
        "exclusion" => "is reserved",
        "inclusion" => "is not included in the list",
        "not_a_number" => "is not a number",
        "not_an_integer" => "must be an integer",
        "greater_than" => "must be greater than %{count}",
        "greater_than_or_equal_to" => "must be greater than or equal to %{count}",
        "less_than" => "must be less than %{count}",
        "less_than_or_equal_to" => "must be less than or equal to %{count}",
        "equal_to" => "must be equal to %{count}",
        "odd" => "must be odd",
        "even" => "must be even",
        "accepted" => "must be accepted",
        "confirmation" => "doesn't match confirmation",
        "taken" => "has already been taken",
        _ => "is invalid",
    }
}
