//! Rule and RuleSet

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::Messages;
use super::Options;
use crate::error::MalformedRuleSetError;

/// One declarative validation check attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Name of the validator that evaluates this rule.
    pub kind: String,
    /// Validator options (bounds, patterns, `allow_blank`, ...).
    #[serde(default)]
    pub options: Options,
    /// Localized messages keyed by message key.
    #[serde(default)]
    pub messages: Messages,
}

impl Rule {
    /// Creates a rule with no options and no messages.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: Options::default(),
            messages: Messages::default(),
        }
    }

    /// Sets an option.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name, value);
        self
    }

    /// Sets a message.
    pub fn message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key, text);
        self
    }
}

/// The ordered rules attached to one element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule-set from already built rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Decodes the serialized rule-set of an element.
    ///
    /// Unknown fields on a rule are ignored. A rule without a string `kind`,
    /// or whose `options`/`messages` are not objects, fails the whole decode.
    pub fn decode(raw: &str) -> Result<Self, MalformedRuleSetError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| MalformedRuleSetError::Syntax(e.to_string()))?;

        let Value::Array(entries) = value else {
            return Err(MalformedRuleSetError::NotAnArray);
        };

        let rules = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                if !entry.is_object() {
                    return Err(MalformedRuleSetError::rule(index, "expected an object"));
                }
                serde_json::from_value::<Rule>(entry)
                    .map_err(|e| MalformedRuleSetError::rule(index, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Serializes the rule-set back into its wire format.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns an iterator over the rules.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the rule kinds in declaration order.
    pub fn kinds(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.kind.as_str()).collect()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.rules).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
