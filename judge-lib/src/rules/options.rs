//! Typed access to rule options

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// The options object of a rule.
///
/// Values are kept as raw JSON; the accessors coerce them the way the
/// server-side generator emits them (numbers may arrive as strings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    /// Returns the raw value of an option.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Sets an option, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns `true` if the option is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns `true` if the option is the boolean `true`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Value::Bool(true)))
    }

    /// Returns `true` if blank values skip the rule.
    pub fn allow_blank(&self) -> bool {
        self.flag("allow_blank")
    }

    /// Returns a numeric option, accepting numbers and numeric strings.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a non-negative integer option; whole floats such as `3.0`
    /// count as integers.
    pub fn count(&self, name: &str) -> Option<usize> {
        match self.get(name)? {
            Value::Number(n) => match n.as_u64() {
                Some(n) => usize::try_from(n).ok(),
                None => n
                    .as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
                    .map(|f| f as usize),
            },
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a string option.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    /// Returns an option as a list of strings.
    ///
    /// Arrays yield each scalar element rendered as a string; a single scalar
    /// yields a one-element list.
    pub fn strings(&self, name: &str) -> Option<Vec<String>> {
        match self.get(name)? {
            Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
            other => scalar_to_string(other).map(|s| vec![s]),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
