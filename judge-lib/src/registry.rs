//! Validator registry
//!
//! Maps rule kinds to validators. Built-ins are a closed enumeration; custom
//! kinds are closures registered at startup. Lookup is by exact,
//! case-sensitive kind.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;
use crate::error::UnknownValidatorError;
use crate::validation::Validation;
use crate::validators::Builtin;
use crate::validators::Context;

/// Signature shared by every custom validator.
pub type ValidatorFn = dyn Fn(&Context<'_>) -> Result<Validation, Error> + Send + Sync;

/// A resolved validator.
#[derive(Clone)]
pub enum Validator {
    Builtin(Builtin),
    Custom(Arc<ValidatorFn>),
}

impl Validator {
    /// Reports configuration errors without evaluating the rule. Custom
    /// validators have nothing to check up front.
    pub fn check(&self, cx: &Context<'_>) -> Result<(), Error> {
        match self {
            Self::Builtin(builtin) => builtin.check(cx),
            Self::Custom(_) => Ok(()),
        }
    }

    /// Evaluates a rule.
    pub fn run(&self, cx: &Context<'_>) -> Result<Validation, Error> {
        match self {
            Self::Builtin(builtin) => builtin.run(cx),
            Self::Custom(f) => f(cx),
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Registry of validators keyed by rule kind.
///
/// # Example
///
/// ```
/// use judge_lib::registry::ValidatorRegistry;
/// use judge_lib::Validation;
///
/// let mut registry = ValidatorRegistry::new();
/// registry.register("email", |cx| {
///     if cx.value().contains('@') {
///         Ok(Validation::valid())
///     } else {
///         Ok(Validation::invalid(cx.message("invalid")))
///     }
/// });
///
/// assert!(registry.contains("email"));
/// assert!(registry.resolve("presence").is_ok());
/// assert!(registry.resolve("Presence").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Validator>,
}

impl ValidatorRegistry {
    /// Creates a registry holding every built-in kind.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for builtin in Builtin::ALL {
            registry
                .validators
                .insert(builtin.name().to_string(), Validator::Builtin(builtin));
        }
        registry
    }

    /// Creates a registry without any validator.
    pub fn empty() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Registers a validator for `kind`.
    ///
    /// An existing entry, built-in or custom, is replaced.
    pub fn register<F>(&mut self, kind: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Context<'_>) -> Result<Validation, Error> + Send + Sync + 'static,
    {
        self.validators
            .insert(kind.into(), Validator::Custom(Arc::new(f)));
        self
    }

    /// Registers a built-in under its own name, restoring it after an override.
    pub fn register_builtin(&mut self, builtin: Builtin) -> &mut Self {
        self.validators
            .insert(builtin.name().to_string(), Validator::Builtin(builtin));
        self
    }

    /// Looks up the validator for `kind`.
    pub fn resolve(&self, kind: &str) -> Result<Validator, UnknownValidatorError> {
        self.validators
            .get(kind)
            .cloned()
            .ok_or_else(|| UnknownValidatorError::new(kind))
    }

    /// Returns `true` if `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.validators.contains_key(kind)
    }

    /// Returns every registered kind, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::JudgeConfig;
    use crate::element::Form;
    use crate::element::FormElement;
    use crate::network::Network;
    use crate::rules::Rule;
    use crate::validation::ValidationState;
    use crate::validators::testing::Offline;

    fn run(registry: &ValidatorRegistry, rule: &Rule, value: &str) -> ValidationState {
        let element = FormElement::new("field").with_value(value);
        let network = Network::new(Offline);
        let config = JudgeConfig::default();
        let cx = Context {
            element: &element,
            document: &Form::new(),
            rule,
            network: &network,
            config: &config,
        };
        registry.resolve(&rule.kind).unwrap().run(&cx).unwrap().state()
    }

    #[test]
    fn test_builtins_registered() {
        let registry = ValidatorRegistry::new();
        for builtin in Builtin::ALL {
            assert!(registry.contains(builtin.name()));
        }
        assert_eq!(registry.kinds().len(), Builtin::ALL.len());
        assert!(ValidatorRegistry::empty().kinds().is_empty());
    }

    #[test]
    fn test_unknown_kind() {
        let registry = ValidatorRegistry::new();
        let err = registry.resolve("email").unwrap_err();
        assert_eq!(err, UnknownValidatorError::new("email"));
        assert!(registry.resolve("PRESENCE").is_err());
    }

    #[test]
    fn test_custom_validator() {
        let mut registry = ValidatorRegistry::new();
        registry.register("even_length", |cx| {
            Ok(Validation::closed(if cx.value().len() % 2 == 0 {
                vec![]
            } else {
                vec![cx.message("odd")]
            }))
        });

        let rule = Rule::new("even_length");
        assert_eq!(run(&registry, &rule, "ab"), ValidationState::Valid);
        assert_eq!(
            run(&registry, &rule, "abc"),
            ValidationState::Invalid(vec!["must be odd".to_string()])
        );
    }

    #[test]
    fn test_register_overrides_builtin() {
        let mut registry = ValidatorRegistry::new();
        let rule = Rule::new("presence").message("blank", "required");

        assert!(run(&registry, &rule, "").is_invalid());

        registry.register("presence", |_| Ok(Validation::valid()));
        assert_eq!(run(&registry, &rule, ""), ValidationState::Valid);

        registry.register_builtin(Builtin::Presence);
        assert_eq!(
            run(&registry, &rule, ""),
            ValidationState::Invalid(vec!["required".to_string()])
        );
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ValidatorRegistry::empty();
        registry
            .register("custom", |_| Ok(Validation::invalid("first")))
            .register("custom", |_| Ok(Validation::invalid("second")));

        let rule = Rule::new("custom").option("unused", json!(1));
        assert_eq!(
            run(&registry, &rule, "x"),
            ValidationState::Invalid(vec!["second".to_string()])
        );
    }
}
