//! Orchestrator
//!
//! [`Judge`] decodes an element's rule-set, dispatches each rule to its
//! validator and merges the per-rule [`Validation`]s into one outcome.

use futures::future::join_all;
use log::debug;
use log::trace;

use crate::config::JudgeConfig;
use crate::element::Document;
use crate::element::Element;
use crate::element::Form;
use crate::error::Error;
use crate::network::Network;
use crate::network::Transport;
use crate::registry::ValidatorRegistry;
use crate::rules::RuleSet;
use crate::validation::Validation;
use crate::validation::ValidationState;
use crate::validators::Context;

/// Merged result of every rule of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementOutcome {
    /// Every rule closed valid.
    Valid,
    /// At least one closed rule is invalid; messages in rule order.
    Invalid(Vec<String>),
    /// Nothing invalid yet, but some rules are still pending.
    Pending,
}

impl ElementOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Messages of an invalid outcome; empty otherwise.
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Invalid(messages) => messages,
            _ => &[],
        }
    }
}

/// The validation of one rule within an [`ElementRun`].
#[derive(Debug, Clone)]
pub struct RuleValidation {
    /// Kind of the rule that produced this validation.
    pub kind: String,
    pub validation: Validation,
}

/// Per-rule validations produced by one orchestration run.
#[derive(Debug, Clone)]
pub struct ElementRun {
    element_id: String,
    validations: Vec<RuleValidation>,
}

impl ElementRun {
    /// Id of the validated element.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    /// The validations, one per rule, in rule order.
    pub fn validations(&self) -> &[RuleValidation] {
        &self.validations
    }

    /// Merges the current state of every validation.
    ///
    /// Invalid as soon as any closed validation is invalid, regardless of
    /// pending ones.
    pub fn outcome(&self) -> ElementOutcome {
        let mut messages = Vec::new();
        let mut pending = false;

        for rule in &self.validations {
            match rule.validation.state() {
                ValidationState::Pending => pending = true,
                ValidationState::Valid => {}
                ValidationState::Invalid(m) => messages.extend(m),
            }
        }

        if !messages.is_empty() {
            ElementOutcome::Invalid(messages)
        } else if pending {
            ElementOutcome::Pending
        } else {
            ElementOutcome::Valid
        }
    }

    /// Waits for every pending validation to close, then merges.
    pub async fn settle(&self) -> ElementOutcome {
        let pending: Vec<_> = self
            .validations
            .iter()
            .filter(|rule| rule.validation.is_pending())
            .map(|rule| rule.validation.closed_state())
            .collect();

        if !pending.is_empty() {
            trace!(
                "{}: waiting for {} pending validation(s)",
                self.element_id,
                pending.len()
            );
            join_all(pending).await;
        }

        self.outcome()
    }
}

/// The validation engine.
///
/// Owns the validator registry, the network primitive and the configuration.
/// Validators are registered through `&mut self` before validation starts.
///
/// # Example
///
/// ```
/// use judge_lib::{FormElement, Form, Judge};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), judge_lib::error::Error> {
/// let judge = Judge::new();
/// let name = FormElement::new("user_name")
///     .with_value("")
///     .with_rules(r#"[{"kind":"presence","options":{},"messages":{"blank":"can't be blank"}}]"#);
/// let form = Form::new().with(name.clone());
///
/// judge.validate(
///     &name,
///     &form,
///     |_| println!("valid"),
///     |element, messages| println!("{}: {}", element.id, messages.join(", ")),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Judge {
    registry: ValidatorRegistry,
    network: Network,
    config: JudgeConfig,
}

impl Judge {
    /// Creates an engine with the built-in validators, the default transport
    /// and the default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder.
    pub fn builder() -> JudgeBuilder {
        JudgeBuilder::new()
    }

    /// Registers a custom validator, replacing any existing one for `kind`.
    pub fn register<F>(&mut self, kind: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Context<'_>) -> Result<Validation, Error> + Send + Sync + 'static,
    {
        self.registry.register(kind, f);
        self
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Decodes the element's rules and runs every validator.
    ///
    /// Every kind is resolved and every built-in's configuration (patterns,
    /// confirmation targets) checked before any validator runs, so these
    /// errors never leave a request in flight. Errors raised by custom
    /// validators while running are still returned as they occur.
    pub fn run(&self, element: &dyn Element, document: &dyn Document) -> Result<ElementRun, Error> {
        let rules = match element.rules() {
            Some(raw) => RuleSet::decode(raw)?,
            None => RuleSet::default(),
        };
        debug!("{}: validating {} rule(s)", element.id(), rules.len());

        let validators = rules
            .iter()
            .map(|rule| self.registry.resolve(&rule.kind))
            .collect::<Result<Vec<_>, _>>()?;

        let context = |rule| Context {
            element,
            document,
            rule,
            network: &self.network,
            config: &self.config,
        };

        for (rule, validator) in rules.iter().zip(&validators) {
            validator.check(&context(rule))?;
        }

        let mut validations = Vec::with_capacity(rules.len());
        for (rule, validator) in rules.iter().zip(&validators) {
            let validation = validator.run(&context(rule))?;
            trace!("{}: {} -> {:?}", element.id(), rule.kind, validation);
            validations.push(RuleValidation {
                kind: rule.kind.clone(),
                validation,
            });
        }

        Ok(ElementRun {
            element_id: element.id().to_string(),
            validations,
        })
    }

    /// Validates an element and reports through exactly one callback.
    ///
    /// Synchronous failures are reported immediately without waiting for
    /// pending rules; those keep running but are not joined into the report.
    /// If nothing failed but rules are pending, the callback fires from a
    /// spawned task once they have all closed, so this must be called from
    /// within a tokio runtime.
    ///
    /// Configuration errors are returned and neither callback fires.
    pub fn validate<E, V, I>(
        &self,
        element: &E,
        document: &dyn Document,
        on_valid: V,
        on_invalid: I,
    ) -> Result<(), Error>
    where
        E: Element + Clone + 'static,
        V: FnOnce(&E) + Send + 'static,
        I: FnOnce(&E, Vec<String>) + Send + 'static,
    {
        let run = self.run(element, document)?;

        match run.outcome() {
            ElementOutcome::Invalid(messages) => {
                debug!("{}: invalid ({} message(s))", run.element_id, messages.len());
                on_invalid(element, messages);
            }
            ElementOutcome::Valid => {
                debug!("{}: valid", run.element_id);
                on_valid(element);
            }
            ElementOutcome::Pending => {
                let element = element.clone();
                tokio::spawn(async move {
                    match run.settle().await {
                        ElementOutcome::Invalid(messages) => {
                            debug!("{}: invalid after settling", run.element_id);
                            on_invalid(&element, messages);
                        }
                        _ => {
                            debug!("{}: valid after settling", run.element_id);
                            on_valid(&element);
                        }
                    }
                });
            }
        }

        Ok(())
    }

    /// Validates every element of a form that carries a rule-set and waits
    /// for all outcomes.
    pub async fn validate_form(&self, form: &Form) -> Result<Vec<(String, ElementOutcome)>, Error> {
        let runs = form
            .elements()
            .iter()
            .filter(|element| element.rules().is_some())
            .map(|element| self.run(element, form))
            .collect::<Result<Vec<_>, _>>()?;

        let outcomes = join_all(runs.iter().map(ElementRun::settle)).await;

        Ok(runs
            .iter()
            .map(|run| run.element_id.clone())
            .zip(outcomes)
            .collect())
    }
}

impl Default for Judge {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Judge`].
///
/// # Example
///
/// ```
/// use judge_lib::{Judge, JudgeConfig, ReqwestTransport};
///
/// let judge = Judge::builder()
///     .config(JudgeConfig::default().with_origin("https://example.com"))
///     .transport(ReqwestTransport::new())
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct JudgeBuilder {
    registry: Option<ValidatorRegistry>,
    network: Option<Network>,
    config: Option<JudgeConfig>,
}

impl JudgeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a prepared registry instead of the built-ins.
    pub fn registry(mut self, registry: ValidatorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration.
    pub fn config(mut self, config: JudgeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the transport used by server-backed validators.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.network = Some(Network::new(transport));
        self
    }

    /// Sets the network primitive directly.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Builds the [`Judge`].
    pub fn build(self) -> Judge {
        Judge {
            registry: self.registry.unwrap_or_default(),
            network: self.network.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
        }
    }
}
