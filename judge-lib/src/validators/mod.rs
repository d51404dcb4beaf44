//! Built-in validators
//!
//! Each built-in kind mirrors the server-side validation of the same name.
//! Everything except `uniqueness` is decided locally and returns a closed
//! [`Validation`].

mod basic;
mod confirmation;
mod context;
mod format;
mod numericality;
mod uniqueness;

pub use context::Context;
pub use format::ruby_to_rust_pattern;

use crate::error::Error;
use crate::validation::Validation;

/// The closed set of built-in validator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Presence,
    Length,
    Exclusion,
    Inclusion,
    Format,
    Numericality,
    Acceptance,
    Confirmation,
    Uniqueness,
}

impl Builtin {
    /// Every built-in kind.
    pub const ALL: [Builtin; 9] = [
        Builtin::Presence,
        Builtin::Length,
        Builtin::Exclusion,
        Builtin::Inclusion,
        Builtin::Format,
        Builtin::Numericality,
        Builtin::Acceptance,
        Builtin::Confirmation,
        Builtin::Uniqueness,
    ];

    /// The rule kind this built-in answers to.
    pub fn name(self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Length => "length",
            Self::Exclusion => "exclusion",
            Self::Inclusion => "inclusion",
            Self::Format => "format",
            Self::Numericality => "numericality",
            Self::Acceptance => "acceptance",
            Self::Confirmation => "confirmation",
            Self::Uniqueness => "uniqueness",
        }
    }

    /// Looks up a built-in by rule kind (case-sensitive).
    pub fn from_name(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == kind)
    }

    /// Returns `true` if the validator returns a pending validation.
    pub fn is_async(self) -> bool {
        matches!(self, Self::Uniqueness)
    }

    /// Returns `true` if `allow_blank` short-circuits this validator.
    pub fn honors_allow_blank(self) -> bool {
        !matches!(self, Self::Presence | Self::Acceptance)
    }

    /// Reports configuration errors the rule would raise, without evaluating
    /// it: unparseable patterns and missing confirmation targets.
    pub fn check(self, cx: &Context<'_>) -> Result<(), Error> {
        if self.honors_allow_blank() && cx.skip_blank() {
            return Ok(());
        }

        match self {
            Self::Format => format::check(cx),
            Self::Confirmation => confirmation::target(cx).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Evaluates a rule.
    pub fn run(self, cx: &Context<'_>) -> Result<Validation, Error> {
        if self.honors_allow_blank() && cx.skip_blank() {
            return Ok(Validation::valid());
        }

        match self {
            Self::Presence => Ok(basic::presence(cx)),
            Self::Length => Ok(basic::length(cx)),
            Self::Exclusion => Ok(basic::exclusion(cx)),
            Self::Inclusion => Ok(basic::inclusion(cx)),
            Self::Format => format::validate(cx),
            Self::Numericality => Ok(numericality::validate(cx)),
            Self::Acceptance => Ok(basic::acceptance(cx)),
            Self::Confirmation => confirmation::validate(cx),
            Self::Uniqueness => Ok(uniqueness::validate(cx)),
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
