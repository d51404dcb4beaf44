//! Rule-set codec
//!
//! Every validated element carries a serialized rule-set: a JSON array of
//! rules, each naming a validator `kind` together with its `options` and the
//! already-localized `messages` it may report.
//!
//! ```
//! use judge_lib::rules::RuleSet;
//!
//! let rules = RuleSet::decode(
//!     r#"[{"kind":"length","options":{"minimum":3},"messages":{"too_short":"too short"}}]"#,
//! )?;
//! assert_eq!(rules.kinds(), vec!["length"]);
//! # Ok::<(), judge_lib::error::MalformedRuleSetError>(())
//! ```

mod messages;
mod options;
mod rule;

pub use messages::Messages;
pub use messages::default_message;
pub use options::Options;
pub use rule::Rule;
pub use rule::RuleSet;
