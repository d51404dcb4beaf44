//! Client-side record validation engine
//!
//! Re-executes server-declared validation rules against form input without a
//! round trip, except for checks such as uniqueness that need server state.
//! Each element carries a serialized rule-set; [`Judge`] decodes it, runs the
//! validator registered for every rule kind and reports one merged outcome.

pub mod config;
pub mod element;
pub mod error;
pub mod network;
pub mod registry;
pub mod rules;
pub mod validation;
pub mod validators;

mod judge;

pub use config::JudgeConfig;
pub use element::Document;
pub use element::Element;
pub use element::Form;
pub use element::FormElement;
pub use judge::*;
pub use network::Network;
pub use network::Reply;
pub use network::ReqwestTransport;
pub use network::Transport;
pub use validation::Validation;
pub use validation::ValidationState;
