//! Error types

mod config;
mod judge;
mod rules;
mod validation;
mod validator;

pub use config::*;
pub use judge::*;
pub use rules::*;
pub use validation::*;
pub use validator::*;
