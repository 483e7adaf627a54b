//! Common types shared by every layer of the stela semantic analyzer:
//! tokens, the error taxonomy, and logging setup.

pub mod error;
pub mod logging;
pub mod token;

pub use error::{CheckError, CheckResult};
pub use token::{sentinels, Token, TokenKind, WILDCARD_NAMESPACE};
