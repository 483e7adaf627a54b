//! The error taxonomy shared by every checker layer.
//!
//! Each variant is a distinct kind carrying a message and, where applicable,
//! the offending token. Propagation between layers is explicit `Result`
//! chaining (see `stela-checker`), not exceptions.

use crate::token::Token;

/// A structured checker error, attributable to a source token when one is
/// available.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckError {
    /// Insertion into a table where the key already exists.
    #[error("{message}")]
    SymbolAlreadyDeclared { token: Option<Token>, message: String },

    /// A name is requested for kind K but the namespace already binds it to
    /// a different kind.
    #[error("{message}")]
    SymbolCanCollide { token: Option<Token>, message: String },

    /// Lookup miss.
    #[error("{message}")]
    SymbolNotFound { token: Option<Token>, message: String },

    /// Reserved for symbol-shape violations.
    #[error("{message}")]
    InvalidSymbol { token: Option<Token>, message: String },

    /// A type declaration or a type instance failed validation.
    #[error("{message}")]
    InvalidType { token: Option<Token>, message: String },

    /// A constructor is duplicated, depends on an invalid or missing type,
    /// or (weak variant) violates visibility.
    #[error("{message}")]
    InvalidConstructor { token: Option<Token>, message: String },

    /// A non-void function's body fails to terminate.
    #[error("{message}")]
    InvalidFunction { token: Option<Token>, message: String },

    /// An if-statement is queried for its else branch when none exists.
    #[error("{message}")]
    BranchError { token: Option<Token>, message: String },

    /// A switch has no default when one is required by the consumer.
    #[error("{message}")]
    CaseError { token: Option<Token>, message: String },

    /// Generic malformed-type access.
    #[error("{message}")]
    TypeError { token: Option<Token>, message: String },
}

impl CheckError {
    pub fn token(&self) -> Option<&Token> {
        match self {
            CheckError::SymbolAlreadyDeclared { token, .. }
            | CheckError::SymbolCanCollide { token, .. }
            | CheckError::SymbolNotFound { token, .. }
            | CheckError::InvalidSymbol { token, .. }
            | CheckError::InvalidType { token, .. }
            | CheckError::InvalidConstructor { token, .. }
            | CheckError::InvalidFunction { token, .. }
            | CheckError::BranchError { token, .. }
            | CheckError::CaseError { token, .. }
            | CheckError::TypeError { token, .. } => token.as_ref(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CheckError::SymbolAlreadyDeclared { message, .. }
            | CheckError::SymbolCanCollide { message, .. }
            | CheckError::SymbolNotFound { message, .. }
            | CheckError::InvalidSymbol { message, .. }
            | CheckError::InvalidType { message, .. }
            | CheckError::InvalidConstructor { message, .. }
            | CheckError::InvalidFunction { message, .. }
            | CheckError::BranchError { message, .. }
            | CheckError::CaseError { message, .. }
            | CheckError::TypeError { message, .. } => message,
        }
    }

    /// Re-attribute this error to a different token, preserving its kind and
    /// message. Used when a checker layer catches an error from a collaborator
    /// and rewraps it attributed to its own offending token (§7).
    pub fn attributed_to(mut self, token: Token) -> Self {
        let slot = match &mut self {
            CheckError::SymbolAlreadyDeclared { token, .. }
            | CheckError::SymbolCanCollide { token, .. }
            | CheckError::SymbolNotFound { token, .. }
            | CheckError::InvalidSymbol { token, .. }
            | CheckError::InvalidType { token, .. }
            | CheckError::InvalidConstructor { token, .. }
            | CheckError::InvalidFunction { token, .. }
            | CheckError::BranchError { token, .. }
            | CheckError::CaseError { token, .. }
            | CheckError::TypeError { token, .. } => token,
        };
        *slot = Some(token);
        self
    }

    pub fn symbol_already_declared(message: impl Into<String>) -> Self {
        CheckError::SymbolAlreadyDeclared { token: None, message: message.into() }
    }

    pub fn symbol_can_collide(message: impl Into<String>) -> Self {
        CheckError::SymbolCanCollide { token: None, message: message.into() }
    }

    pub fn symbol_not_found(message: impl Into<String>) -> Self {
        CheckError::SymbolNotFound { token: None, message: message.into() }
    }

    pub fn invalid_type(token: Token, message: impl Into<String>) -> Self {
        CheckError::InvalidType { token: Some(token), message: message.into() }
    }

    pub fn invalid_constructor(message: impl Into<String>) -> Self {
        CheckError::InvalidConstructor { token: None, message: message.into() }
    }

    pub fn invalid_function(token: Token, message: impl Into<String>) -> Self {
        CheckError::InvalidFunction { token: Some(token), message: message.into() }
    }

    pub fn branch_error(message: impl Into<String>) -> Self {
        CheckError::BranchError { token: None, message: message.into() }
    }

    pub fn case_error(message: impl Into<String>) -> Self {
        CheckError::CaseError { token: None, message: message.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        CheckError::TypeError { token: None, message: message.into() }
    }

    /// A diagnostic-ready rendering including the offending position, if any.
    pub fn located_message(&self) -> String {
        match self.token() {
            Some(tok) => format!("{} ({})", self.message(), tok),
            None => self.message().to_string(),
        }
    }
}

/// The result type threaded through every checker operation.
pub type CheckResult<T> = Result<T, CheckError>;
