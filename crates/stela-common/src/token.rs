//! The token vocabulary consumed from the lexer.
//!
//! The lexer itself is out of scope for this crate (see the crate-level
//! docs); we only need the shape of what it hands us.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The lexical category of a [`Token`].
///
/// The lexer assigns these; the checker layers never match on `kind` for
/// anything beyond error messages, since token equality is by lexeme alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Literal,
    Symbol,
}

/// An interned lexeme with source coordinates.
///
/// Tokens are value-equatable **by lexeme only** — two tokens with the same
/// text but different positions compare equal. This is what lets the checker
/// compare a type parameter token against a constructor's type-instance
/// token without caring where either was written.
#[derive(Debug, Clone)]
pub struct Token {
    pub lexeme: Rc<str>,
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
    pub file: Rc<str>,
}

impl Token {
    pub fn new(lexeme: impl Into<Rc<str>>, kind: TokenKind, line: u32, column: u32, file: impl Into<Rc<str>>) -> Self {
        Token {
            lexeme: lexeme.into(),
            kind,
            line,
            column,
            file: file.into(),
        }
    }

    /// A token with no real position, for module-level sentinels (§9's
    /// "global dummy tokens").
    pub fn synthetic(lexeme: impl Into<Rc<str>>) -> Self {
        Token::new(lexeme, TokenKind::Identifier, 0, 0, "<builtin>")
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.lexeme == other.lexeme
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lexeme.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{}:{})", self.lexeme, self.file, self.line, self.column)
    }
}

/// Module-level sentinel tokens (§9). `Token` holds `Rc<str>` fields, so it
/// is neither `Send` nor `Sync` and can't sit behind a `static`; each call
/// just builds a fresh one; `Token` equality is by lexeme alone, so every
/// call compares equal regardless.
pub mod sentinels {
    use super::Token;

    /// The `"*"` namespace/standin wildcard token.
    pub fn star_tok() -> Token {
        Token::synthetic("*")
    }

    /// The built-in `void` return type token.
    pub fn void_type_tok() -> Token {
        Token::synthetic("void")
    }
}

/// The wildcard namespace name: "search the holder's namespace then the global one".
pub const WILDCARD_NAMESPACE: &str = "*";
