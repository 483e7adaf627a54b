//! A plain index identifying the lexical scope a block introduces.
//!
//! Scopes themselves are owned by `stela-symtab`'s `ScopeArena`; the AST only
//! needs to remember *which* scope each block-bearing statement introduced,
//! so this crate defines the index type both crates share.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeRef(pub u32);

impl fmt::Debug for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeRef({})", self.0)
    }
}
