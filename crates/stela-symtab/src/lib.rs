//! Symbol tables and scopes: per-namespace dictionaries of declarations
//! and constructors, wrapped in lexically nested scopes addressed by a
//! plain index shared with `stela-ast`.

pub mod constructor_table;
pub mod decl_table;
pub mod scope;

pub use constructor_table::{ConstructorTable, NamespaceConstructors};
pub use decl_table::{DeclKind, DeclTable, NamespaceSymbols};
pub use scope::{Scope, ScopeArena};
