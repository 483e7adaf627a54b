//! The type instance: a syntactic reference to a type appearing in a
//! constructor parameter or function signature.

use std::cell::Cell;

use stela_common::Token;

use crate::arena::Idx;
use crate::type_decl::TypeDecl;

pub type TypeInstanceId = Idx<TypeInstance>;
pub type TypeId = Idx<TypeDecl>;

/// What syntactic shape a type instance has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeInstanceCategory {
    /// A user-defined (or built-in scalar) named type, e.g. `Int`, `Maybe(a)`.
    User,
    /// A tuple type, e.g. `(Int, Bool)`.
    Tuple,
    /// A list type, e.g. `[Int]`.
    List,
    /// A map type, e.g. `{Int: Bool}`.
    Map,
}

/// What a type instance was found to denote, set once by the resolver.
///
/// Distinguishing `BuiltinContainer` from `Concrete` avoids needing to
/// allocate a synthetic [`TypeDecl`] for every `Tuple`/`List`/`Map` instance
/// just to have something to point `resolved_type` at — containers are
/// concrete without naming a user-defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    /// Matched a formal type parameter visible at the resolution site.
    Standin,
    Concrete(TypeId),
    BuiltinContainer,
}

/// The pivotal data structure of the resolver.
///
/// `resolution` and `parametrized` use `Cell` rather than requiring `&mut`
/// access through the owning arena: resolution walks a tree of type
/// instances recursively and needs to mutate a child while a shared
/// reference to its parent is still live.
#[derive(Debug)]
pub struct TypeInstance {
    pub name: Token,
    pub category: TypeInstanceCategory,
    /// The namespace syntactically attached to this instance, or
    /// [`stela_common::WILDCARD_NAMESPACE`] ("unspecified — search the
    /// holder's namespace then the global one").
    pub namespace: String,
    /// Ordered type arguments (this instance's children).
    pub params: Vec<TypeInstanceId>,
    resolution: Cell<Resolution>,
    parametrized: Cell<bool>,
}

impl TypeInstance {
    pub fn new(name: Token, category: TypeInstanceCategory, namespace: impl Into<String>, params: Vec<TypeInstanceId>) -> Self {
        TypeInstance {
            name,
            category,
            namespace: namespace.into(),
            params,
            resolution: Cell::new(Resolution::Unresolved),
            parametrized: Cell::new(false),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution.get()
    }

    pub fn resolved_type(&self) -> Option<TypeId> {
        match self.resolution.get() {
            Resolution::Concrete(id) => Some(id),
            _ => None,
        }
    }

    pub fn set_resolved_type(&self, ty: TypeId) {
        self.resolution.set(Resolution::Concrete(ty));
    }

    pub fn set_builtin_container(&self) {
        self.resolution.set(Resolution::BuiltinContainer);
    }

    pub fn set_standin(&self) {
        self.resolution.set(Resolution::Standin);
    }

    pub fn is_parametrized(&self) -> bool {
        self.parametrized.get()
    }

    pub fn set_parametrized(&self, value: bool) {
        self.parametrized.set(value);
    }

    /// A type instance is abstract iff it matched a formal parameter rather
    /// than a concrete type or a built-in container.
    pub fn is_abstract(&self) -> bool {
        matches!(self.resolution.get(), Resolution::Standin)
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self.resolution.get(), Resolution::Concrete(_) | Resolution::BuiltinContainer)
    }

    /// Whether this instance is syntactically built by the given type: same
    /// name, same arity. Used for the weak checker's self-reference
    /// accommodation.
    pub fn matches_type_shape(&self, ty: &TypeDecl) -> bool {
        self.name == ty.name && self.arity() == ty.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stela_common::TokenKind;

    fn tok(s: &str) -> Token {
        Token::new(s, TokenKind::Identifier, 1, 1, "t.st")
    }

    #[test]
    fn starts_neither_concrete_nor_abstract_until_resolved() {
        let inst = TypeInstance::new(tok("a"), TypeInstanceCategory::User, "*", vec![]);
        assert!(!inst.is_concrete());
        assert!(!inst.is_abstract());
    }

    #[test]
    fn matching_a_standin_makes_it_abstract() {
        let inst = TypeInstance::new(tok("a"), TypeInstanceCategory::User, "*", vec![]);
        inst.set_standin();
        assert!(inst.is_abstract());
        assert!(!inst.is_concrete());
    }

    #[test]
    fn resolving_makes_it_concrete() {
        let mut types: crate::arena::Arena<TypeDecl> = crate::arena::Arena::new();
        let id = types.alloc(TypeDecl::new(tok("Int"), vec![], "*", crate::type_decl::Visibility::Public));
        let inst = TypeInstance::new(tok("Int"), TypeInstanceCategory::User, "*", vec![]);
        inst.set_resolved_type(id);
        assert!(inst.is_concrete());
    }
}
