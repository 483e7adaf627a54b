//! Lexically-nested scopes.

use rustc_hash::FxHashSet;
use tracing::trace;

use stela_ast::{FunctionId, ScopeRef, TypeDecl, TypeId};
use stela_common::{CheckError, CheckResult, Token};

use crate::constructor_table::ConstructorTable;
use crate::decl_table::DeclTable;

/// Owns a declaration table and a constructor table, nested lexically under
/// an optional parent. Scopes never walk their own parent chain; the
/// checker drives that search explicitly.
#[derive(Debug)]
pub struct Scope {
    decl_table: DeclTable,
    ctable: ConstructorTable,
    registered_namespaces: FxHashSet<String>,
    parent: Option<ScopeRef>,
    start_line: u32,
    end_line: u32,
}

impl Scope {
    pub fn new(parent: Option<ScopeRef>) -> Self {
        Scope {
            decl_table: DeclTable::new(),
            ctable: ConstructorTable::new(),
            registered_namespaces: FxHashSet::default(),
            parent,
            start_line: 0,
            end_line: 0,
        }
    }

    pub fn parent(&self) -> Option<ScopeRef> {
        self.parent
    }

    pub fn set_range(&mut self, start_line: u32, end_line: u32) {
        self.start_line = start_line;
        self.end_line = end_line;
    }

    pub fn range(&self) -> (u32, u32) {
        (self.start_line, self.end_line)
    }

    pub fn decl_table(&self) -> &DeclTable {
        &self.decl_table
    }

    pub fn ctable(&self) -> &ConstructorTable {
        &self.ctable
    }

    pub fn add_namespace(&mut self, name: impl Into<String>) {
        self.registered_namespaces.insert(name.into());
    }

    fn is_registered_namespace(&self, name: &str) -> bool {
        self.registered_namespaces.contains(name)
    }

    /// Inserts `type_decl` and cascades into its default and record
    /// constructors under the same namespace (and list/map constructors,
    /// under the weak-check variant's discretion — callers decide whether to
    /// call [`Scope::add_list_constructor`]/[`Scope::add_map_constructor`]
    /// for those).
    pub fn add_type(&mut self, ns: &str, id: TypeId, type_decl: &TypeDecl) -> CheckResult<()> {
        self.decl_table.insert_type(ns, type_decl.name.lexeme(), type_decl.arity() as u32, id)?;

        for (i, ctor) in type_decl.default_constructors.iter().enumerate() {
            let ctor_id = stela_ast::DefaultConstructorId::new(id, i as u32);
            self.add_default_constructor(ns, ctor.name.lexeme(), ctor.arity() as u32, ctor_id)?;
        }
        for (i, ctor) in type_decl.record_constructors.iter().enumerate() {
            let ctor_id = stela_ast::RecordConstructorId::new(id, i as u32);
            self.add_record_constructor(ns, ctor.name.lexeme(), ctor.arity() as u32, ctor_id)?;
        }
        Ok(())
    }

    fn check_constructor_name_collision(&self, ns: &str, name: &str) -> CheckResult<()> {
        if self.is_registered_namespace(name) {
            return Err(CheckError::symbol_can_collide(format!(
                "a constructor cannot share the name '{name}' with a namespace visible in this scope"
            )));
        }
        if self.decl_table.function_exists(ns, name) {
            return Err(CheckError::symbol_can_collide(format!(
                "a constructor cannot share the name '{name}' with a function already declared in this scope"
            )));
        }
        if self.decl_table.variable_exists(ns, name) {
            return Err(CheckError::symbol_can_collide(format!(
                "a constructor cannot share the name '{name}' with a variable already declared in this scope"
            )));
        }
        Ok(())
    }

    pub fn add_default_constructor(
        &mut self,
        ns: &str,
        name: &str,
        arity: u32,
        id: stela_ast::DefaultConstructorId,
    ) -> CheckResult<()> {
        self.check_constructor_name_collision(ns, name)?;
        trace!(ns, name, arity, "registering default constructor");
        self.ctable.insert_default_constructor(ns, name, arity, id)
    }

    pub fn add_record_constructor(
        &mut self,
        ns: &str,
        name: &str,
        arity: u32,
        id: stela_ast::RecordConstructorId,
    ) -> CheckResult<()> {
        self.check_constructor_name_collision(ns, name)?;
        trace!(ns, name, arity, "registering record constructor");
        self.ctable.insert_record_constructor(ns, name, arity, id)
    }

    pub fn add_list_constructor(
        &mut self,
        ns: &str,
        name: &str,
        id: stela_ast::ListConstructorId,
    ) -> CheckResult<()> {
        self.check_constructor_name_collision(ns, name)?;
        self.ctable.insert_list_constructor(ns, name, 1, id)
    }

    pub fn add_map_constructor(
        &mut self,
        ns: &str,
        name: &str,
        id: stela_ast::MapConstructorId,
    ) -> CheckResult<()> {
        self.check_constructor_name_collision(ns, name)?;
        self.ctable.insert_map_constructor(ns, name, 2, id)
    }

    pub fn add_function(&mut self, ns: &str, name: &str, id: FunctionId) -> CheckResult<()> {
        self.decl_table.insert_function(ns, name, id)
    }

    pub fn add_variable(&mut self, ns: &str, name: &str, token: Token) -> CheckResult<()> {
        self.decl_table.insert_variable(ns, name, token)
    }

    pub fn type_exists(&self, ns: &str, name: &str, arity: u32) -> bool {
        self.decl_table.type_exists(ns, name, arity)
    }

    pub fn get_type(&self, ns: &str, name: &str, arity: u32) -> CheckResult<TypeId> {
        self.decl_table.get_type(ns, name, arity)
    }

    /// The "any registered namespace" form used to detect formal-parameter
    /// shadowing.
    pub fn type_exists_anywhere(&self, name: &str, arity: u32) -> bool {
        self.decl_table.type_exists_anywhere(name, arity)
    }

    pub fn type_named_exists_anywhere(&self, name: &str) -> bool {
        self.decl_table.type_named_exists_anywhere(name)
    }
}

/// A flat arena of scopes addressed by [`ScopeRef`]; scopes are never freed
/// individually, matching the program-wide arena-plus-indices design used
/// throughout `stela-ast`.
#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, parent: Option<ScopeRef>) -> ScopeRef {
        let idx = ScopeRef(self.scopes.len() as u32);
        self.scopes.push(Scope::new(parent));
        idx
    }

    pub fn get(&self, scope: ScopeRef) -> &Scope {
        &self.scopes[scope.0 as usize]
    }

    pub fn get_mut(&mut self, scope: ScopeRef) -> &mut Scope {
        &mut self.scopes[scope.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stela_ast::{Arena, TypeDecl, Visibility};
    use stela_common::TokenKind;

    fn tok(s: &str) -> Token {
        Token::new(s, TokenKind::Identifier, 1, 1, "t.st")
    }

    fn dummy_type_id() -> TypeId {
        let mut types: Arena<TypeDecl> = Arena::new();
        types.alloc(TypeDecl::new(tok("Placeholder"), vec![], "*", Visibility::Public))
    }

    #[test]
    fn constructor_colliding_with_namespace_name_can_collide() {
        let mut scope = Scope::new(None);
        scope.add_namespace("Pair");
        let owner = dummy_type_id();
        let err = scope
            .add_default_constructor("*", "Pair", 2, stela_ast::DefaultConstructorId::new(owner, 0))
            .unwrap_err();
        assert!(matches!(err, CheckError::SymbolCanCollide { .. }));
    }

    #[test]
    fn child_scope_does_not_inherit_parent_types() {
        let mut arena = ScopeArena::new();
        let parent = arena.alloc(None);
        let mut types: Arena<TypeDecl> = Arena::new();
        let type_decl = TypeDecl::new(tok("Int"), vec![], "*", Visibility::Public);
        let type_id = types.alloc(type_decl);
        arena
            .get_mut(parent)
            .add_type("*", type_id, types.get(type_id))
            .unwrap();

        let child = arena.alloc(Some(parent));
        assert!(!arena.get(child).type_exists("*", "Int", 0));
        assert!(arena.get(parent).type_exists("*", "Int", 0));
        assert_eq!(arena.get(child).parent(), Some(parent));
    }
}
