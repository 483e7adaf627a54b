//! Per-namespace declaration bundles: types keyed by `(name, arity)`,
//! functions and variables keyed by `name` alone.

use rustc_hash::FxHashMap;

use stela_ast::{FunctionId, TypeId};
use stela_common::{CheckError, CheckResult, Token};

/// Which kind of declaration owns a name within a namespace, used only to
/// detect cross-kind clashes (a type, function, and variable can never share
/// a name in the same namespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Type,
    Function,
    Variable,
}

/// The symbol bundle for a single namespace.
#[derive(Debug, Default)]
pub struct NamespaceSymbols {
    registry: FxHashMap<String, DeclKind>,
    types: FxHashMap<(String, u32), TypeId>,
    functions: FxHashMap<String, FunctionId>,
    variables: FxHashMap<String, Token>,
}

impl NamespaceSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_registry(&self, name: &str, kind: DeclKind) -> CheckResult<()> {
        if let Some(existing) = self.registry.get(name) {
            if *existing != kind {
                return Err(CheckError::symbol_can_collide(format!(
                    "'{name}' is already declared as a different kind of symbol in this namespace"
                )));
            }
        }
        Ok(())
    }

    pub fn insert_type(&mut self, name: &str, arity: u32, id: TypeId) -> CheckResult<()> {
        self.check_registry(name, DeclKind::Type)?;
        let key = (name.to_string(), arity);
        if self.types.contains_key(&key) {
            return Err(CheckError::symbol_already_declared(format!(
                "a type named '{name}' with arity {arity} is already declared in this namespace"
            )));
        }
        self.registry.insert(name.to_string(), DeclKind::Type);
        self.types.insert(key, id);
        Ok(())
    }

    pub fn get_type(&self, name: &str, arity: u32) -> CheckResult<TypeId> {
        self.types
            .get(&(name.to_string(), arity))
            .copied()
            .ok_or_else(|| {
                CheckError::symbol_not_found(format!(
                    "no type named '{name}' with arity {arity} in this namespace"
                ))
            })
    }

    pub fn type_exists(&self, name: &str, arity: u32) -> bool {
        self.types.contains_key(&(name.to_string(), arity))
    }

    /// Every overload of `name` regardless of parameter count.
    pub fn types_named(&self, name: &str) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|((n, _), _)| n == name)
            .map(|(_, id)| *id)
            .collect()
    }

    pub fn insert_function(&mut self, name: &str, id: FunctionId) -> CheckResult<()> {
        self.check_registry(name, DeclKind::Function)?;
        if self.functions.contains_key(name) {
            return Err(CheckError::symbol_already_declared(format!(
                "a function named '{name}' is already declared in this namespace"
            )));
        }
        self.registry.insert(name.to_string(), DeclKind::Function);
        self.functions.insert(name.to_string(), id);
        Ok(())
    }

    pub fn get_function(&self, name: &str) -> CheckResult<FunctionId> {
        self.functions.get(name).copied().ok_or_else(|| {
            CheckError::symbol_not_found(format!("no function named '{name}' in this namespace"))
        })
    }

    pub fn function_exists(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn insert_variable(&mut self, name: &str, token: Token) -> CheckResult<()> {
        self.check_registry(name, DeclKind::Variable)?;
        if self.variables.contains_key(name) {
            return Err(CheckError::symbol_already_declared(format!(
                "a variable named '{name}' is already declared in this namespace"
            )));
        }
        self.registry.insert(name.to_string(), DeclKind::Variable);
        self.variables.insert(name.to_string(), token);
        Ok(())
    }

    pub fn get_variable(&self, name: &str) -> CheckResult<&Token> {
        self.variables.get(name).ok_or_else(|| {
            CheckError::symbol_not_found(format!("no variable named '{name}' in this namespace"))
        })
    }

    pub fn variable_exists(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

/// The full declaration table: one [`NamespaceSymbols`] bundle per
/// namespace, plus the "any namespace" queries the checker uses to detect
/// formal-parameter shadowing.
#[derive(Debug, Default)]
pub struct DeclTable {
    namespaces: FxHashMap<String, NamespaceSymbols>,
}

impl DeclTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn namespace_mut(&mut self, ns: &str) -> &mut NamespaceSymbols {
        self.namespaces.entry(ns.to_string()).or_default()
    }

    pub fn namespace(&self, ns: &str) -> Option<&NamespaceSymbols> {
        self.namespaces.get(ns)
    }

    pub fn insert_type(&mut self, ns: &str, name: &str, arity: u32, id: TypeId) -> CheckResult<()> {
        self.namespace_mut(ns).insert_type(name, arity, id)
    }

    pub fn get_type(&self, ns: &str, name: &str, arity: u32) -> CheckResult<TypeId> {
        self.namespace(ns)
            .ok_or_else(|| CheckError::symbol_not_found(format!("unknown namespace '{ns}'")))?
            .get_type(name, arity)
    }

    pub fn type_exists(&self, ns: &str, name: &str, arity: u32) -> bool {
        self.namespace(ns).is_some_and(|s| s.type_exists(name, arity))
    }

    pub fn types_named(&self, ns: &str, name: &str) -> Vec<TypeId> {
        self.namespace(ns).map(|s| s.types_named(name)).unwrap_or_default()
    }

    /// Tolerant form: searches every namespace in the table. Used to detect
    /// a type declaration's formal parameter shadowing a real type name.
    pub fn type_exists_anywhere(&self, name: &str, arity: u32) -> bool {
        self.namespaces.values().any(|s| s.type_exists(name, arity))
    }

    /// Whether a concrete type named `name` exists in *any* namespace,
    /// irrespective of arity.
    pub fn type_named_exists_anywhere(&self, name: &str) -> bool {
        self.namespaces.values().any(|s| !s.types_named(name).is_empty())
    }

    pub fn insert_function(&mut self, ns: &str, name: &str, id: FunctionId) -> CheckResult<()> {
        self.namespace_mut(ns).insert_function(name, id)
    }

    pub fn function_exists(&self, ns: &str, name: &str) -> bool {
        self.namespace(ns).is_some_and(|s| s.function_exists(name))
    }

    pub fn insert_variable(&mut self, ns: &str, name: &str, token: Token) -> CheckResult<()> {
        self.namespace_mut(ns).insert_variable(name, token)
    }

    pub fn variable_exists(&self, ns: &str, name: &str) -> bool {
        self.namespace(ns).is_some_and(|s| s.variable_exists(name))
    }
}
