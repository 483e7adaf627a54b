//! Per-namespace constructor bundles, mirroring [`crate::decl_table::DeclTable`]
//! for the four constructor flavors.

use rustc_hash::FxHashMap;

use stela_ast::{DefaultConstructorId, ListConstructorId, MapConstructorId, RecordConstructorId};
use stela_common::{CheckError, CheckResult};

#[derive(Debug, Default)]
pub struct NamespaceConstructors {
    default_constructors: FxHashMap<(String, u32), DefaultConstructorId>,
    record_constructors: FxHashMap<(String, u32), RecordConstructorId>,
    list_constructors: FxHashMap<(String, u32), ListConstructorId>,
    map_constructors: FxHashMap<(String, u32), MapConstructorId>,
}

macro_rules! constructor_kind {
    ($insert:ident, $get:ident, $exists:ident, $field:ident, $id_ty:ty, $label:literal) => {
        pub fn $insert(&mut self, name: &str, arity: u32, id: $id_ty) -> CheckResult<()> {
            let key = (name.to_string(), arity);
            if self.$field.contains_key(&key) {
                return Err(CheckError::symbol_already_declared(format!(
                    "a {} constructor named '{name}' with arity {arity} is already declared in this namespace; check for a colliding import",
                    $label
                )));
            }
            self.$field.insert(key, id);
            Ok(())
        }

        pub fn $get(&self, name: &str, arity: u32) -> CheckResult<$id_ty> {
            self.$field.get(&(name.to_string(), arity)).copied().ok_or_else(|| {
                CheckError::symbol_not_found(format!(
                    "no {} constructor named '{name}' with arity {arity}",
                    $label
                ))
            })
        }

        pub fn $exists(&self, name: &str, arity: u32) -> bool {
            self.$field.contains_key(&(name.to_string(), arity))
        }
    };
}

impl NamespaceConstructors {
    pub fn new() -> Self {
        Self::default()
    }

    constructor_kind!(
        insert_default_constructor,
        get_default_constructor,
        default_constructor_exists,
        default_constructors,
        DefaultConstructorId,
        "default"
    );
    constructor_kind!(
        insert_record_constructor,
        get_record_constructor,
        record_constructor_exists,
        record_constructors,
        RecordConstructorId,
        "record"
    );
    constructor_kind!(
        insert_list_constructor,
        get_list_constructor,
        list_constructor_exists,
        list_constructors,
        ListConstructorId,
        "list"
    );
    constructor_kind!(
        insert_map_constructor,
        get_map_constructor,
        map_constructor_exists,
        map_constructors,
        MapConstructorId,
        "map"
    );
}

#[derive(Debug, Default)]
pub struct ConstructorTable {
    namespaces: FxHashMap<String, NamespaceConstructors>,
}

impl ConstructorTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn namespace_mut(&mut self, ns: &str) -> &mut NamespaceConstructors {
        self.namespaces.entry(ns.to_string()).or_default()
    }

    pub fn namespace(&self, ns: &str) -> Option<&NamespaceConstructors> {
        self.namespaces.get(ns)
    }

    pub fn insert_default_constructor(
        &mut self,
        ns: &str,
        name: &str,
        arity: u32,
        id: DefaultConstructorId,
    ) -> CheckResult<()> {
        self.namespace_mut(ns).insert_default_constructor(name, arity, id)
    }

    pub fn insert_record_constructor(
        &mut self,
        ns: &str,
        name: &str,
        arity: u32,
        id: RecordConstructorId,
    ) -> CheckResult<()> {
        self.namespace_mut(ns).insert_record_constructor(name, arity, id)
    }

    pub fn insert_list_constructor(
        &mut self,
        ns: &str,
        name: &str,
        arity: u32,
        id: ListConstructorId,
    ) -> CheckResult<()> {
        self.namespace_mut(ns).insert_list_constructor(name, arity, id)
    }

    pub fn insert_map_constructor(
        &mut self,
        ns: &str,
        name: &str,
        arity: u32,
        id: MapConstructorId,
    ) -> CheckResult<()> {
        self.namespace_mut(ns).insert_map_constructor(name, arity, id)
    }

    pub fn default_constructor_exists(&self, ns: &str, name: &str, arity: u32) -> bool {
        self.namespace(ns).is_some_and(|s| s.default_constructor_exists(name, arity))
    }

    pub fn record_constructor_exists(&self, ns: &str, name: &str, arity: u32) -> bool {
        self.namespace(ns).is_some_and(|s| s.record_constructor_exists(name, arity))
    }
}
