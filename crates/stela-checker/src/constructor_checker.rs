//! The constructor checker.
//!
//! Step 1 (spec §4.4.1) is uniqueness: `(name, arity)` must not repeat among
//! one type's constructors of the same kind. This is checked here, against
//! the constructors already seen for this type, so a duplicate surfaces as
//! `InvalidConstructor` and can be rewrapped by `TypeChecker::check` as
//! `InvalidType` attributed to the constructor's token (§7, scenario 3) —
//! `ConstructorTable::insert_*`'s own collision check (population time, via
//! `scope.add_*`) guards a different thing: two constructors of the same
//! name colliding across namespaces/imports, and reports
//! `SymbolAlreadyDeclared` instead.

use stela_ast::{
    DefaultConstructor, ListConstructor, MapConstructor, RecordConstructor, TypeDecl, TypeId,
    TypeInstanceId, Validity,
};
use stela_ast::Program;
use stela_common::{CheckError, CheckResult, Token};
use stela_symtab::Scope;

use crate::policy::CheckerPolicy;
use crate::resolver::complex_check;

/// Resolves one constructor parameter and classifies it against the type it
/// belongs to.
fn check_param(
    program: &Program,
    scope: &Scope,
    param_id: TypeInstanceId,
    owner_id: TypeId,
    type_decl: &TypeDecl,
    ns: &str,
    policy: &CheckerPolicy,
) -> CheckResult<()> {
    let param = &program.type_instances[param_id];
    let attached_ns = param.namespace.clone();

    let resolved_type_id: Option<TypeId> =
        match complex_check(program, scope, param_id, ns, &type_decl.params, policy) {
            Ok(outcome) => {
                if outcome.is_standin {
                    None
                } else {
                    param.resolved_type()
                }
            }
            Err(_) if policy.allow_self_reference && param.matches_type_shape(type_decl) => {
                param.set_resolved_type(owner_id);
                Some(owner_id)
            }
            Err(_) => {
                return Err(CheckError::invalid_constructor(
                    "this constructor depends on a type instance that does not exist in the \
                     attached namespace, the local namespace, or the global namespace",
                ));
            }
        };

    if policy.enforce_visibility {
        if let Some(dep_id) = resolved_type_id {
            let dependency = &program.types[dep_id];
            if !dependency.is_public() && type_decl.is_public() {
                return Err(CheckError::invalid_constructor(
                    "this constructor depends on a type instance that's private while the type \
                     it builds is public; both must share the same visibility",
                ));
            }
        }
    }

    if ns == attached_ns && resolved_type_id == Some(owner_id) {
        return Ok(());
    }

    if let Some(dep_id) = resolved_type_id {
        if program.types[dep_id].validity() == Validity::Invalid {
            return Err(CheckError::invalid_constructor(format!(
                "this constructor failed type checking because the type '{}' it depends on is not valid",
                program.types[dep_id].name.lexeme()
            )));
        }
    }

    Ok(())
}

/// Rejects with `InvalidConstructor` when `ctor` shares `(name, arity)` with
/// any constructor in `prior` — the constructors of the same kind already
/// checked for this type, in declaration order, ahead of `ctor`.
fn check_unique<'a, T>(
    ctor_name: &Token,
    ctor_arity: usize,
    prior: &'a [T],
    kind: &str,
    name_of: impl Fn(&'a T) -> &'a Token,
    arity_of: impl Fn(&'a T) -> usize,
) -> CheckResult<()> {
    let duplicate = prior.iter().any(|other| name_of(other) == ctor_name && arity_of(other) == ctor_arity);
    if duplicate {
        return Err(CheckError::invalid_constructor(format!(
            "a {kind} constructor named '{}' with arity {ctor_arity} is already declared for this type; \
             check for a colliding import",
            ctor_name.lexeme()
        )));
    }
    Ok(())
}

pub fn check_default_constructor(
    program: &Program,
    scope: &Scope,
    ctor: &DefaultConstructor,
    prior: &[DefaultConstructor],
    owner_id: TypeId,
    type_decl: &TypeDecl,
    ns: &str,
    policy: &CheckerPolicy,
) -> CheckResult<()> {
    check_unique(&ctor.name, ctor.arity(), prior, "default", |c| &c.name, |c| c.arity())?;
    for &param_id in &ctor.params {
        check_param(program, scope, param_id, owner_id, type_decl, ns, policy)?;
    }
    Ok(())
}

pub fn check_record_constructor(
    program: &Program,
    scope: &Scope,
    ctor: &RecordConstructor,
    prior: &[RecordConstructor],
    owner_id: TypeId,
    type_decl: &TypeDecl,
    ns: &str,
    policy: &CheckerPolicy,
) -> CheckResult<()> {
    check_unique(&ctor.name, ctor.arity(), prior, "record", |c| &c.name, |c| c.arity())?;
    for (_, field_id) in &ctor.fields {
        check_param(program, scope, *field_id, owner_id, type_decl, ns, policy)?;
    }
    Ok(())
}

pub fn check_list_constructor(
    program: &Program,
    scope: &Scope,
    ctor: &ListConstructor,
    prior: &[ListConstructor],
    owner_id: TypeId,
    type_decl: &TypeDecl,
    ns: &str,
    policy: &CheckerPolicy,
) -> CheckResult<()> {
    check_unique(&ctor.name, 1, prior, "list", |c| &c.name, |_| 1)?;
    check_param(program, scope, ctor.param, owner_id, type_decl, ns, policy)
}

/// The value's resolved type comes from checking the *value* parameter,
/// never the key's — the source assigns the key's inferred type to the
/// value in this spot, which this implementation does not reproduce.
pub fn check_map_constructor(
    program: &Program,
    scope: &Scope,
    ctor: &MapConstructor,
    prior: &[MapConstructor],
    owner_id: TypeId,
    type_decl: &TypeDecl,
    ns: &str,
    policy: &CheckerPolicy,
) -> CheckResult<()> {
    check_unique(&ctor.name, 2, prior, "map", |c| &c.name, |_| 2)?;
    check_param(program, scope, ctor.key, owner_id, type_decl, ns, policy)?;
    check_param(program, scope, ctor.value, owner_id, type_decl, ns, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stela_ast::{Program, TypeInstance, TypeInstanceCategory, Visibility};
    use stela_common::{Token, TokenKind};

    fn tok(s: &str) -> Token {
        Token::new(s, TokenKind::Identifier, 1, 1, "t.st")
    }

    #[test]
    fn self_referencing_parameter_is_accepted_under_weak_policy() {
        let mut program = Program::new();
        let tree = TypeDecl::new(tok("Tree"), vec![tok("a")], "*", Visibility::Public);
        let owner_id = program.types.alloc(tree);

        let self_ref_id = program.type_instances.alloc(TypeInstance::new(
            tok("Tree"),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ));
        let ctor = DefaultConstructor { name: tok("Node"), params: vec![self_ref_id], owner: owner_id };

        let scope = Scope::new(None);
        let type_decl = program.types.get(owner_id).clone();
        check_default_constructor(&program, &scope, &ctor, &[], owner_id, &type_decl, "*", &CheckerPolicy::WEAK)
            .unwrap();
        assert_eq!(program.type_instances[self_ref_id].resolved_type(), Some(owner_id));
    }

    #[test]
    fn self_reference_rejected_under_stage_one_policy() {
        let mut program = Program::new();
        let tree = TypeDecl::new(tok("Tree"), vec![tok("a")], "*", Visibility::Public);
        let owner_id = program.types.alloc(tree);

        let self_ref_id = program.type_instances.alloc(TypeInstance::new(
            tok("Tree"),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ));
        let ctor = DefaultConstructor { name: tok("Node"), params: vec![self_ref_id], owner: owner_id };

        let scope = Scope::new(None);
        let type_decl = program.types.get(owner_id).clone();
        let err = check_default_constructor(
            &program,
            &scope,
            &ctor,
            &[],
            owner_id,
            &type_decl,
            "*",
            &CheckerPolicy::STAGE_ONE,
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::InvalidConstructor { .. }));
    }

    #[test]
    fn visibility_mismatch_rejected_under_weak_policy() {
        let mut program = Program::new();
        let private_dep = TypeDecl::new(tok("Secret"), vec![], "*", Visibility::Private);
        let dep_id = program.types.alloc(private_dep);
        program.types.get(dep_id).set_validity(Validity::Valid);

        let public_owner = TypeDecl::new(tok("Public"), vec![], "*", Visibility::Public);
        let owner_id = program.types.alloc(public_owner);

        let mut scope = Scope::new(None);
        scope.add_type("*", dep_id, program.types.get(dep_id)).unwrap();

        let dep_ref = program.type_instances.alloc(TypeInstance::new(
            tok("Secret"),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ));
        let ctor = DefaultConstructor { name: tok("Wrap"), params: vec![dep_ref], owner: owner_id };
        let type_decl = program.types.get(owner_id).clone();

        let err = check_default_constructor(&program, &scope, &ctor, &[], owner_id, &type_decl, "*", &CheckerPolicy::WEAK)
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidConstructor { .. }));
    }

    #[test]
    fn duplicate_default_constructor_name_and_arity_is_rejected() {
        let mut program = Program::new();
        let t = TypeDecl::new(tok("T"), vec![], "*", Visibility::Public);
        let owner_id = program.types.alloc(t);

        let int_param = program.type_instances.alloc(TypeInstance::new(
            tok("Int"),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ));
        let int_id = program.types.alloc(TypeDecl::new(tok("Int"), vec![], "*", Visibility::Public));
        let mut scope = Scope::new(None);
        scope.add_type("*", int_id, program.types.get(int_id)).unwrap();

        let first = DefaultConstructor { name: tok("C"), params: vec![int_param], owner: owner_id };
        let second = DefaultConstructor { name: tok("C"), params: vec![int_param], owner: owner_id };
        let type_decl = program.types.get(owner_id).clone();

        let err = check_default_constructor(
            &program,
            &scope,
            &second,
            std::slice::from_ref(&first),
            owner_id,
            &type_decl,
            "*",
            &CheckerPolicy::WEAK,
        )
        .unwrap_err();
        assert!(matches!(err, CheckError::InvalidConstructor { .. }));
    }

    #[test]
    fn map_constructor_assigns_value_type_from_value_param_not_key() {
        let mut program = Program::new();
        let int_decl = TypeDecl::new(tok("Int"), vec![], "*", Visibility::Public);
        let int_id = program.types.alloc(int_decl);
        let bool_decl = TypeDecl::new(tok("Bool"), vec![], "*", Visibility::Public);
        let bool_id = program.types.alloc(bool_decl);

        let mut scope = Scope::new(None);
        scope.add_type("*", int_id, program.types.get(int_id)).unwrap();
        scope.add_type("*", bool_id, program.types.get(bool_id)).unwrap();

        let owner = TypeDecl::new(tok("Table"), vec![], "*", Visibility::Public);
        let owner_id = program.types.alloc(owner);

        let key_id = program.type_instances.alloc(TypeInstance::new(
            tok("Int"),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ));
        let value_id = program.type_instances.alloc(TypeInstance::new(
            tok("Bool"),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ));
        let ctor = MapConstructor { name: tok("Of"), key: key_id, value: value_id, owner: owner_id };
        let type_decl = program.types.get(owner_id).clone();

        check_map_constructor(&program, &scope, &ctor, &[], owner_id, &type_decl, "*", &CheckerPolicy::WEAK).unwrap();

        assert_eq!(program.type_instances[key_id].resolved_type(), Some(int_id));
        assert_eq!(program.type_instances[value_id].resolved_type(), Some(bool_id));
    }
}
