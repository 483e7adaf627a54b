//! The type checker.
//!
//! Validates a type declaration end-to-end: parameter-name uniqueness,
//! non-shadowing of concrete types, and per-constructor validation, in the
//! order default → record → (weak policy only) list → map.

use rustc_hash::FxHashSet;

use stela_ast::{Program, TypeId, Validity};
use stela_common::{CheckError, CheckResult};
use stela_symtab::Scope;

use crate::constructor_checker::{
    check_default_constructor, check_list_constructor, check_map_constructor,
    check_record_constructor,
};
use crate::policy::CheckerPolicy;

/// Checks a single type declaration and, on success, sets its validity to
/// `Valid`. On failure the type is marked `Invalid` and the error is
/// returned for the driver to report — fatal to this declaration, not to
/// the rest of the program.
pub fn check_type(
    program: &Program,
    scope: &Scope,
    type_id: TypeId,
    policy: &CheckerPolicy,
) -> CheckResult<()> {
    let type_decl = &program.types[type_id];
    let _span =
        tracing::debug_span!("check_type", name = type_decl.name.lexeme(), ns = %type_decl.namespace)
            .entered();

    if let Err(err) = check_params_unique(type_decl) {
        type_decl.set_validity(Validity::Invalid);
        return Err(err);
    }
    if let Err(err) = check_no_shadowing(scope, type_decl) {
        type_decl.set_validity(Validity::Invalid);
        return Err(err);
    }
    if let Err(err) = check_declared_once(scope, type_id, type_decl) {
        type_decl.set_validity(Validity::Invalid);
        return Err(err);
    }

    let ns = type_decl.namespace.clone();

    for (i, ctor) in type_decl.default_constructors.iter().enumerate() {
        let prior = &type_decl.default_constructors[..i];
        if let Err(err) =
            check_default_constructor(program, scope, ctor, prior, type_id, type_decl, &ns, policy)
        {
            type_decl.set_validity(Validity::Invalid);
            return Err(wrap_as_invalid_type(err, &ctor.name));
        }
    }

    for (i, ctor) in type_decl.record_constructors.iter().enumerate() {
        let prior = &type_decl.record_constructors[..i];
        if let Err(err) =
            check_record_constructor(program, scope, ctor, prior, type_id, type_decl, &ns, policy)
        {
            type_decl.set_validity(Validity::Invalid);
            return Err(wrap_as_invalid_type(err, &ctor.name));
        }
    }

    if policy.allow_containers {
        for (i, ctor) in type_decl.list_constructors.iter().enumerate() {
            let prior = &type_decl.list_constructors[..i];
            if let Err(err) =
                check_list_constructor(program, scope, ctor, prior, type_id, type_decl, &ns, policy)
            {
                type_decl.set_validity(Validity::Invalid);
                return Err(wrap_as_invalid_type(err, &ctor.name));
            }
        }
        for (i, ctor) in type_decl.map_constructors.iter().enumerate() {
            let prior = &type_decl.map_constructors[..i];
            if let Err(err) =
                check_map_constructor(program, scope, ctor, prior, type_id, type_decl, &ns, policy)
            {
                type_decl.set_validity(Validity::Invalid);
                return Err(wrap_as_invalid_type(err, &ctor.name));
            }
        }
    }

    type_decl.set_validity(Validity::Valid);
    tracing::trace!(name = type_decl.name.lexeme(), "type declaration is valid");
    Ok(())
}

/// Step 1: no two formal parameters of one type may share a name.
fn check_params_unique(type_decl: &stela_ast::TypeDecl) -> CheckResult<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for param in &type_decl.params {
        if !seen.insert(param.lexeme()) {
            return Err(CheckError::invalid_type(
                param.clone(),
                format!(
                    "type parameter '{}' is declared more than once in '{}'",
                    param.lexeme(),
                    type_decl.name.lexeme()
                ),
            ));
        }
    }
    Ok(())
}

/// Step 2: no formal parameter may shadow a concrete type visible anywhere
/// in the program.
fn check_no_shadowing(scope: &Scope, type_decl: &stela_ast::TypeDecl) -> CheckResult<()> {
    for param in &type_decl.params {
        if scope.type_named_exists_anywhere(param.lexeme()) {
            return Err(CheckError::invalid_type(
                param.clone(),
                format!(
                    "type parameter '{}' shadows a concrete type already declared in the program",
                    param.lexeme()
                ),
            ));
        }
    }
    Ok(())
}

/// Step 3: `(T.name, |T.params|)` must be unique within its namespace. The
/// key collision itself is normally caught earlier, at `scope.add_type`
/// insertion time, since scopes arrive pre-populated; this is an
/// independent checker-level guard, verifying the key still resolves back
/// to this exact declaration.
fn check_declared_once(
    scope: &Scope,
    type_id: TypeId,
    type_decl: &stela_ast::TypeDecl,
) -> CheckResult<()> {
    match scope.get_type(&type_decl.namespace, type_decl.name.lexeme(), type_decl.arity() as u32) {
        Ok(found) if found == type_id => Ok(()),
        _ => Err(CheckError::invalid_type(
            type_decl.name.clone(),
            format!(
                "a type named '{}' with arity {} already exists in namespace '{}'",
                type_decl.name.lexeme(),
                type_decl.arity(),
                type_decl.namespace
            ),
        )),
    }
}

/// §7's propagation policy: the type checker catches `InvalidConstructor`
/// from the constructor checker and rewraps it as `InvalidType`, attributed
/// to the constructor's own token.
fn wrap_as_invalid_type(err: CheckError, ctor_token: &stela_common::Token) -> CheckError {
    match err {
        CheckError::InvalidConstructor { message, .. } => {
            CheckError::invalid_type(ctor_token.clone(), message)
        }
        other => other.attributed_to(ctor_token.clone()),
    }
}
