//! The type instance resolver: `simple_check` and `complex_check`,
//! generalized over a [`CheckerPolicy`] instead of three parallel variants.

use stela_ast::{Program, TypeInstanceId};
use stela_common::{CheckError, CheckResult, Token, WILDCARD_NAMESPACE};
use stela_symtab::Scope;
use tracing::{debug, trace};

use crate::policy::CheckerPolicy;

/// What resolving one instance discovered about its relationship to the
/// standins in scope. The source's `weak` variant reports both bits; the
/// `stage_one`/`lax` variants only ever care about `is_standin`
/// (`CheckerPolicy::parametric_result_shape` picks which one a caller reads).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub is_standin: bool,
    pub descends_from_standin: bool,
}

impl ResolutionOutcome {
    fn any(self) -> bool {
        self.is_standin || self.descends_from_standin
    }
}

/// Operates within a single namespace `ns`.
pub fn simple_check(
    program: &Program,
    scope: &Scope,
    instance_id: TypeInstanceId,
    ns: &str,
    standins: &[Token],
    policy: &CheckerPolicy,
) -> CheckResult<ResolutionOutcome> {
    let instance = &program.type_instances[instance_id];
    let mut outcome = ResolutionOutcome::default();

    match instance.category {
        stela_ast::TypeInstanceCategory::User => {
            match scope.get_type(ns, instance.name.lexeme(), instance.arity() as u32) {
                Ok(type_id) => {
                    for &param in &instance.params {
                        let res = simple_check(program, scope, param, ns, standins, policy)?;
                        if res.any() {
                            instance.set_parametrized(true);
                            outcome.descends_from_standin = true;
                        }
                    }
                    instance.set_resolved_type(type_id);
                    trace!(name = instance.name.lexeme(), ns, "resolved to concrete type");
                }
                Err(_) => {
                    if !instance.params.is_empty() {
                        return Err(unbuilt_type_error(instance.name.clone()));
                    }
                    if standins.iter().any(|s| *s == instance.name) {
                        instance.set_standin();
                        outcome.is_standin = true;
                        trace!(name = instance.name.lexeme(), "resolved to a formal parameter");
                    } else {
                        return Err(unbuilt_type_error(instance.name.clone()));
                    }
                }
            }
        }
        stela_ast::TypeInstanceCategory::Tuple
        | stela_ast::TypeInstanceCategory::List
        | stela_ast::TypeInstanceCategory::Map => {
            if !policy.allow_containers {
                return Err(CheckError::invalid_type(
                    instance.name.clone(),
                    "this checker variant does not resolve container type instances (tuple/list/map)",
                ));
            }
            for &param in &instance.params {
                let res = simple_check(program, scope, param, ns, standins, policy)?;
                if res.any() {
                    instance.set_parametrized(true);
                    outcome.descends_from_standin = true;
                }
            }
            instance.set_builtin_container();
        }
    }

    Ok(outcome)
}

fn unbuilt_type_error(token: Token) -> CheckError {
    CheckError::invalid_type(
        token,
        "this type instance has no type that builds it in the given scope and namespace",
    )
}

/// Dispatches on the instance's attached namespace.
pub fn complex_check(
    program: &Program,
    scope: &Scope,
    instance_id: TypeInstanceId,
    holder_ns: &str,
    standins: &[Token],
    policy: &CheckerPolicy,
) -> CheckResult<ResolutionOutcome> {
    let attached_ns = program.type_instances[instance_id].namespace.clone();

    if attached_ns == WILDCARD_NAMESPACE {
        match simple_check(program, scope, instance_id, holder_ns, standins, policy) {
            Ok(res) => Ok(res),
            Err(_) => {
                debug!(holder_ns, "retrying type instance resolution in the global namespace");
                simple_check(program, scope, instance_id, WILDCARD_NAMESPACE, standins, policy)
            }
        }
    } else {
        let res = simple_check(program, scope, instance_id, &attached_ns, standins, policy)?;
        if res.is_standin {
            return Err(CheckError::invalid_type(
                program.type_instances[instance_id].name.clone(),
                "an abstract type instance cannot be constrained to an explicit namespace",
            ));
        }
        Ok(res)
    }
}
