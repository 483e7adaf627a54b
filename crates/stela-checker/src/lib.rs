//! The semantic checkers: the type instance resolver and the two
//! declaration checkers that together validate a stela program's type
//! declarations and prove every non-void function terminates.
//!
//! - `policy` — the single `CheckerPolicy` record replacing three parallel
//!   `stage_one`/`lax`/`weak` checker variants.
//! - `resolver` — `simple_check`/`complex_check`, resolving a type instance
//!   against a scope, holder namespace, and standin list.
//! - `constructor_checker` — per-constructor uniqueness, parameter
//!   resolution, and classification.
//! - `type_checker` — end-to-end validation of one type declaration,
//!   driving the constructor checker over every constructor kind in
//!   declaration order.
//! - `termination_checker` — the reachability/termination walk over one
//!   function body.

pub mod constructor_checker;
pub mod policy;
pub mod resolver;
pub mod termination_checker;
pub mod type_checker;

pub use policy::{CheckerPolicy, ParametricResultShape};
pub use resolver::{complex_check, simple_check, ResolutionOutcome};
pub use termination_checker::check_function;
pub use type_checker::check_type;

use stela_ast::Program;
use stela_common::CheckError;
use stela_symtab::Scope;

/// Checks every type declaration in `namespace`'s scope, then every
/// function: within a namespace, all type declarations must be checked
/// before any function or variable declaration that references them.
/// Collects every failure rather than stopping at the first — an error is
/// fatal to its own declaration but not to the program, so the driver keeps
/// checking sibling declarations.
pub fn check_namespace(
    program: &Program,
    scope: &Scope,
    namespace: &stela_ast::Namespace,
    policy: &CheckerPolicy,
) -> Vec<CheckError> {
    let mut errors = Vec::new();

    for &type_id in &namespace.types {
        if let Err(err) = type_checker::check_type(program, scope, type_id, policy) {
            errors.push(err);
        }
    }

    for &function_id in &namespace.functions {
        let function = &program.functions[function_id];
        if let Err(err) = termination_checker::check_function(program, function) {
            errors.push(err);
        }
    }

    errors
}
