//! The termination checker.
//!
//! Walks a function body statement-by-statement, computing `reachable`,
//! `terminates`, and `passes` per declaration, and certifies that a
//! non-void function terminates on every path.

use stela_ast::{Block, Declaration, DeclKind, Function, Program, Stmt};
use stela_common::{sentinels, CheckError, CheckResult};
use tracing::{debug, trace};

/// Analyzes one declaration in source order, given the previously-analyzed
/// sibling (`None` for the first declaration in the block). Sets
/// `reachable`, `terminates`, and `passes` on `decl`, recursing into any
/// nested blocks the declaration's statement carries.
fn analyze_declaration(
    program: &Program,
    decl: &Declaration,
    prev: Option<&Declaration>,
) -> CheckResult<()> {
    let reachable = match prev {
        None => true,
        Some(p) => p.reachable() && p.passes() && !p.terminates(),
    };
    decl.set_reachable(reachable);

    match &decl.kind {
        DeclKind::Variable(_) => {
            decl.set_terminates(false);
            decl.set_passes(true);
        }
        DeclKind::Statement(stmt_id) => {
            let stmt = &program.statements[*stmt_id];
            analyze_statement(program, decl, stmt)?;
        }
    }
    Ok(())
}

fn analyze_statement(program: &Program, decl: &Declaration, stmt: &Stmt) -> CheckResult<()> {
    match stmt {
        Stmt::Pass => {
            decl.set_terminates(false);
            decl.set_passes(true);
        }
        Stmt::Expression(_) => {
            decl.set_terminates(false);
            decl.set_passes(true);
        }
        Stmt::Break | Stmt::Continue => {
            // §4.4.3 edge case: break/continue never terminate the *function*;
            // they only stop passing control to the next sibling.
            decl.set_terminates(false);
            decl.set_passes(false);
        }
        Stmt::Return(_) => {
            decl.set_terminates(decl.reachable());
            decl.set_passes(false);
        }
        Stmt::Block(block) => {
            decl.set_terminates(analyze_block(program, block)?);
            decl.set_passes(true);
        }
        Stmt::While(w) => {
            decl.set_terminates(analyze_block(program, &w.body)?);
            decl.set_passes(true);
        }
        Stmt::For(f) => {
            let body_terminates = analyze_block(program, &f.body)?;
            let empty_terminates = match &f.empty_branch {
                Some(empty) => analyze_block(program, &empty.block)?,
                None => true,
            };
            decl.set_terminates(body_terminates && empty_terminates);
            decl.set_passes(true);
        }
        Stmt::If(if_stmt) => {
            let then_terminates = analyze_block(program, &if_stmt.then_block)?;
            let mut elif_terminates = Vec::with_capacity(if_stmt.elifs.len());
            for elif in &if_stmt.elifs {
                elif_terminates.push(analyze_block(program, &elif.block)?);
            }
            let terminates = match &if_stmt.else_branch {
                Some(else_branch) => {
                    let else_terminates = analyze_block(program, &else_branch.block)?;
                    then_terminates && elif_terminates.iter().all(|&t| t) && else_terminates
                }
                // No else: a path falls through the whole if unconditionally.
                None => false,
            };
            decl.set_terminates(terminates);
            decl.set_passes(true);
        }
        Stmt::Switch(switch_stmt) => {
            if switch_stmt.cases.is_empty() && switch_stmt.default.is_none() {
                return Err(CheckError::case_error(
                    "a switch with no cases and no default case has no body to analyze",
                ));
            }
            // Empty case bodies are explicit fall-through (§4.4.3 edge case,
            // §9 Open Question 3): they're skipped when folding termination.
            let mut case_terminates = Vec::new();
            for case in &switch_stmt.cases {
                if case.block.is_empty() {
                    trace!("skipping empty (fall-through) switch case");
                    continue;
                }
                case_terminates.push(analyze_block(program, &case.block)?);
            }
            let terminates = match &switch_stmt.default {
                Some(default) => {
                    let default_terminates = analyze_block(program, &default.block)?;
                    case_terminates.iter().all(|&t| t) && default_terminates
                }
                None => false,
            };
            decl.set_terminates(terminates);
            decl.set_passes(true);
        }
    }
    Ok(())
}

/// Walks a block's declarations in source order and returns whether the
/// block as a whole terminates (logical OR across its declarations).
pub fn analyze_block(program: &Program, block: &Block) -> CheckResult<bool> {
    let mut prev: Option<&Declaration> = None;
    let mut block_terminates = false;
    for &decl_id in &block.declarations {
        let decl = &program.declarations[decl_id];
        analyze_declaration(program, decl, prev)?;
        block_terminates |= decl.terminates();
        prev = Some(decl);
    }
    Ok(block_terminates)
}

/// Walks `function`'s body and fails with `InvalidFunction` if it doesn't
/// return void and doesn't terminate on every path.
pub fn check_function(program: &Program, function: &Function) -> CheckResult<()> {
    let _span = tracing::debug_span!("check_function", name = function.name.lexeme()).entered();
    let terminates = analyze_block(program, &function.body)?;

    let return_type = &program.type_instances[function.return_type];
    let is_void = return_type.name == sentinels::void_type_tok();

    if !terminates && !is_void {
        debug!(name = function.name.lexeme(), "function body does not terminate on all paths");
        return Err(CheckError::invalid_function(
            function.name.clone(),
            format!(
                "function '{}' has a non-void return type but its body does not terminate on every path",
                function.name.lexeme()
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stela_ast::{
        DeclId, ElseBranch, ExprRef, IfStmt, Program, ScopeRef, StmtId, TypeInstance,
        TypeInstanceCategory, VariableDecl, WhileStmt,
    };
    use stela_common::{Token, TokenKind};

    fn tok(s: &str) -> Token {
        Token::new(s, TokenKind::Identifier, 1, 1, "t.st")
    }

    fn void_return(program: &mut Program) -> stela_ast::TypeInstanceId {
        program.type_instances.alloc(TypeInstance::new(
            sentinels::void_type_tok(),
            TypeInstanceCategory::User,
            "*",
            vec![],
        ))
    }

    fn int_return(program: &mut Program) -> stela_ast::TypeInstanceId {
        program
            .type_instances
            .alloc(TypeInstance::new(tok("Int"), TypeInstanceCategory::User, "*", vec![]))
    }

    fn push_decl(program: &mut Program, kind: DeclKind) -> DeclId {
        program.declarations.alloc(Declaration::new(kind))
    }

    fn stmt_decl(program: &mut Program, stmt: Stmt) -> DeclId {
        let stmt_id: StmtId = program.statements.alloc(stmt);
        push_decl(program, DeclKind::Statement(stmt_id))
    }

    #[test]
    fn empty_body_void_function_is_accepted() {
        let mut program = Program::new();
        let return_type = void_return(&mut program);
        let function = Function {
            name: tok("main"),
            params: vec![],
            return_type,
            body: Block::new(ScopeRef(0), vec![]),
            namespace: "*".to_string(),
        };
        check_function(&program, &function).unwrap();
    }

    #[test]
    fn non_void_function_without_return_is_rejected() {
        let mut program = Program::new();
        let return_type = int_return(&mut program);
        let var_decl = push_decl(
            &mut program,
            DeclKind::Variable(VariableDecl { name: tok("x"), type_instance: None }),
        );
        let function = Function {
            name: tok("f"),
            params: vec![],
            return_type,
            body: Block::new(ScopeRef(0), vec![var_decl]),
            namespace: "*".to_string(),
        };
        let err = check_function(&program, &function).unwrap_err();
        assert!(matches!(err, CheckError::InvalidFunction { .. }));
    }

    #[test]
    fn if_else_that_both_return_terminates() {
        let mut program = Program::new();
        let return_type = int_return(&mut program);

        let then_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let else_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let if_stmt = Stmt::If(IfStmt {
            condition: ExprRef,
            then_block: Block::new(ScopeRef(1), vec![then_return]),
            elifs: vec![],
            else_branch: Some(ElseBranch { block: Block::new(ScopeRef(2), vec![else_return]) }),
        });
        let if_decl = stmt_decl(&mut program, if_stmt);

        let function = Function {
            name: tok("g"),
            params: vec![],
            return_type,
            body: Block::new(ScopeRef(0), vec![if_decl]),
            namespace: "*".to_string(),
        };
        check_function(&program, &function).unwrap();
        assert!(program.declarations[if_decl].terminates());
    }

    #[test]
    fn if_without_else_does_not_terminate() {
        let mut program = Program::new();
        let return_type = int_return(&mut program);

        let then_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let if_stmt = Stmt::If(IfStmt {
            condition: ExprRef,
            then_block: Block::new(ScopeRef(1), vec![then_return]),
            elifs: vec![],
            else_branch: None,
        });
        let if_decl = stmt_decl(&mut program, if_stmt);

        let function = Function {
            name: tok("h"),
            params: vec![],
            return_type,
            body: Block::new(ScopeRef(0), vec![if_decl]),
            namespace: "*".to_string(),
        };
        let err = check_function(&program, &function).unwrap_err();
        assert!(matches!(err, CheckError::InvalidFunction { .. }));
    }

    #[test]
    fn unreachable_declaration_after_return_propagates() {
        let mut program = Program::new();
        let return_decl = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let after = push_decl(
            &mut program,
            DeclKind::Variable(VariableDecl { name: tok("y"), type_instance: None }),
        );
        let block = Block::new(ScopeRef(0), vec![return_decl, after]);
        analyze_block(&program, &block).unwrap();
        assert!(!program.declarations[after].reachable());
    }

    #[test]
    fn break_does_not_terminate_the_enclosing_while() {
        let mut program = Program::new();
        let return_type = void_return(&mut program);
        let break_decl = stmt_decl(&mut program, Stmt::Break);
        let while_stmt = Stmt::While(WhileStmt {
            condition: ExprRef,
            body: Block::new(ScopeRef(1), vec![break_decl]),
        });
        let while_decl = stmt_decl(&mut program, while_stmt);
        let function = Function {
            name: tok("loop_fn"),
            params: vec![],
            return_type,
            body: Block::new(ScopeRef(0), vec![while_decl]),
            namespace: "*".to_string(),
        };
        check_function(&program, &function).unwrap();
        assert!(!program.declarations[while_decl].terminates());
    }

    #[test]
    fn switch_with_only_default_is_accepted_as_a_shape() {
        let mut program = Program::new();
        let default_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let switch_stmt = Stmt::Switch(stela_ast::SwitchStmt {
            subject: ExprRef,
            cases: vec![],
            default: Some(stela_ast::SwitchDefault {
                block: Block::new(ScopeRef(1), vec![default_return]),
            }),
        });
        let switch_decl = stmt_decl(&mut program, switch_stmt);
        let block = Block::new(ScopeRef(0), vec![switch_decl]);
        let terminates = analyze_block(&program, &block).unwrap();
        assert!(terminates);
    }

    #[test]
    fn switch_with_no_cases_and_no_default_is_rejected() {
        let mut program = Program::new();
        let switch_stmt = Stmt::Switch(stela_ast::SwitchStmt {
            subject: ExprRef,
            cases: vec![],
            default: None,
        });
        let switch_decl = stmt_decl(&mut program, switch_stmt);
        let block = Block::new(ScopeRef(0), vec![switch_decl]);
        let err = analyze_block(&program, &block).unwrap_err();
        assert!(matches!(err, CheckError::CaseError { .. }));
    }

    #[test]
    fn fallthrough_case_is_skipped_when_folding_termination() {
        let mut program = Program::new();
        // First case is empty (fall-through), second returns, default returns.
        let second_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let default_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let switch_stmt = Stmt::Switch(stela_ast::SwitchStmt {
            subject: ExprRef,
            cases: vec![
                stela_ast::SwitchCase { pattern: ExprRef, block: Block::new(ScopeRef(1), vec![]) },
                stela_ast::SwitchCase {
                    pattern: ExprRef,
                    block: Block::new(ScopeRef(2), vec![second_return]),
                },
            ],
            default: Some(stela_ast::SwitchDefault {
                block: Block::new(ScopeRef(3), vec![default_return]),
            }),
        });
        let switch_decl = stmt_decl(&mut program, switch_stmt);
        let block = Block::new(ScopeRef(0), vec![switch_decl]);
        let terminates = analyze_block(&program, &block).unwrap();
        assert!(terminates);
    }

    #[test]
    fn for_loop_requires_empty_branch_to_terminate_when_present() {
        let mut program = Program::new();
        let return_type = void_return(&mut program);
        let body_return = stmt_decl(&mut program, Stmt::Return(Some(ExprRef)));
        let empty_pass = stmt_decl(&mut program, Stmt::Pass);
        let for_stmt = Stmt::For(stela_ast::ForStmt {
            iterator: ExprRef,
            body: Block::new(ScopeRef(1), vec![body_return]),
            empty_branch: Some(stela_ast::EmptyBranch {
                block: Block::new(ScopeRef(2), vec![empty_pass]),
            }),
        });
        let for_decl = stmt_decl(&mut program, for_stmt);
        let function = Function {
            name: tok("iter_fn"),
            params: vec![],
            return_type,
            body: Block::new(ScopeRef(0), vec![for_decl]),
            namespace: "*".to_string(),
        };
        check_function(&program, &function).unwrap();
        assert!(!program.declarations[for_decl].terminates());
    }
}
