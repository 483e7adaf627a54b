//! Statements, blocks, and declarations.
//!
//! Expressions themselves are out of scope (produced and typed by later
//! stages); every place a statement would hold an expression, we only need
//! to know whether one is present, since reachability/termination never
//! inspects conditions: the checker treats all branches as independently
//! reachable regardless of what a condition evaluates to.

use std::cell::Cell;

use stela_common::Token;

use crate::arena::Idx;
use crate::scope_ref::ScopeRef;
use crate::type_instance::TypeInstanceId;

/// Placeholder for an expression node. The parser/expression-checker owns the
/// real representation; we only ever ask "is one present".
#[derive(Debug, Clone, Copy)]
pub struct ExprRef;

pub type StmtId = Idx<Stmt>;
pub type DeclId = Idx<Declaration>;
pub type FunctionId = Idx<Function>;

/// An ordered sequence of declarations introducing a nested scope.
#[derive(Debug, Clone)]
pub struct Block {
    pub declarations: Vec<DeclId>,
    pub scope: ScopeRef,
}

impl Block {
    pub fn new(scope: ScopeRef, declarations: Vec<DeclId>) -> Self {
        Block { declarations, scope }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ElifBranch {
    pub condition: ExprRef,
    pub block: Block,
}

#[derive(Debug, Clone)]
pub struct ElseBranch {
    pub block: Block,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: ExprRef,
    pub then_block: Block,
    pub elifs: Vec<ElifBranch>,
    pub else_branch: Option<ElseBranch>,
}

impl IfStmt {
    /// Fails with a shape error if queried for an else branch that doesn't
    /// exist; callers that already checked `else_branch.is_some()` should
    /// prefer the `Option` directly. `BranchError` is meant for misuse by
    /// downstream consumers, not for the checkers in this crate.
    pub fn else_block(&self) -> Option<&Block> {
        self.else_branch.as_ref().map(|e| &e.block)
    }
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: ExprRef,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct EmptyBranch {
    pub block: Block,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub iterator: ExprRef,
    pub body: Block,
    pub empty_branch: Option<EmptyBranch>,
}

#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub pattern: ExprRef,
    pub block: Block,
}

#[derive(Debug, Clone)]
pub struct SwitchDefault {
    pub block: Block,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub subject: ExprRef,
    pub cases: Vec<SwitchCase>,
    pub default: Option<SwitchDefault>,
}

impl SwitchStmt {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// The statement sum type.
#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Break,
    Continue,
    Pass,
    Return(Option<ExprRef>),
    Expression(ExprRef),
}

/// A single variable declaration (`let`-equivalent), outside of function
/// parameters.
#[derive(Debug, Clone)]
pub struct VariableDecl {
    pub name: Token,
    pub type_instance: Option<TypeInstanceId>,
}

#[derive(Debug, Clone)]
pub enum DeclKind {
    Variable(VariableDecl),
    Statement(StmtId),
}

/// A block entry: either a variable declaration or a wrapped statement,
/// carrying the three Booleans the termination checker computes.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclKind,
    reachable: Cell<bool>,
    terminates: Cell<bool>,
    passes: Cell<bool>,
}

impl Declaration {
    pub fn new(kind: DeclKind) -> Self {
        Declaration {
            kind,
            reachable: Cell::new(false),
            terminates: Cell::new(false),
            passes: Cell::new(true),
        }
    }

    pub fn reachable(&self) -> bool {
        self.reachable.get()
    }
    pub fn set_reachable(&self, value: bool) {
        self.reachable.set(value);
    }

    pub fn terminates(&self) -> bool {
        self.terminates.get()
    }
    pub fn set_terminates(&self, value: bool) {
        self.terminates.set(value);
    }

    pub fn passes(&self) -> bool {
        self.passes.get()
    }
    pub fn set_passes(&self, value: bool) {
        self.passes.set(value);
    }
}

/// A function declaration.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<(Token, TypeInstanceId)>,
    pub return_type: TypeInstanceId,
    pub body: Block,
    pub namespace: String,
}
