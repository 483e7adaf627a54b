//! The AST vocabulary: type declarations, constructors, type instances, and
//! statements, addressed through a program-scoped arena of typed indices.

pub mod arena;
pub mod program;
pub mod scope_ref;
pub mod stmt;
pub mod type_decl;
pub mod type_instance;

pub use arena::{Arena, Idx};
pub use program::{Import, Namespace, Program};
pub use scope_ref::ScopeRef;
pub use stmt::{
    Block, DeclId, DeclKind, Declaration, ElifBranch, ElseBranch, EmptyBranch, ExprRef, ForStmt,
    Function, FunctionId, IfStmt, Stmt, StmtId, SwitchCase, SwitchDefault, SwitchStmt,
    VariableDecl, WhileStmt,
};
pub use type_decl::{
    ConstructorRef, DefaultConstructor, DefaultConstructorId, ListConstructor, ListConstructorId,
    MapConstructor, MapConstructorId, RecordConstructor, RecordConstructorId, TypeDecl, Validity,
    Visibility,
};
pub use type_instance::{Resolution, TypeId, TypeInstance, TypeInstanceCategory, TypeInstanceId};
