//! AST node catalogue.
//!
//! # Module structure
//!
//! - `expr`: expression nodes, the bulk of the catalogue
//! - `stmt`: statement nodes
//! - `pattern`: pattern nodes for `switch` matching
//! - `types`: type annotation nodes
//! - `param`: parameter shapes
//! - `using`: `using` declaration entries
//! - `operators`: operator kind enums
//! - `collections`: content nodes (interpolation segments, map elements,
//!   named arguments, switch cases)
//! - `classify`: the capability classification tables
//! - `display`: precedence-aware source re-serialization

mod classify;
mod collections;
mod display;
mod expr;
mod operators;
mod param;
mod pattern;
mod stmt;
mod types;
mod using;

pub use collections::{MapElement, NamedArg, StringPart, SwitchCase};
pub use expr::{Expr, ExprKind, RegexFlags};
pub use operators::{
    AccessOp, AssignmentOp, BinaryOp, LogicalOp, ModifierKind, RangeOp, UnaryOp,
};
pub use param::{Param, ParamKind, Parameter, SignatureParam};
pub use pattern::{MapPatternEntry, ObjectPatternField, Pattern, PatternKind};
pub use stmt::{Stmt, StmtKind};
pub use types::{TypeExpr, TypeKind};
pub use using::{UsingEntry, UsingEntryKind, UsingSubentry, UsingSubentryKind};
