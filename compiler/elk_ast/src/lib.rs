//! Elk AST — syntax tree core for the Elk compiler front end.
//!
//! This crate contains the data structures the parser produces and every
//! later phase consumes:
//! - Spans and locations (with macro-expansion provenance chains)
//! - The node catalogue (expressions, statements, patterns, types,
//!   parameters, `using` entries)
//! - Capability classification tables over the catalogue
//! - Generic enter/leave traversal with break/skip early exit
//! - The quasi-quotation splice engine for macro templates
//!
//! # Design Philosophy
//!
//! - **Own everything**: nodes exclusively own their children as boxed
//!   trees. Splicing a template never shares structure with the original,
//!   which is what makes templates reusable.
//! - **Construct, don't mutate**: staticness is computed once in the
//!   constructor; the checker's annotations are write-once slots. The only
//!   way to "change" a tree is to build a new one.
//! - **Central registration**: each grammar role is a single exhaustive
//!   match in `ast::classify`, so extending the catalogue forces every
//!   table to be revisited at compile time.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated
/// types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod location;
mod program;
mod span;
mod splice;
mod stack;
mod token;
mod traits;
mod ty;
pub mod visitor;

pub use ast::{
    AccessOp, AssignmentOp, BinaryOp, Expr, ExprKind, LogicalOp, MapElement, MapPatternEntry,
    ModifierKind, NamedArg, ObjectPatternField, Param, ParamKind, Parameter, Pattern, PatternKind,
    RangeOp, RegexFlags, SignatureParam, StringPart, Stmt, StmtKind, SwitchCase, TypeExpr,
    TypeKind, UnaryOp, UsingEntry, UsingEntryKind, UsingSubentry, UsingSubentryKind,
};
pub use location::{Location, Position};
pub use program::{Program, ProgramState};
pub use span::{Span, SpanError};
pub use splice::{Splice, SpliceArgs};
pub use token::Token;
pub use traits::{Located, Node, Typed};
pub use ty::{DocSlot, TypeId, TypeSlot};
pub use visitor::{
    traverse_expr, traverse_pattern, traverse_program, traverse_stmt, traverse_type, Flow,
    NodeRef, Visitor,
};
