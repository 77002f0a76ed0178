//! Statement nodes.

use std::fmt;

use crate::{Located, Location, Node, TypeId, TypeSlot, Typed};

use super::expr::Expr;
use super::using::UsingEntry;

/// Statement node.
#[derive(Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    location: Location,
    is_static: bool,
    ty: TypeSlot,
}

impl Stmt {
    pub fn new(location: Location, kind: StmtKind) -> Self {
        let is_static = match &kind {
            StmtKind::Expression(expr) => expr.is_static(),
            StmtKind::Empty | StmtKind::Import { .. } | StmtKind::Using(_) => false,
        };
        Stmt {
            kind,
            location,
            is_static,
            ty: TypeSlot::empty(),
        }
    }

    /// Wrap an expression as a statement, reusing its location.
    pub fn expression(expr: Expr) -> Self {
        let location = expr.location().clone();
        Stmt::new(location, StmtKind::Expression(Box::new(expr)))
    }
}

impl Located for Stmt {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Typed for Stmt {
    fn ty(&self) -> Option<TypeId> {
        self.ty.get()
    }

    fn set_ty(&self, ty: TypeId) {
        self.ty.set(ty);
    }
}

impl Node for Stmt {
    fn is_static(&self) -> bool {
        self.is_static
    }
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.location.span())
    }
}

/// Statement variants.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// An expression in statement position.
    Expression(Box<Expr>),
    /// A bare separator; keeps source positions stable across blank lines.
    Empty,
    /// `import "./foo.elk"` — the path is a string-literal expression.
    Import { path: Box<Expr> },
    /// `using Foo::Bar, Std::*`
    Using(Vec<UsingEntry>),
}
