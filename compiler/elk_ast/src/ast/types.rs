//! Type annotation nodes.
//!
//! Types reuse expression nodes for their leaves: a constant type holds a
//! complex-constant expression, a literal type holds a static literal.
//! Composite forms are binary (`A | B`, `A & B`) and postfix (`T?`).

use std::fmt;

use crate::{Located, Location, Node, TypeId, TypeSlot, Typed};

use super::expr::{Expr, ExprKind};

/// Type annotation node.
#[derive(Clone)]
pub struct TypeExpr {
    pub kind: TypeKind,
    location: Location,
    is_static: bool,
    ty: TypeSlot,
}

impl TypeExpr {
    pub fn new(location: Location, kind: TypeKind) -> Self {
        debug_assert!(
            match &kind {
                TypeKind::Constant(expr) => expr.kind.is_complex_constant(),
                _ => true,
            },
            "expression kind not registered as a complex constant"
        );
        let is_static = compute_static(&kind);
        TypeExpr {
            kind,
            location,
            is_static,
            ty: TypeSlot::empty(),
        }
    }

    /// Wrap a complex-constant expression, reusing its location.
    pub fn constant(expr: Expr) -> Self {
        let location = expr.location().clone();
        TypeExpr::new(location, TypeKind::Constant(Box::new(expr)))
    }
}

fn compute_static(kind: &TypeKind) -> bool {
    match kind {
        // A constant in type position denotes a compile-time type, unless
        // it is an error placeholder.
        TypeKind::Constant(expr) => !matches!(expr.kind, ExprKind::Invalid(_)),
        TypeKind::Literal(expr) => expr.is_static(),
        TypeKind::Union { left, right } | TypeKind::Intersection { left, right } => {
            left.is_static() && right.is_static()
        }
        TypeKind::Nilable(inner) => inner.is_static(),
    }
}

impl Located for TypeExpr {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Typed for TypeExpr {
    fn ty(&self) -> Option<TypeId> {
        self.ty.get()
    }

    fn set_ty(&self, ty: TypeId) {
        self.ty.set(ty);
    }
}

impl Node for TypeExpr {
    fn is_static(&self) -> bool {
        self.is_static
    }
}

impl PartialEq for TypeExpr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Debug for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.location.span())
    }
}

/// Type annotation variants.
#[derive(Clone, PartialEq, Debug)]
pub enum TypeKind {
    /// `Foo`, `Foo::Bar` — a complex-constant expression naming a type.
    Constant(Box<Expr>),
    /// `1`, `"a"`, `:sym` — a singleton literal type.
    Literal(Box<Expr>),
    /// `A | B`
    Union {
        left: Box<TypeExpr>,
        right: Box<TypeExpr>,
    },
    /// `A & B`
    Intersection {
        left: Box<TypeExpr>,
        right: Box<TypeExpr>,
    },
    /// `T?`
    Nilable(Box<TypeExpr>),
}
