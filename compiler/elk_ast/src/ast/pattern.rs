//! Pattern nodes for `switch` case matching.
//!
//! Patterns overlap heavily with expressions: literals, identifiers and
//! constants are valid in both positions. That overlap is represented by
//! [`PatternKind::Expression`], which embeds an expression node whose kind
//! must be registered as a pattern expression (see
//! [`crate::ast::ExprKind::is_pattern_expression`]).

use std::fmt;

use crate::{Located, Location, Node, TypeId, TypeSlot, Typed};

use super::expr::{Expr, ExprKind};
use super::operators::RangeOp;

/// Pattern node.
#[derive(Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    location: Location,
    is_static: bool,
    ty: TypeSlot,
}

impl Pattern {
    pub fn new(location: Location, kind: PatternKind) -> Self {
        debug_assert!(
            match &kind {
                PatternKind::Expression(expr) => expr.kind.is_pattern_expression(),
                _ => true,
            },
            "expression kind not registered as a pattern expression"
        );
        let is_static = match &kind {
            PatternKind::Expression(expr) => expr.is_static(),
            _ => false,
        };
        Pattern {
            kind,
            location,
            is_static,
            ty: TypeSlot::empty(),
        }
    }

    /// Wrap a pattern expression, reusing its location.
    pub fn expression(expr: Expr) -> Self {
        let location = expr.location().clone();
        Pattern::new(location, PatternKind::Expression(Box::new(expr)))
    }

    /// True if matching this pattern can bind at least one variable.
    ///
    /// Recursive over sub-patterns: an object pattern declares variables
    /// exactly when one of its field patterns does.
    pub fn declares_variables(&self) -> bool {
        match &self.kind {
            PatternKind::Expression(expr) => matches!(
                expr.kind,
                ExprKind::PublicIdent(_) | ExprKind::PrivateIdent(_)
            ),
            PatternKind::As { .. } => true,
            PatternKind::Or { left, right } | PatternKind::And { left, right } => {
                left.declares_variables() || right.declares_variables()
            }
            PatternKind::Range { .. } => false,
            PatternKind::List(elements) | PatternKind::Tuple(elements) => {
                elements.iter().any(Pattern::declares_variables)
            }
            PatternKind::Rest(name) => name.is_some(),
            PatternKind::Map(entries) => entries.iter().any(|entry| {
                entry
                    .value
                    .as_ref()
                    .map_or(true, Pattern::declares_variables)
            }),
            PatternKind::Object { fields, .. } => fields
                .iter()
                .any(|field| field.pattern.declares_variables()),
        }
    }
}

impl Located for Pattern {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Typed for Pattern {
    fn ty(&self) -> Option<TypeId> {
        self.ty.get()
    }

    fn set_ty(&self, ty: TypeId) {
        self.ty.set(ty);
    }
}

impl Node for Pattern {
    fn is_static(&self) -> bool {
        self.is_static
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.location.span())
    }
}

/// Pattern variants.
#[derive(Clone, PartialEq, Debug)]
pub enum PatternKind {
    /// A pattern expression: literal, identifier or constant. Identifiers
    /// bind the matched value.
    Expression(Box<Expr>),
    /// `pattern as name` — matches the pattern, binds the whole value.
    As {
        pattern: Box<Pattern>,
        name: Box<Expr>,
    },
    /// `left || right`
    Or {
        left: Box<Pattern>,
        right: Box<Pattern>,
    },
    /// `left && right`
    And {
        left: Box<Pattern>,
        right: Box<Pattern>,
    },
    /// `1..5` in pattern position; endpoints are restricted expressions
    /// (see `is_valid_range_pattern_element`).
    Range {
        op: RangeOp,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
    /// `[a, 2, *rest]`
    List(Vec<Pattern>),
    /// `%[a, b]`
    Tuple(Vec<Pattern>),
    /// `*rest` inside a list or tuple pattern; `*` discards the slice.
    Rest(Option<Box<str>>),
    /// `{ key: pattern, shorthand }`
    Map(Vec<MapPatternEntry>),
    /// `Foo(a: pattern, b: 5)`
    Object {
        class: Box<Expr>,
        fields: Vec<ObjectPatternField>,
    },
}

/// One `key: pattern` element of a map pattern. A missing value is the
/// shorthand form `{ key }`, which binds `key` as a variable.
#[derive(Clone, Debug)]
pub struct MapPatternEntry {
    pub key: Box<str>,
    pub value: Option<Pattern>,
    location: Location,
}

impl MapPatternEntry {
    pub fn new(location: Location, key: impl Into<Box<str>>, value: Option<Pattern>) -> Self {
        MapPatternEntry {
            key: key.into(),
            value,
            location,
        }
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl PartialEq for MapPatternEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

/// One `name: pattern` field of an object pattern.
#[derive(Clone, Debug)]
pub struct ObjectPatternField {
    pub name: Box<str>,
    pub pattern: Pattern,
    location: Location,
}

impl ObjectPatternField {
    pub fn new(location: Location, name: impl Into<Box<str>>, pattern: Pattern) -> Self {
        ObjectPatternField {
            name: name.into(),
            pattern,
            location,
        }
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl PartialEq for ObjectPatternField {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern == other.pattern
    }
}
