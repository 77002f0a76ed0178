//! Content nodes for literals, calls and switch expressions.
//!
//! These are the sub-roles that only ever appear inside a parent construct:
//! string interpolation segments, map literal elements, named call
//! arguments and switch cases.

use std::fmt;

use crate::{Location, Node, Pattern, Stmt};

use super::Expr;

/// One segment of an interpolated string literal.
#[derive(Clone, PartialEq, Debug)]
pub enum StringPart {
    /// Literal text between interpolations.
    Text(Box<str>),
    /// A `${...}` escape.
    Interpolation(Box<Expr>),
}

impl StringPart {
    pub fn text(text: impl Into<Box<str>>) -> Self {
        StringPart::Text(text.into())
    }

    pub fn interpolation(expr: Expr) -> Self {
        StringPart::Interpolation(Box::new(expr))
    }
}

/// One element of a map literal.
#[derive(Clone, PartialEq, Debug)]
pub enum MapElement {
    /// `key => value` with an arbitrary key expression.
    KeyValue { key: Expr, value: Expr },
    /// `key: value` shorthand for symbol keys.
    SymbolKeyValue { key: Box<str>, value: Expr },
    /// `{ foo }` — symbol key `foo` paired with the variable `foo`.
    Shorthand(Box<str>),
}

impl MapElement {
    pub(crate) fn is_static(&self) -> bool {
        match self {
            MapElement::KeyValue { key, value } => key.is_static() && value.is_static(),
            MapElement::SymbolKeyValue { value, .. } => value.is_static(),
            MapElement::Shorthand(_) => false,
        }
    }
}

/// A named argument in a call: `name: value`.
#[derive(Clone, Debug)]
pub struct NamedArg {
    pub name: Box<str>,
    pub value: Expr,
    location: Location,
}

impl NamedArg {
    pub fn new(location: Location, name: impl Into<Box<str>>, value: Expr) -> Self {
        NamedArg {
            name: name.into(),
            value,
            location,
        }
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl PartialEq for NamedArg {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl fmt::Display for NamedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// One `case pattern then body` arm of a switch expression.
#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub pattern: Pattern,
    pub body: Vec<Stmt>,
    location: Location,
}

impl SwitchCase {
    pub fn new(location: Location, pattern: Pattern, body: Vec<Stmt>) -> Self {
        SwitchCase {
            pattern,
            body,
            location,
        }
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

impl PartialEq for SwitchCase {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.body == other.body
    }
}
