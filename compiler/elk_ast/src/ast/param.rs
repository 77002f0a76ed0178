//! Parameter nodes.
//!
//! Two concrete parameter shapes exist: [`Param`] for method and closure
//! definitions (may carry a default value) and [`SignatureParam`] for
//! method signatures (optionality is a flag, there is no default to
//! evaluate). Both satisfy the [`Parameter`] role.

use std::fmt;

use crate::{Located, Location};

use super::expr::Expr;
use super::types::TypeExpr;

/// Role shared by every parameter shape.
pub trait Parameter: Located {
    fn name(&self) -> &str;
    /// True if a call may omit this parameter.
    fn is_optional(&self) -> bool;
}

/// How a parameter collects its arguments.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ParamKind {
    /// Plain positional-or-named parameter.
    #[default]
    Normal,
    /// `*rest` — collects surplus positional arguments.
    PositionalRest,
    /// `**rest` — collects surplus named arguments.
    NamedRest,
}

/// A parameter of a method or closure definition.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: Box<str>,
    pub kind: ParamKind,
    pub type_annotation: Option<TypeExpr>,
    pub default: Option<Expr>,
    location: Location,
}

impl Param {
    pub fn new(
        location: Location,
        name: impl Into<Box<str>>,
        kind: ParamKind,
        type_annotation: Option<TypeExpr>,
        default: Option<Expr>,
    ) -> Self {
        Param {
            name: name.into(),
            kind,
            type_annotation,
            default,
            location,
        }
    }

    /// True for `*rest`.
    #[inline]
    pub fn is_positional_rest(&self) -> bool {
        self.kind == ParamKind::PositionalRest
    }

    /// True for `**rest`.
    #[inline]
    pub fn is_named_rest(&self) -> bool {
        self.kind == ParamKind::NamedRest
    }
}

impl Located for Param {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Parameter for Param {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.type_annotation == other.type_annotation
            && self.default == other.default
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParamKind::Normal => {}
            ParamKind::PositionalRest => f.write_str("*")?,
            ParamKind::NamedRest => f.write_str("**")?,
        }
        f.write_str(&self.name)?;
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {ty}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// A parameter of a method signature declaration.
#[derive(Clone, Debug)]
pub struct SignatureParam {
    pub name: Box<str>,
    pub type_annotation: Option<TypeExpr>,
    pub optional: bool,
    location: Location,
}

impl SignatureParam {
    pub fn new(
        location: Location,
        name: impl Into<Box<str>>,
        type_annotation: Option<TypeExpr>,
        optional: bool,
    ) -> Self {
        SignatureParam {
            name: name.into(),
            type_annotation,
            optional,
            location,
        }
    }
}

impl Located for SignatureParam {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl Parameter for SignatureParam {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_optional(&self) -> bool {
        self.optional
    }
}

impl PartialEq for SignatureParam {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_annotation == other.type_annotation
            && self.optional == other.optional
    }
}

impl fmt::Display for SignatureParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.optional {
            f.write_str("?")?;
        }
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {ty}")?;
        }
        Ok(())
    }
}
