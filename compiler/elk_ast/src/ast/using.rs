//! `using` declaration entries.
//!
//! A `using` statement brings constants and methods from another namespace
//! into scope. Each entry names a constant path with an optional alias, a
//! whole namespace (`Foo::*`), or a braced subentry list
//! (`Foo::{Bar, baz as qux}`).

use std::fmt;

use crate::{Located, Location};

use super::expr::Expr;

/// One entry of a `using` statement.
#[derive(Clone, Debug)]
pub struct UsingEntry {
    pub kind: UsingEntryKind,
    location: Location,
}

impl UsingEntry {
    pub fn new(location: Location, kind: UsingEntryKind) -> Self {
        UsingEntry { kind, location }
    }
}

impl Located for UsingEntry {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl PartialEq for UsingEntry {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Entry variants. Paths and namespaces are complex-constant expressions.
#[derive(Clone, PartialEq, Debug)]
pub enum UsingEntryKind {
    /// `using Foo::Bar` / `using Foo::Bar as Baz`
    Constant {
        path: Box<Expr>,
        alias: Option<Box<str>>,
    },
    /// `using Foo::*`
    Star { namespace: Box<Expr> },
    /// `using Foo::{Bar, baz as qux}`
    Subentries {
        namespace: Box<Expr>,
        entries: Vec<UsingSubentry>,
    },
}

/// One item of a braced subentry list.
#[derive(Clone, Debug)]
pub struct UsingSubentry {
    pub kind: UsingSubentryKind,
    location: Location,
}

impl UsingSubentry {
    pub fn new(location: Location, kind: UsingSubentryKind) -> Self {
        UsingSubentry { kind, location }
    }
}

impl Located for UsingSubentry {
    fn location(&self) -> &Location {
        &self.location
    }
}

impl PartialEq for UsingSubentry {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Subentry variants: constants start with an uppercase letter, methods
/// with a lowercase one; the parser decides which was written.
#[derive(Clone, PartialEq, Debug)]
pub enum UsingSubentryKind {
    Constant {
        name: Box<str>,
        alias: Option<Box<str>>,
    },
    Method {
        name: Box<str>,
        alias: Option<Box<str>>,
    },
}

impl fmt::Display for UsingSubentry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            UsingSubentryKind::Constant { name, alias } | UsingSubentryKind::Method { name, alias } => {
                f.write_str(name)?;
                if let Some(alias) = alias {
                    write!(f, " as {alias}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for UsingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            UsingEntryKind::Constant { path, alias } => {
                write!(f, "{path}")?;
                if let Some(alias) = alias {
                    write!(f, " as {alias}")?;
                }
                Ok(())
            }
            UsingEntryKind::Star { namespace } => write!(f, "{namespace}::*"),
            UsingEntryKind::Subentries { namespace, entries } => {
                write!(f, "{namespace}::{{")?;
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{entry}")?;
                }
                f.write_str("}")
            }
        }
    }
}
