//! Source locations with macro-expansion provenance.
//!
//! A [`Location`] names a range in a named source file, as both byte offsets
//! and 1-based line/column positions. Locations form a chain through the
//! optional `parent` pointer: code produced by splicing a quoted template
//! carries the location it was written at, re-rooted under the location it
//! was expanded at, so diagnostics can report "expanded from" trails.

use std::fmt;
use std::sync::Arc;

use crate::Span;

/// A point in a source file.
///
/// `offset` is a 0-based byte offset; `line` and `column` are 1-based and
/// count characters, the way editors display them.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Start-of-file position.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Immutable source range owned by every AST node.
///
/// The file name is reference-counted so cloning a location (which splicing
/// does for entire trees) does not copy path strings. The `parent` chain is
/// only ever grown by [`Location::spliced`]; hand-built locations have no
/// parent.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Location {
    file: Arc<str>,
    start: Position,
    end: Position,
    parent: Option<Box<Location>>,
}

impl Location {
    pub fn new(file: impl Into<Arc<str>>, start: Position, end: Position) -> Self {
        Location {
            file: file.into(),
            start,
            end,
            parent: None,
        }
    }

    /// Zero-width location for generated code that has no source text.
    pub fn synthetic() -> Self {
        Location::new("<generated>", Position::START, Position::START)
    }

    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// The expansion site this location was re-rooted under, if any.
    #[inline]
    pub fn parent(&self) -> Option<&Location> {
        self.parent.as_deref()
    }

    /// Byte-range form of this location.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start.offset, self.end.offset)
    }

    /// Compute the location for a node copied by the splice engine.
    ///
    /// - `target` of `None` means "no relocation": the original location is
    ///   kept verbatim.
    /// - With `unquote` set, the node keeps its own range but is re-rooted:
    ///   its parent becomes `target`, recording where the substitution
    ///   happened. An existing parent chain on the original is replaced, so
    ///   repeated instantiation of the same template does not accumulate
    ///   stale provenance.
    /// - Otherwise the target location is passed through unchanged.
    pub fn spliced(target: Option<&Location>, original: &Location, unquote: bool) -> Location {
        match target {
            None => original.clone(),
            Some(loc) if unquote => Location {
                file: Arc::clone(&original.file),
                start: original.start,
                end: original.end,
                parent: Some(Box::new(loc.clone())),
            },
            Some(loc) => loc.clone(),
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.file, self.start, self.end)?;
        if self.parent.is_some() {
            write!(f, " (expanded)")?;
        }
        Ok(())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.start)
    }
}
