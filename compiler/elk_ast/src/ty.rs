//! Checker annotation slots.
//!
//! The AST is immutable after construction except for the annotations the
//! single-threaded type-checking pass writes exactly once per node: the
//! inferred type and, on declaration nodes, the attached doc comment. Both
//! are modeled as write-once cells whose setters panic on a second write,
//! so a phase-ordering bug surfaces immediately instead of silently
//! overwriting an earlier analysis.

use std::cell::OnceCell;
use std::fmt;

/// Opaque handle into the type checker's type table.
///
/// The AST never interprets this value; it only stores it.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Write-once slot for a node's inferred type.
#[derive(Clone, Default)]
pub struct TypeSlot(OnceCell<TypeId>);

impl TypeSlot {
    pub const fn empty() -> Self {
        TypeSlot(OnceCell::new())
    }

    #[inline]
    pub fn get(&self) -> Option<TypeId> {
        self.0.get().copied()
    }

    /// Record the checked type.
    ///
    /// # Panics
    /// Panics if a type was already recorded; a node is checked once.
    pub fn set(&self, ty: TypeId) {
        if self.0.set(ty).is_err() {
            panic!("type slot written twice (node already checked)");
        }
    }

    /// True once a type has been recorded; the checker uses this to avoid
    /// re-analyzing subtrees shared across pipeline phases.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.get().is_some()
    }
}

impl fmt::Debug for TypeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(ty) => write!(f, "{ty:?}"),
            None => f.write_str("<unchecked>"),
        }
    }
}

/// Write-once slot for a declaration's doc comment.
#[derive(Clone, Default)]
pub struct DocSlot(OnceCell<Box<str>>);

impl DocSlot {
    pub const fn empty() -> Self {
        DocSlot(OnceCell::new())
    }

    #[inline]
    pub fn get(&self) -> Option<&str> {
        self.0.get().map(AsRef::as_ref)
    }

    /// Attach the doc comment.
    ///
    /// # Panics
    /// Panics if a doc comment was already attached.
    pub fn set(&self, doc: impl Into<Box<str>>) {
        if self.0.set(doc.into()).is_err() {
            panic!("doc comment attached twice");
        }
    }
}

impl fmt::Debug for DocSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(doc) => write!(f, "{doc:?}"),
            None => f.write_str("<none>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_slot_starts_empty() {
        let slot = TypeSlot::empty();
        assert_eq!(slot.get(), None);
        assert!(!slot.is_set());
    }

    #[test]
    fn type_slot_accepts_one_write() {
        let slot = TypeSlot::empty();
        slot.set(TypeId::new(7));
        assert_eq!(slot.get(), Some(TypeId::new(7)));
        assert!(slot.is_set());
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn type_slot_rejects_second_write() {
        let slot = TypeSlot::empty();
        slot.set(TypeId::new(1));
        slot.set(TypeId::new(2));
    }

    #[test]
    fn cloning_a_slot_clones_its_value() {
        let slot = TypeSlot::empty();
        slot.set(TypeId::new(3));
        let copy = slot.clone();
        assert_eq!(copy.get(), Some(TypeId::new(3)));
    }

    #[test]
    #[should_panic(expected = "attached twice")]
    fn doc_slot_rejects_second_write() {
        let slot = DocSlot::empty();
        slot.set("first");
        slot.set("second");
    }
}
