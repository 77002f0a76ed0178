//! Focused traits shared by every node category.
//!
//! Rather than one wide interface, each capability is its own small trait:
//! `Located` for source ranges, `Typed` for the checker's write-once type
//! annotation, and `Node` for the full base contract every syntax-tree
//! category satisfies. Consumers depend only on what they use.

use crate::{Location, Span, TypeId};

/// Access to a node's source location.
pub trait Located {
    fn location(&self) -> &Location;

    /// Compact byte-range form of the location.
    fn span(&self) -> Span {
        self.location().span()
    }
}

/// Access to the checker's type annotation.
pub trait Typed {
    /// The recorded type, if this node has been checked.
    fn ty(&self) -> Option<TypeId>;

    /// Record the checked type. Panics on a second write.
    fn set_ty(&self, ty: TypeId);

    /// True once a type has been recorded; re-analysis should be skipped.
    fn skip_typechecking(&self) -> bool {
        self.ty().is_some()
    }
}

/// Base contract shared by every node category: a location, a staticness
/// verdict fixed at construction, and a write-once type slot.
pub trait Node: Located + Typed {
    /// True iff the node's value is fully known at compile time.
    fn is_static(&self) -> bool;
}
