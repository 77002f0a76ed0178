//! Diagnostic system for the Elk front end.
//!
//! Diagnostics are plain values with two severities (`Failure` halts a
//! pipeline phase, `Warning` does not), accumulated in lists and rendered
//! by a terminal emitter. They are never thrown: malformed source becomes
//! an invalid AST node plus a diagnostic here, and later phases keep
//! going.
//!
//! Locations come from `elk_ast`; the emitter follows their parent chains
//! to report diagnostics in macro-expanded code with an "expanded from"
//! trail back to the call site.

mod diagnostic;
mod emitter;
mod list;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{ColorMode, SourceCache, TerminalEmitter};
pub use list::{DiagnosticList, SyncDiagnosticList};
