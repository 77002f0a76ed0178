//! The root aggregate a parsed file produces.

use std::fmt;
use std::path::PathBuf;

use crate::{Located, Location, Stmt};

/// Pipeline progress of a program, advanced by the type checker. The
/// states are strictly ordered; a program never moves backwards.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub enum ProgramState {
    #[default]
    Unchecked,
    CheckingNamespaces,
    CheckedNamespaces,
    CheckingMethods,
    CheckedMethods,
    CheckingExpressions,
    CheckedExpressions,
}

/// Root of a parsed file: its statements in source order, the resolved
/// file-system paths of its imports, and the pipeline state.
#[derive(Clone, Debug)]
pub struct Program {
    body: Vec<Stmt>,
    import_paths: Vec<PathBuf>,
    state: ProgramState,
    location: Location,
}

impl Program {
    pub fn new(location: Location, body: Vec<Stmt>) -> Self {
        Program {
            body,
            import_paths: Vec::new(),
            state: ProgramState::Unchecked,
            location,
        }
    }

    #[inline]
    pub fn body(&self) -> &[Stmt] {
        &self.body
    }

    #[inline]
    pub fn import_paths(&self) -> &[PathBuf] {
        &self.import_paths
    }

    /// Record a resolved import path, in resolution order.
    pub fn add_import_path(&mut self, path: PathBuf) {
        self.import_paths.push(path);
    }

    #[inline]
    pub fn state(&self) -> ProgramState {
        self.state
    }

    /// Advance the pipeline state. Moving backwards is a caller bug; it is
    /// asserted in debug builds but not enforced in release builds.
    pub fn advance_state(&mut self, state: ProgramState) {
        debug_assert!(
            state >= self.state,
            "program state moved backwards: {:?} -> {state:?}",
            self.state
        );
        tracing::debug!(from = ?self.state, to = ?state, "advancing program state");
        self.state = state;
    }
}

impl Located for Program {
    fn location(&self) -> &Location {
        &self.location
    }
}

// Structural equality covers the tree and resolved imports; pipeline state
// is bookkeeping and does not participate.
impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.import_paths == other.import_paths
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProgramState::Unchecked => "unchecked",
            ProgramState::CheckingNamespaces => "checking namespaces",
            ProgramState::CheckedNamespaces => "checked namespaces",
            ProgramState::CheckingMethods => "checking methods",
            ProgramState::CheckedMethods => "checked methods",
            ProgramState::CheckingExpressions => "checking expressions",
            ProgramState::CheckedExpressions => "checked expressions",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::Expr;

    fn program() -> Program {
        let expr = Expr::new(Location::synthetic(), ExprKind::Int(1));
        Program::new(Location::synthetic(), vec![Stmt::expression(expr)])
    }

    #[test]
    fn starts_unchecked() {
        assert_eq!(program().state(), ProgramState::Unchecked);
    }

    #[test]
    fn states_are_ordered() {
        assert!(ProgramState::Unchecked < ProgramState::CheckingNamespaces);
        assert!(ProgramState::CheckedMethods < ProgramState::CheckingExpressions);
        assert!(ProgramState::CheckingExpressions < ProgramState::CheckedExpressions);
    }

    #[test]
    fn advances_through_phases() {
        let mut program = program();
        program.advance_state(ProgramState::CheckingNamespaces);
        program.advance_state(ProgramState::CheckedNamespaces);
        assert_eq!(program.state(), ProgramState::CheckedNamespaces);
    }

    #[test]
    fn import_paths_keep_resolution_order() {
        let mut program = program();
        program.add_import_path(PathBuf::from("lib/a.elk"));
        program.add_import_path(PathBuf::from("lib/b.elk"));
        assert_eq!(
            program.import_paths(),
            [PathBuf::from("lib/a.elk"), PathBuf::from("lib/b.elk")]
        );
    }

    #[test]
    fn equality_ignores_pipeline_state() {
        let a = program();
        let mut b = program();
        b.advance_state(ProgramState::CheckedExpressions);
        assert_eq!(a, b);
    }
}
