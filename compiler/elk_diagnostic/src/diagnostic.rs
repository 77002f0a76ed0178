//! Diagnostic values.

use std::fmt;

use elk_ast::Location;

/// Severity of a diagnostic.
///
/// `Failure` halts the pipeline phase that produced it; `Warning` is
/// reported and otherwise ignored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Failure,
    Warning,
}

impl Severity {
    pub fn is_failure(self) -> bool {
        matches!(self, Severity::Failure)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Failure => f.write_str("failure"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One reported problem, anchored to a source location.
///
/// Diagnostics are values, accumulated in lists and inspected by the
/// driver; they are never used for control flow.
#[derive(Clone, PartialEq, Debug)]
#[must_use = "diagnostics should be collected or reported, not silently dropped"]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn failure(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Failure,
            message: message.into(),
            location,
        }
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            location,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.severity.is_failure()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(Severity::Failure.is_failure());
        assert!(!Severity::Warning.is_failure());
    }

    #[test]
    fn display_names_severity_and_location() {
        let diagnostic = Diagnostic::failure(Location::synthetic(), "undefined method `foo`");
        assert_eq!(
            diagnostic.to_string(),
            "failure: undefined method `foo` (<generated>:1:1)"
        );
    }
}
