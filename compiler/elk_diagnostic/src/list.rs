//! Diagnostic accumulation.
//!
//! [`DiagnosticList`] is the plain single-threaded sink. When several
//! files are parsed or checked concurrently, [`SyncDiagnosticList`] wraps
//! one list behind a mutex: many workers append, one consumer takes the
//! accumulated list afterwards. That is the only concurrency boundary in
//! the front end.

use parking_lot::Mutex;

use elk_ast::Location;

use crate::{Diagnostic, Severity};

/// Ordered collection of diagnostics.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DiagnosticList {
    items: Vec<Diagnostic>,
}

impl DiagnosticList {
    pub fn new() -> Self {
        DiagnosticList::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn add_failure(&mut self, location: Location, message: impl Into<String>) {
        self.add(Diagnostic::failure(location, message));
    }

    pub fn add_warning(&mut self, location: Location, message: impl Into<String>) {
        self.add(Diagnostic::warning(location, message));
    }

    /// Move every diagnostic of `other` into this list.
    pub fn append(&mut self, other: &mut DiagnosticList) {
        self.items.append(&mut other.items);
    }

    /// True if any collected diagnostic is a failure; the signal callers
    /// use to halt a pipeline phase.
    pub fn is_failure(&self) -> bool {
        self.items.iter().any(Diagnostic::is_failure)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn failure_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_failure()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for DiagnosticList {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Thread-safe diagnostic sink shared by parallel parse/check workers.
#[derive(Debug, Default)]
pub struct SyncDiagnosticList {
    inner: Mutex<DiagnosticList>,
}

impl SyncDiagnosticList {
    pub fn new() -> Self {
        SyncDiagnosticList::default()
    }

    pub fn add(&self, diagnostic: Diagnostic) {
        self.inner.lock().add(diagnostic);
    }

    pub fn add_failure(&self, location: Location, message: impl Into<String>) {
        self.add(Diagnostic::failure(location, message));
    }

    pub fn add_warning(&self, location: Location, message: impl Into<String>) {
        self.add(Diagnostic::warning(location, message));
    }

    pub fn is_failure(&self) -> bool {
        self.inner.lock().is_failure()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Take the accumulated list. Called once, after the workers are done.
    pub fn into_inner(self) -> DiagnosticList {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_detection() {
        let mut list = DiagnosticList::new();
        assert!(!list.is_failure());

        list.add_warning(Location::synthetic(), "unused variable `x`");
        assert!(!list.is_failure());
        assert_eq!(list.warning_count(), 1);

        list.add_failure(Location::synthetic(), "undefined constant `Foo`");
        assert!(list.is_failure());
        assert_eq!(list.failure_count(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn append_preserves_order() {
        let mut first = DiagnosticList::new();
        first.add_warning(Location::synthetic(), "a");
        let mut second = DiagnosticList::new();
        second.add_warning(Location::synthetic(), "b");

        first.append(&mut second);
        assert!(second.is_empty());
        let messages: Vec<_> = first.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, ["a", "b"]);
    }

    #[test]
    fn concurrent_appends_are_all_collected() {
        let sink = SyncDiagnosticList::new();
        std::thread::scope(|scope| {
            for worker in 0..8 {
                let sink = &sink;
                scope.spawn(move || {
                    for i in 0..100 {
                        sink.add_warning(
                            Location::synthetic(),
                            format!("worker {worker} item {i}"),
                        );
                    }
                });
            }
        });
        let list = sink.into_inner();
        assert_eq!(list.len(), 800);
        assert!(!list.is_failure());
    }
}
