//! Terminal rendering of diagnostics.
//!
//! Human-readable output with optional ANSI colors, a source-line snippet
//! with caret underline, and "expanded from" notes following a location's
//! macro-expansion parent chain.

use std::io::{self, Write};

use rustc_hash::FxHashMap;

use elk_ast::Location;

use crate::{Diagnostic, DiagnosticList, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const FAILURE: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Maximum number of characters of one source line shown in a snippet.
/// Longer lines are windowed around the caret with ellipsis markers.
const MAX_SNIPPET_WIDTH: usize = 80;

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Decide based on whether the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` is only consulted in `Auto` mode.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Source texts keyed by the file name locations carry.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: FxHashMap<Box<str>, String>,
}

impl SourceCache {
    pub fn new() -> Self {
        SourceCache::default()
    }

    pub fn add(&mut self, name: impl Into<Box<str>>, text: impl Into<String>) {
        self.files.insert(name.into(), text.into());
    }

    /// Fetch one line of a registered file, 1-based.
    fn line(&self, file: &str, line: u32) -> Option<&str> {
        let text = self.files.get(file)?;
        text.lines().nth(line.saturating_sub(1) as usize)
    }
}

/// One windowed snippet line plus the caret offset within it.
struct Snippet {
    rendered: String,
    caret_offset: usize,
}

/// Window a line to [`MAX_SNIPPET_WIDTH`] characters around the caret
/// column, marking cut edges with `...`.
fn window_line(line: &str, start_column: u32) -> Snippet {
    let chars: Vec<char> = line.chars().collect();
    let caret = (start_column.saturating_sub(1) as usize).min(chars.len());

    if chars.len() <= MAX_SNIPPET_WIDTH {
        return Snippet {
            rendered: line.to_string(),
            caret_offset: caret,
        };
    }

    let half = MAX_SNIPPET_WIDTH / 2;
    let window_start = caret
        .saturating_sub(half)
        .min(chars.len() - MAX_SNIPPET_WIDTH);
    let window_end = window_start + MAX_SNIPPET_WIDTH;

    let mut rendered = String::new();
    let mut caret_offset = caret - window_start;
    if window_start > 0 {
        rendered.push_str("...");
        caret_offset += 3;
    }
    rendered.extend(&chars[window_start..window_end]);
    if window_end < chars.len() {
        rendered.push_str("...");
    }

    Snippet {
        rendered,
        caret_offset,
    }
}

/// Human-readable diagnostic emitter with optional ANSI color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    sources: SourceCache,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            sources: SourceCache::new(),
        }
    }

    /// Emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Register a source text so diagnostics in it get snippets.
    pub fn add_source(&mut self, name: impl Into<Box<str>>, text: impl Into<String>) {
        self.sources.add(name, text);
    }

    /// Recover the underlying writer; used by tests to read the output.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Failure => colors::FAILURE,
            Severity::Warning => colors::WARNING,
        }
    }

    /// Render one diagnostic: header, location, snippet, expansion trail.
    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        let severity = diagnostic.severity;
        self.write_colored(&severity.to_string(), Self::severity_color(severity));
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        let location = &diagnostic.location;
        let _ = writeln!(self.writer, "  --> {location}");

        self.write_snippet(location, severity);

        // Expansion trail: one note per parent, outermost last.
        let mut parent = location.parent();
        while let Some(site) = parent {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::NOTE, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": expanded from macro call at {site}");
            parent = site.parent();
        }

        let _ = writeln!(self.writer);
    }

    fn write_snippet(&mut self, location: &Location, severity: Severity) {
        let start = location.start();
        let Some(line) = self.sources.line(location.file(), start.line) else {
            return;
        };
        let snippet = window_line(line, start.column);

        let end = location.end();
        let span_width = if end.line == start.line && end.column > start.column {
            (end.column - start.column) as usize
        } else {
            1
        };
        let caret_width = span_width.min(snippet.rendered.chars().count() - snippet.caret_offset);
        let caret_width = caret_width.max(1);

        let gutter = start.line.to_string();
        let pad = " ".repeat(gutter.len());

        let _ = writeln!(self.writer, "{pad} |");
        if self.colors {
            let _ = write!(self.writer, "{}{gutter}{} | ", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "{gutter} | ");
        }
        let _ = writeln!(self.writer, "{}", snippet.rendered);

        let _ = write!(self.writer, "{pad} | {}", " ".repeat(snippet.caret_offset));
        let carets = "^".repeat(caret_width);
        self.write_colored(&carets, Self::severity_color(severity));
        let _ = writeln!(self.writer);
    }

    /// Render a whole list in order.
    pub fn emit_all(&mut self, list: &DiagnosticList) {
        for diagnostic in list {
            self.emit(diagnostic);
        }
    }

    /// Closing summary line, mirroring compiler conventions.
    pub fn emit_summary(&mut self, list: &DiagnosticList) {
        let failures = list.failure_count();
        let warnings = list.warning_count();

        if failures > 0 {
            self.write_colored("failure", colors::FAILURE);
            let noun = if failures == 1 { "failure" } else { "failures" };
            if warnings > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {failures} previous {noun}; {warnings} warning{} emitted",
                    if warnings == 1 { "" } else { "s" }
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {failures} previous {noun}");
            }
        } else if warnings > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warnings} warning{} emitted",
                if warnings == 1 { "" } else { "s" }
            );
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use elk_ast::Position;

    fn render(diagnostic: &Diagnostic, source: Option<(&str, &str)>) -> String {
        let mut emitter =
            TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        if let Some((name, text)) = source {
            emitter.add_source(name, text);
        }
        emitter.emit(diagnostic);
        String::from_utf8(emitter.into_writer()).unwrap_or_default()
    }

    fn location(file: &str, line: u32, start_col: u32, end_col: u32) -> Location {
        Location::new(
            file,
            Position::new(start_col - 1, line, start_col),
            Position::new(end_col - 1, line, end_col),
        )
    }

    #[test]
    fn renders_header_location_and_caret() {
        let diagnostic = Diagnostic::failure(
            location("main.elk", 1, 9, 12),
            "undefined method `foo`",
        );
        let output = render(&diagnostic, Some(("main.elk", "val x = foo + 1\n")));
        assert_eq!(
            output,
            "failure: undefined method `foo`\n\
             \x20 --> main.elk:1:9\n\
             \x20 |\n\
             1 | val x = foo + 1\n\
             \x20 |         ^^^\n\
             \n"
        );
    }

    #[test]
    fn missing_source_skips_the_snippet() {
        let diagnostic = Diagnostic::warning(location("gone.elk", 3, 1, 2), "unused");
        let output = render(&diagnostic, None);
        assert!(output.contains("warning: unused"));
        assert!(output.contains("--> gone.elk:3:1"));
        assert!(!output.contains(" | "));
    }

    #[test]
    fn long_lines_are_windowed_with_ellipses() {
        let long_line = "x".repeat(200);
        let diagnostic = Diagnostic::failure(location("main.elk", 1, 150, 153), "boom");
        let output = render(&diagnostic, Some(("main.elk", long_line.as_str())));

        let snippet_line = output
            .lines()
            .find(|line| line.starts_with("1 | "))
            .unwrap_or_default();
        assert!(snippet_line.contains("..."));
        // Gutter (4) + both ellipses (6) + window (80) is the ceiling.
        assert!(snippet_line.chars().count() <= 4 + 6 + MAX_SNIPPET_WIDTH);

        // The caret still lands inside the window.
        assert!(output.lines().any(|line| line.contains('^')));
    }

    #[test]
    fn expansion_chain_is_reported() {
        let written_at = location("template.elk", 2, 3, 8);
        let call_site = location("main.elk", 10, 1, 6);
        let expanded = Location::spliced(Some(&call_site), &written_at, true);

        let diagnostic = Diagnostic::failure(expanded, "type mismatch");
        let output = render(&diagnostic, None);
        assert!(output.contains("--> template.elk:2:3"));
        assert!(output.contains("note: expanded from macro call at main.elk:10:1"));
    }

    #[test]
    fn summary_counts_both_severities() {
        let mut list = DiagnosticList::new();
        list.add_failure(Location::synthetic(), "a");
        list.add_failure(Location::synthetic(), "b");
        list.add_warning(Location::synthetic(), "c");

        let mut emitter =
            TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        emitter.emit_summary(&list);
        let output = String::from_utf8(emitter.into_writer()).unwrap_or_default();
        assert_eq!(
            output,
            "failure: aborting due to 2 previous failures; 1 warning emitted\n"
        );
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.should_use_colors(true));
        assert!(!ColorMode::Auto.should_use_colors(false));
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
    }
}
