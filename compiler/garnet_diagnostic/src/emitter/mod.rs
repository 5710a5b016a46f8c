//! Rendering diagnostics for people.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::{Diagnostic, Severity};

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    /// Close a run with its totals.
    fn finish(&mut self, errors: usize, warnings: usize);

    fn flush(&mut self);
}

/// The closing line of a run and the worst severity in it, or `None` when
/// nothing was reported.
pub fn summary(errors: usize, warnings: usize) -> Option<(Severity, String)> {
    match (errors, warnings) {
        (0, 0) => None,
        (0, w) => Some((Severity::Warning, count(w, "warning"))),
        (e, 0) => Some((
            Severity::Error,
            format!("lexing failed with {}", count(e, "error")),
        )),
        (e, w) => Some((
            Severity::Error,
            format!(
                "lexing failed with {} and {}",
                count(e, "error"),
                count(w, "warning")
            ),
        )),
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
