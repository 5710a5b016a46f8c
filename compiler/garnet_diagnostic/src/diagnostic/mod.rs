//! The diagnostic record.

use std::fmt;

use garnet_ir::Span;

use crate::ErrorCode;

/// Lexical conditions come in two grades: errors fail the scan, warnings
/// are advisory and never change the token stream.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A condition reported by the lexer.
///
/// `line` is 1-based. `column` is the 1-based byte column, as printed in
/// `file:line:col` locations; tokens use 0-based columns instead.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub line: u32,
    pub column: u32,
    /// Extra context lines, rendered after the location.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// A diagnostic for `code`, graded by the code's `E`/`W` prefix.
    pub fn new(code: ErrorCode) -> Self {
        let severity = if code.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };
        Diagnostic {
            code,
            severity,
            message: code.description().to_string(),
            span: Span::DUMMY,
            line: 1,
            column: 1,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..self
        }
    }

    /// Point the diagnostic at `span`, which starts at `line:column`.
    #[must_use]
    pub fn at(self, span: Span, line: u32, column: u32) -> Self {
        Diagnostic {
            span,
            line,
            column,
            ..self
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Source-order key: line, then column.
    pub fn position(&self) -> (u32, u32) {
        (self.line, self.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Diagnostic {
            code,
            severity,
            message,
            line,
            column,
            ..
        } = self;
        write!(f, "{line}:{column}: {severity}[{code}]: {message}")
    }
}
