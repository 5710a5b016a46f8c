//! Per-file collection of diagnostics before display.
//!
//! The lexer reports conditions in the order it finds them. Heredoc bodies
//! are scanned before the rest of their opening line, so that order is not
//! source order. The queue puts diagnostics back into source order, drops
//! repeats of the same condition at the same place and caps the number of
//! errors kept for one file.

use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorCode};

/// Filtering applied as diagnostics are pushed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Errors kept per queue; `0` keeps every error. Warnings are never
    /// capped.
    pub error_limit: usize,
    /// Drop a diagnostic whose code and position were already reported.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Keep everything, in source order.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DiagnosticQueue {
    items: Vec<Diagnostic>,
    seen: FxHashSet<(ErrorCode, u32, u32)>,
    errors: usize,
    warnings: usize,
    /// Errors refused because the limit was reached.
    dropped: usize,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            items: Vec::new(),
            seen: FxHashSet::default(),
            errors: 0,
            warnings: 0,
            dropped: 0,
            config,
        }
    }

    /// Queue `diag` unless it is filtered out; returns whether it was kept.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if self.config.deduplicate && !self.seen.insert((diag.code, diag.line, diag.column)) {
            return false;
        }
        if diag.is_error() {
            if self.limit_reached() {
                self.dropped += 1;
                return false;
            }
            self.errors += 1;
        } else {
            self.warnings += 1;
        }
        self.items.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.push(diag);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit != 0 && self.errors >= self.config.error_limit
    }

    /// Errors kept, not counting dropped ones.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    pub fn has_errors(&self) -> bool {
        self.errors + self.dropped > 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// The kept diagnostics in source order. Diagnostics at the same
    /// position stay in the order they were reported.
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut items = self.items;
        items.sort_by_key(Diagnostic::position);
        items
    }
}

#[cfg(test)]
mod tests;
