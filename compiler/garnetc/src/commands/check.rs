//! The `check` command: lex files in parallel and report diagnostics.

use garnet_diagnostic::emitter::DiagnosticEmitter;
use garnet_diagnostic::{Diagnostic, DiagnosticQueue};
use rayon::prelude::*;
use tracing::debug;

use super::{read_failure, read_source, stderr_emitter};
use crate::options::Options;

/// Outcome of checking one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    /// Sorted and deduplicated.
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
    /// The bytes that were lexed, kept for snippets. `None` if unreadable.
    pub source: Option<Vec<u8>>,
}

impl FileReport {
    pub fn failed(&self) -> bool {
        self.error_count > 0
    }
}

/// Lex one in-memory source without printing anything.
pub fn check_source(path: &str, source: Vec<u8>, options: &Options) -> FileReport {
    let output = options.lexer(source.clone()).tokenize();
    let mut queue = DiagnosticQueue::new();
    queue.extend(output.diagnostics);
    report(path, Some(source), queue)
}

fn check_path(path: &str, options: &Options) -> FileReport {
    match read_source(path) {
        Ok(source) => check_source(path, source, options),
        Err(message) => {
            let mut queue = DiagnosticQueue::new();
            queue.push(read_failure(message));
            report(path, None, queue)
        }
    }
}

fn report(path: &str, source: Option<Vec<u8>>, queue: DiagnosticQueue) -> FileReport {
    let error_count = queue.error_count() + queue.dropped_count();
    let warning_count = queue.warning_count();
    FileReport {
        path: path.to_string(),
        diagnostics: queue.into_sorted(),
        error_count,
        warning_count,
        source,
    }
}

/// Check every path, rendering diagnostics in path order once all files
/// are done. Returns `false` if any file had errors.
pub fn check_files(options: &Options) -> bool {
    debug!(files = options.paths.len(), "checking");
    let reports: Vec<FileReport> = options
        .paths
        .par_iter()
        .map(|path| check_path(path, options))
        .collect();

    let mut emitter = stderr_emitter(options);
    let mut errors = 0;
    let mut warnings = 0;
    for report in &reports {
        emitter.set_path(report.path.as_str());
        emitter.set_source(report.source.as_deref());
        emitter.emit_all(&report.diagnostics);
        errors += report.error_count;
        warnings += report.warning_count;
    }
    emitter.finish(errors, warnings);
    emitter.flush();

    let failed = reports.iter().filter(|r| r.failed()).count();
    debug!(failed, "check finished");
    failed == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
