//! Command handlers for the Garnet CLI.
//!
//! Each submodule implements one subcommand. Shared helpers such as
//! `read_source` live here in the module root.

mod check;
mod lex;

pub use check::{check_files, check_source, FileReport};
pub use lex::{format_event, lex_files, lex_source};

use garnet_diagnostic::emitter::TerminalEmitter;
use garnet_diagnostic::{Diagnostic, ErrorCode};

use crate::options::Options;

/// Read a source file as raw bytes; the lexer decides the encoding.
pub fn read_source(path: &str) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// An unreadable file, reported like any other source read failure.
pub(crate) fn read_failure(message: String) -> Diagnostic {
    Diagnostic::new(ErrorCode::E0016).with_message(message)
}

/// Stderr emitter honouring `--color`/`--no-color`.
pub(crate) fn stderr_emitter(options: &Options) -> TerminalEmitter<std::io::Stderr> {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    TerminalEmitter::stderr(options.color, is_tty)
}
