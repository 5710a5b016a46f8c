//! The `lex` command: print every event of a file, trivia included.

use std::io::{self, Write};

use garnet_diagnostic::emitter::DiagnosticEmitter;
use garnet_diagnostic::Diagnostic;
use garnet_ir::Event;

use super::{read_failure, read_source, stderr_emitter};
use crate::options::Options;

/// Lex each file in turn, events to stdout and diagnostics to stderr.
///
/// Returns `false` if any file was unreadable or failed to lex.
pub fn lex_files(options: &Options) -> bool {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut emitter = stderr_emitter(options);
    let mut ok = true;
    let headers = options.paths.len() > 1;

    for path in &options.paths {
        emitter.set_path(path.as_str());
        let source = match read_source(path) {
            Ok(source) => source,
            Err(message) => {
                emitter.set_source(None);
                emitter.emit(&read_failure(message));
                ok = false;
                continue;
            }
        };
        if headers {
            let _ = writeln!(out, "==> {path} <==");
        }
        match lex_source(&source, options, &mut out) {
            Ok(diagnostics) => {
                ok &= !diagnostics.iter().any(Diagnostic::is_error);
                emitter.set_source(Some(source.as_slice()));
                emitter.emit_all(&diagnostics);
            }
            // Closed pipe, e.g. `garnet lex a.rb | head`.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => break,
            Err(e) => {
                eprintln!("error writing output: {e}");
                return false;
            }
        }
    }
    emitter.flush();
    ok
}

/// Stream the events of `source` to `out`, one per line.
///
/// Returns the diagnostics once the input is exhausted.
pub fn lex_source<W: Write>(
    source: &[u8],
    options: &Options,
    out: &mut W,
) -> io::Result<Vec<Diagnostic>> {
    let mut lexer = options.lexer(source.to_vec());
    while let Some(event) = lexer.next_event() {
        writeln!(out, "{}", format_event(&event, source, options.trace_state))?;
    }
    Ok(lexer.take_diagnostics())
}

/// `<line>:<col> <Kind> "<text>"`, with the state after the token appended
/// in brackets when `trace_state` is set.
pub fn format_event(event: &Event, source: &[u8], trace_state: bool) -> String {
    let text = source
        .get(event.span().to_range())
        .map(String::from_utf8_lossy)
        .unwrap_or_default();
    let text = text.escape_debug();
    match event {
        Event::Token(token) | Event::Delayed(token) if trace_state => format!(
            "{}:{} {:?} \"{text}\" [{}]",
            token.line, token.column, token.kind, token.state
        ),
        Event::Token(token) | Event::Delayed(token) => {
            format!("{}:{} {:?} \"{text}\"", token.line, token.column, token.kind)
        }
        Event::Ignored(trivia) => {
            format!("{}:{} {:?} \"{text}\"", trivia.line, trivia.column, trivia.kind)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
