//! Plain-text rendering for terminals.
//!
//! ```text
//! error[E0002]: can't find string "EOS" anywhere before EOF
//!   --> a.rb:1:5
//!    |
//!  1 | x = <<EOS
//!    |     ^^^^^
//!   = note: heredoc opened here
//! ```
//!
//! The snippet is only printed when the emitter was given the file's source.

use std::io::{self, Write};

use super::{summary, DiagnosticEmitter};
use crate::{Diagnostic, Severity};

/// Whether to style output with ANSI escapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Error,
    Warning,
    Emphasis,
    Gutter,
}

impl Style {
    fn for_severity(severity: Severity) -> Style {
        match severity {
            Severity::Error => Style::Error,
            Severity::Warning => Style::Warning,
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Warning => "\x1b[1;33m",
            Style::Emphasis => "\x1b[1m",
            Style::Gutter => "\x1b[1;34m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Renders diagnostics as text, one block per diagnostic.
pub struct TerminalEmitter<W: Write> {
    out: W,
    styled: bool,
    path: Option<String>,
    source: Option<Vec<u8>>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            styled: mode.should_use_colors(is_tty),
            path: None,
            source: None,
        }
    }

    /// Prefix locations with `path`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.set_path(path);
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// Source of the file being reported, used for line snippets.
    pub fn set_source(&mut self, source: Option<&[u8]>) {
        self.source = source.map(<[u8]>::to_vec);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, style: Style, text: &str) -> io::Result<()> {
        if self.styled {
            write!(self.out, "{}{text}{RESET}", style.ansi())
        } else {
            self.out.write_all(text.as_bytes())
        }
    }

    fn render(&mut self, diag: &Diagnostic) -> io::Result<()> {
        let style = Style::for_severity(diag.severity);
        self.paint(style, &format!("{}[{}]", diag.severity, diag.code))?;
        writeln!(self.out, ": {}", diag.message)?;

        let location = match &self.path {
            Some(path) => format!("{path}:{}:{}", diag.line, diag.column),
            None => format!("{}:{}", diag.line, diag.column),
        };
        write!(self.out, "  --> ")?;
        self.paint(Style::Gutter, &location)?;
        writeln!(self.out)?;

        if let Some(snippet) = self.source.as_deref().and_then(|src| Snippet::of(src, diag)) {
            let number = diag.line.to_string();
            let blank = " ".repeat(number.len());
            self.paint(Style::Gutter, &format!(" {blank} |"))?;
            writeln!(self.out)?;
            self.paint(Style::Gutter, &format!(" {number} |"))?;
            writeln!(self.out, " {}", snippet.text)?;
            self.paint(Style::Gutter, &format!(" {blank} |"))?;
            write!(self.out, " {}", snippet.pad)?;
            self.paint(style, &"^".repeat(snippet.width))?;
            writeln!(self.out)?;
        }

        for note in &diag.notes {
            write!(self.out, "  = ")?;
            self.paint(Style::Emphasis, "note")?;
            writeln!(self.out, ": {note}")?;
        }
        Ok(())
    }

    fn render_summary(&mut self, errors: usize, warnings: usize) -> io::Result<()> {
        let Some((severity, text)) = summary(errors, warnings) else {
            return Ok(());
        };
        self.paint(Style::for_severity(severity), severity.label())?;
        writeln!(self.out, ": {text}")
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

// Write failures are dropped: a closed stderr leaves nowhere to report them.
impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = self.render(diagnostic);
    }

    fn finish(&mut self, errors: usize, warnings: usize) {
        let _ = self.render_summary(errors, warnings);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}

/// The source line a diagnostic points into.
#[derive(Debug, PartialEq, Eq)]
struct Snippet {
    text: String,
    /// Blanks up to the column, tabs kept so the caret lines up.
    pad: String,
    width: usize,
}

impl Snippet {
    fn of(source: &[u8], diag: &Diagnostic) -> Option<Snippet> {
        let index = diag.line.checked_sub(1)? as usize;
        let line = source.split(|&b| b == b'\n').nth(index)?;
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let start = (diag.column.saturating_sub(1) as usize).min(line.len());
        let end = start + (diag.span.len() as usize).min(line.len() - start);
        let pad = String::from_utf8_lossy(&line[..start])
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        let width = String::from_utf8_lossy(&line[start..end]).chars().count();
        Some(Snippet {
            text: String::from_utf8_lossy(line).into_owned(),
            pad,
            width: width.max(1),
        })
    }
}
