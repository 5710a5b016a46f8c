//! The lexer: scan state, the event loop and the public API.
//!
//! Scanning is pull-driven. Each call to [`Lexer::next_event`] runs scan
//! steps until at least one event is queued, then hands events out in
//! source order. A step either belongs to the active sub-lexer term (string,
//! heredoc) or to the top-level dispatcher.
//!
//! # Spans
//!
//! Every event covers `[tok_start, pos)` at the moment it is emitted, and
//! `tok_start` then moves to `pos`; consecutive events therefore tile the
//! input. The one exception is a heredoc: its body is scanned ahead of the
//! rest of the opening line, so the body events come between that line's
//! events and the line's remaining bytes.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use garnet_diagnostic::Diagnostic;
use garnet_ir::{Event, ExprState, SourceEncoding, Span, Token, TokenKind};
use garnet_lexer_core::{Cursor, LineSource, SourceBuffer, StrSource};
use tracing::trace;

use crate::delayed::DelayedBuf;
use crate::hooks::{
    EncodingHook, MagicComment, NoLocals, ScopeOracle, StandardEncodings,
};
use crate::lex_error::{LexErrorKind, LexWarningKind};
use crate::output::LiteralEncoding;
use crate::stack_state::BitStack;
use crate::state::LoopHint;
use crate::term::{InterpFrame, Term};
use crate::LexerConfig;

/// A context-sensitive lexer over a line source.
pub struct Lexer {
    pub(crate) cursor: Cursor,
    pub(crate) config: LexerConfig,
    pub(crate) state: ExprState,

    // === Sub-lexers ===
    pub(crate) term: Option<Term>,
    pub(crate) interp: Vec<InterpFrame>,
    /// The current step belongs to a literal term.
    pub(crate) literal: bool,
    pub(crate) heredoc_seq: u32,

    // === Token assembly ===
    pub(crate) tok_start: usize,
    pub(crate) tokbuf: Vec<u8>,
    pub(crate) lit: LiteralEncoding,
    pub(crate) delayed: DelayedBuf,
    pub(crate) out: VecDeque<Event>,
    /// While non-zero, queued events are held back (`<<~` bodies are
    /// dedented after their last line is read).
    pub(crate) hold: u32,

    // === Collaborators ===
    pub(crate) scope: Box<dyn ScopeOracle>,
    pub(crate) encodings: Box<dyn EncodingHook>,
    pub(crate) encoding: SourceEncoding,

    // === Expression context ===
    pub(crate) command_start: bool,
    pub(crate) space_seen: bool,
    pub(crate) token_seen: bool,
    pub(crate) cr_seen: bool,
    pub(crate) in_kwarg: bool,
    pub(crate) paren_nest: i32,
    pub(crate) brace_nest: i32,
    pub(crate) lpar_beg: i32,
    pub(crate) lpar_saved: Vec<i32>,
    /// Opening bracket kinds, innermost last.
    pub(crate) openers: Vec<TokenKind>,
    pub(crate) cond: BitStack,
    pub(crate) cmdarg: BitStack,
    pub(crate) loop_hints: Vec<LoopHint>,

    // === Results ===
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) failed: bool,
    pub(crate) magic_comments: Vec<MagicComment>,
    pub(crate) frozen_string_literal: Option<bool>,
    pub(crate) warn_indent: Option<bool>,
    pub(crate) started: bool,
    pub(crate) eof_emitted: bool,
}

impl Lexer {
    pub fn new(source: impl LineSource + 'static) -> Self {
        let cursor = Cursor::new(SourceBuffer::new(source));
        let config = LexerConfig::default();
        Lexer {
            cursor,
            state: ExprState::BEG,
            term: None,
            interp: Vec::new(),
            literal: false,
            heredoc_seq: 0,
            tok_start: 0,
            tokbuf: Vec::new(),
            lit: LiteralEncoding::default(),
            delayed: DelayedBuf::default(),
            out: VecDeque::new(),
            hold: 0,
            scope: Box::new(NoLocals),
            encodings: Box::new(StandardEncodings),
            encoding: config.default_encoding,
            config,
            command_start: true,
            space_seen: false,
            token_seen: false,
            cr_seen: false,
            in_kwarg: false,
            paren_nest: 0,
            brace_nest: 0,
            lpar_beg: -1,
            lpar_saved: Vec::new(),
            openers: Vec::new(),
            cond: BitStack::new(),
            cmdarg: BitStack::new(),
            loop_hints: Vec::new(),
            diagnostics: Vec::new(),
            failed: false,
            magic_comments: Vec::new(),
            frozen_string_literal: None,
            warn_indent: None,
            started: false,
            eof_emitted: false,
        }
    }

    /// Lex an in-memory source.
    pub fn for_text(text: impl Into<Vec<u8>>) -> Self {
        Lexer::new(StrSource::new(text))
    }

    #[must_use]
    pub fn with_config(mut self, config: LexerConfig) -> Self {
        if !self.started {
            self.encoding = config.default_encoding;
        }
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl ScopeOracle + 'static) -> Self {
        self.scope = Box::new(scope);
        self
    }

    #[must_use]
    pub fn with_encoding_hook(mut self, hook: impl EncodingHook + 'static) -> Self {
        self.encodings = Box::new(hook);
        self
    }

    // === Pulling events ===

    /// Next event in source order, or `None` after the end-of-input token.
    pub fn next_event(&mut self) -> Option<Event> {
        loop {
            if self.hold == 0 {
                if let Some(event) = self.out.pop_front() {
                    return Some(event);
                }
            }
            if self.eof_emitted {
                if self.hold == 0 {
                    return None;
                }
                self.hold = 0;
                continue;
            }
            self.step();
        }
    }

    /// Next grammar token (immediate or delayed), skipping trivia.
    pub fn next_token(&mut self) -> Option<Token> {
        while let Some(event) = self.next_event() {
            if let Some(token) = event.into_token() {
                return Some(token);
            }
        }
        None
    }

    /// Lex to the end and collect everything.
    pub fn tokenize(mut self) -> LexOutput {
        let events: Vec<Event> = self.by_ref().collect();
        LexOutput {
            events,
            diagnostics: self.diagnostics,
            failed: self.failed,
            encoding: self.encoding,
            magic_comments: self.magic_comments,
        }
    }

    fn step(&mut self) {
        if !self.started {
            self.started = true;
            if self.scan_bom() {
                return;
            }
        }
        match self.term.take() {
            Some(Term::Quote(quote)) => {
                self.literal = true;
                self.scan_quote(quote);
            }
            Some(Term::Heredoc(here)) => {
                self.literal = true;
                self.scan_heredoc(here);
            }
            None => {
                self.literal = false;
                self.scan_token();
            }
        }
    }

    // === Consumer controls ===

    pub fn state(&self) -> ExprState {
        self.state
    }

    pub fn set_state(&mut self, state: ExprState) {
        self.state = state;
    }

    pub fn cond_push(&mut self, value: bool) {
        self.cond.push(value);
    }

    pub fn cond_pop(&mut self) {
        self.cond.pop();
    }

    pub fn cmdarg_push(&mut self, value: bool) {
        self.cmdarg.push(value);
    }

    pub fn cmdarg_pop(&mut self) {
        self.cmdarg.pop();
    }

    /// Inside a keyword-argument default, a newline after a label ends
    /// the expression instead of being ignored.
    pub fn set_in_kwarg(&mut self, in_kwarg: bool) {
        self.in_kwarg = in_kwarg;
    }

    pub fn scope_mut(&mut self) -> &mut dyn ScopeOracle {
        self.scope.as_mut()
    }

    // === Results ===

    /// Source encoding in effect (after any magic comment).
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    pub fn magic_comments(&self) -> &[MagicComment] {
        &self.magic_comments
    }

    pub fn frozen_string_literal(&self) -> Option<bool> {
        self.frozen_string_literal
    }

    pub fn warn_indent(&self) -> Option<bool> {
        self.warn_indent
    }

    /// 1-based number of the line being scanned.
    pub fn line(&self) -> u32 {
        self.cursor.line_no()
    }

    /// Whether a fatal error was reported. Sticky.
    pub fn has_errors(&self) -> bool {
        self.failed
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // === Reporting ===

    /// Report an error at the start of the current token.
    pub(crate) fn error(&mut self, kind: LexErrorKind) {
        self.error_at(kind, self.tok_start);
    }

    pub(crate) fn error_at(&mut self, kind: LexErrorKind, offset: usize) {
        let (line, column) = self.cursor.line_col(offset);
        let diag = kind.to_diagnostic(Span::point(offset), line, column + 1);
        trace!(code = %diag.code, line, message = %diag.message, "lex error");
        self.failed = true;
        self.diagnostics.push(diag);
    }

    pub(crate) fn warn(&mut self, kind: LexWarningKind) {
        self.warn_at(kind, self.tok_start);
    }

    pub(crate) fn warn_at(&mut self, kind: LexWarningKind, offset: usize) {
        let (line, column) = self.cursor.line_col(offset);
        let diag = kind.to_diagnostic(Span::point(offset), line, column + 1);
        trace!(code = %diag.code, line, message = %diag.message, "lex warning");
        self.diagnostics.push(diag);
    }

    /// Warnings only shown in verbose mode.
    pub(crate) fn warn_verbose(&mut self, kind: LexWarningKind) {
        if self.config.verbose {
            self.warn(kind);
        }
    }

    // === Lines ===

    /// Move to the next line, parking or emitting whatever the current
    /// token has covered so far. Returns `false` at end of input.
    pub(crate) fn advance_line(&mut self) -> bool {
        let end = self.cursor.line_end();
        if self.tok_start < end {
            if self.literal {
                self.delayed.push(self.tok_start, end, self.tokbuf.len());
                self.tok_start = end;
            } else {
                self.cursor.goto_eol();
                self.ignore(garnet_ir::TriviaKind::Space);
            }
        }
        if !self.cursor.advance_line() {
            if let Some(err) = self.cursor.buffer_mut().take_io_error() {
                self.error_at(
                    LexErrorKind::SourceRead {
                        message: err.to_string(),
                    },
                    self.cursor.pos(),
                );
            }
            // The cursor may have jumped past a heredoc body.
            self.tok_start = self.tok_start.max(self.cursor.pos());
            return false;
        }
        self.tok_start = self.cursor.line_start();
        true
    }

    /// Next character of a literal, crossing line boundaries.
    pub(crate) fn nextc(&mut self) -> Option<u8> {
        if self.cursor.at_eol() && !self.advance_line() {
            return None;
        }
        self.cursor.next_in_line()
    }
}

impl Iterator for Lexer {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.next_event()
    }
}

impl FusedIterator for Lexer {}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("pos", &self.cursor.pos())
            .field("line", &self.cursor.line_no())
            .field("state", &self.state)
            .field("term", &self.term)
            .field("interp_depth", &self.interp.len())
            .field("paren_nest", &self.paren_nest)
            .field("brace_nest", &self.brace_nest)
            .field("queued", &self.out.len())
            .finish_non_exhaustive()
    }
}

/// Everything a full scan produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOutput {
    pub events: Vec<Event>,
    pub diagnostics: Vec<Diagnostic>,
    pub failed: bool,
    pub encoding: SourceEncoding,
    pub magic_comments: Vec<MagicComment>,
}

impl LexOutput {
    /// Grammar tokens, trivia skipped.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.events.iter().filter_map(Event::token)
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens().map(|t| t.kind).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.failed
    }
}
