//! Command-line options shared by `lex` and `check`.

use garnet_diagnostic::emitter::ColorMode;
use garnet_lexer::{Lexer, LexerConfig, LocalScope};

/// Parsed flags and file operands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Names treated as local variables from the first token on.
    pub locals: Vec<String>,
    /// Report verbose-only warnings.
    pub verbose: bool,
    /// Print the expression state after each token (`lex` only).
    pub trace_state: bool,
    pub color: ColorMode,
    pub paths: Vec<String>,
}

impl Options {
    /// Parse everything after the subcommand name.
    ///
    /// Flags and paths may be interleaved; `--` ends flag parsing.
    pub fn parse(args: &[String]) -> Result<Options, String> {
        let mut options = Options::default();
        let mut flags_done = false;
        for arg in args {
            if flags_done || !arg.starts_with('-') || arg == "-" {
                options.paths.push(arg.clone());
                continue;
            }
            if let Some(list) = arg.strip_prefix("--locals=") {
                options.locals.extend(
                    list.split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string),
                );
                continue;
            }
            match arg.as_str() {
                "--" => flags_done = true,
                "--verbose" | "-v" => options.verbose = true,
                "--trace-state" => options.trace_state = true,
                "--no-color" => options.color = ColorMode::Never,
                "--color" => options.color = ColorMode::Always,
                _ => return Err(format!("unknown option '{arg}'")),
            }
        }
        Ok(options)
    }

    pub fn lexer_config(&self) -> LexerConfig {
        LexerConfig::default().with_verbose(self.verbose)
    }

    /// A lexer over `source` configured from these options.
    pub fn lexer(&self, source: Vec<u8>) -> Lexer {
        Lexer::for_text(source)
            .with_config(self.lexer_config())
            .with_scope(self.locals.iter().collect::<LocalScope>())
    }
}
