//! Collaborator hooks: local-variable scope and source encodings.
//!
//! The lexer never owns a symbol table or an encoding database. It asks a
//! [`ScopeOracle`] whether a name is a known local (which changes how the
//! next token reads) and an [`EncodingHook`] to resolve the name found in a
//! `coding:` magic comment.

use garnet_ir::SourceEncoding;
use rustc_hash::FxHashSet;

/// Answers "is this name a local variable in the current scope?".
pub trait ScopeOracle {
    fn is_local(&self, name: &[u8]) -> bool;

    /// Record a new local. Oracles backed by an external parser can ignore
    /// this.
    fn declare(&mut self, _name: &[u8]) {}
}

/// A scope with no locals at all.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoLocals;

impl ScopeOracle for NoLocals {
    fn is_local(&self, _name: &[u8]) -> bool {
        false
    }
}

/// A flat set of local names.
#[derive(Clone, Debug, Default)]
pub struct LocalScope {
    names: FxHashSet<Vec<u8>>,
}

impl LocalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &[u8]) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ScopeOracle for LocalScope {
    fn is_local(&self, name: &[u8]) -> bool {
        self.contains(name)
    }

    fn declare(&mut self, name: &[u8]) {
        self.names.insert(name.to_vec());
    }
}

impl<S: AsRef<[u8]>> FromIterator<S> for LocalScope {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LocalScope {
            names: iter.into_iter().map(|s| s.as_ref().to_vec()).collect(),
        }
    }
}

/// Why an encoding name was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncodingRejection {
    Unknown,
    NotAsciiCompatible(SourceEncoding),
}

/// Resolves encoding names from magic comments.
pub trait EncodingHook {
    fn resolve(&mut self, name: &str) -> Result<SourceEncoding, EncodingRejection>;
}

/// The built-in encoding names, matched case-insensitively.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardEncodings;

impl EncodingHook for StandardEncodings {
    fn resolve(&mut self, name: &str) -> Result<SourceEncoding, EncodingRejection> {
        let encoding = match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "cp65001" => SourceEncoding::Utf8,
            "us-ascii" | "ascii" | "ansi_x3.4-1968" | "646" => SourceEncoding::UsAscii,
            "ascii-8bit" | "binary" => SourceEncoding::Binary,
            "euc-jp" | "eucjp" => SourceEncoding::EucJp,
            "windows-31j" | "shift_jis" | "sjis" | "cp932" => {
                SourceEncoding::Windows31J
            }
            "iso-8859-1" | "iso8859-1" | "latin1" => SourceEncoding::Iso8859_1,
            "windows-1252" | "cp1252" => SourceEncoding::Windows1252,
            "utf-16le" => SourceEncoding::Utf16Le,
            "utf-16be" | "utf-16" => SourceEncoding::Utf16Be,
            "utf-32le" => SourceEncoding::Utf32Le,
            "utf-32be" | "utf-32" => SourceEncoding::Utf32Be,
            _ => return Err(EncodingRejection::Unknown),
        };
        if encoding.is_ascii_compatible() {
            Ok(encoding)
        } else {
            Err(EncodingRejection::NotAsciiCompatible(encoding))
        }
    }
}

/// A magic comment the lexer recognised, e.g. `# frozen_string_literal: true`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MagicComment {
    /// Name with `-` normalised to `_`.
    pub name: String,
    pub value: String,
    pub line: u32,
}
