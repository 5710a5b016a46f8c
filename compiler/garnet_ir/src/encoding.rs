use std::fmt;

/// Character encoding declared for a source file or attached to a literal.
///
/// The lexer works on bytes and never transcodes; the encoding only decides
/// which magic comments are accepted and which encoding a literal carries.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum SourceEncoding {
    #[default]
    Utf8,
    UsAscii,
    /// Raw bytes (`ASCII-8BIT`, alias `BINARY`).
    Binary,
    EucJp,
    Windows31J,
    Iso8859_1,
    Windows1252,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
}

impl SourceEncoding {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "UTF-8",
            SourceEncoding::UsAscii => "US-ASCII",
            SourceEncoding::Binary => "ASCII-8BIT",
            SourceEncoding::EucJp => "EUC-JP",
            SourceEncoding::Windows31J => "Windows-31J",
            SourceEncoding::Iso8859_1 => "ISO-8859-1",
            SourceEncoding::Windows1252 => "Windows-1252",
            SourceEncoding::Utf16Le => "UTF-16LE",
            SourceEncoding::Utf16Be => "UTF-16BE",
            SourceEncoding::Utf32Le => "UTF-32LE",
            SourceEncoding::Utf32Be => "UTF-32BE",
        }
    }

    /// Whether bytes `0x00..=0x7F` mean the same thing as in ASCII.
    pub fn is_ascii_compatible(self) -> bool {
        !matches!(
            self,
            SourceEncoding::Utf16Le
                | SourceEncoding::Utf16Be
                | SourceEncoding::Utf32Le
                | SourceEncoding::Utf32Be
        )
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
