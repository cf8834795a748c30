use crate::text::TextRange;
use compact_str::CompactString;
use std::fmt;

/// The kind of an atomic spec token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    LParen,
    RParen,
    Hash,
    Id,
    Comma,
    Dot,
    Star,
    Or,
    Underscore,
    Char,
    InputText,
    /// An unrecognized or malformed piece of input. The parser turns this
    /// into a general syntax error.
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eof => "EOF",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Hash => "HASH",
            Self::Id => "ID",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Star => "STAR",
            Self::Or => "OR",
            Self::Underscore => "UNDERSCORE",
            Self::Char => "CHAR",
            Self::InputText => "INPUT_TEXT",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// An atomic token of the spec source text.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token. Includes the surrounding quotes for
    /// [`TokenKind::InputText`].
    pub text: CompactString,
    /// 1-based line where the token starts
    pub line: u32,
    /// Byte range in the spec source
    pub range: TextRange,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<CompactString>, line: u32, range: TextRange) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            range,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.text, self.kind, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{TextRange, TextSize};

    #[test]
    fn test_token_display() {
        let token = Token::new(
            TokenKind::Id,
            "tok1",
            2,
            TextRange::at(TextSize::from(5), TextSize::from(4)),
        );
        assert_eq!(format!("{token}"), "{tok1, ID, 2}");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", TokenKind::InputText), "INPUT_TEXT");
        assert_eq!(format!("{}", TokenKind::Underscore), "UNDERSCORE");
    }
}
