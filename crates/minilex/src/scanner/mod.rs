//! # Spec Scanner
//!
//! The character-level scanner that turns spec source text into atomic
//! tokens: identifiers, single characters, punctuation, and the quoted
//! input text.
//!
//! The whole source is pre-tokenized into a buffer, so the parser gets
//! arbitrary lookahead via [`Scanner::peek`] without any pushback
//! machinery.
//!
//! Lexical rules:
//!
//! - `ID`: a letter followed by one or more letters or digits.
//! - `CHAR`: a single letter or digit. A digit never starts an `ID`.
//! - Punctuation: `(` `)` `,` `.` `*` `|` `#` `_`.
//! - `INPUT_TEXT`: `"` ... `"`, quotes included in the lexeme.
//! - Anything else becomes an `Error` token.

pub mod token;

pub use token::{Token, TokenKind};

use crate::text::{TextRange, TextSize};

/// A pre-tokenized stream over spec source text.
pub struct Scanner {
    tokens: Vec<Token>,
    pos: usize,
}

impl Scanner {
    /// Tokenize the whole source up front.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            tokens: scan(source),
            pos: 0,
        }
    }

    /// Peek at a token without consuming it.
    ///
    /// `n` is the lookahead distance (0 = next token). Peeking past the
    /// end yields the EOF token.
    #[must_use]
    pub fn peek(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Consume and return the next token. At the end of input this keeps
    /// returning the EOF token.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Check whether all that remains is EOF.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.peek(0).kind == TokenKind::Eof
    }
}

fn scan(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0usize;
    let mut line = 1u32;

    while pos < bytes.len() {
        let start = pos;
        match bytes[pos] {
            b' ' | b'\t' | b'\r' => pos += 1,
            b'\n' => {
                line += 1;
                pos += 1;
            }
            b'(' | b')' | b',' | b'.' | b'*' | b'|' | b'#' | b'_' => {
                let kind = punct_kind(bytes[pos]);
                pos += 1;
                tokens.push(make_token(kind, &source[start..pos], line, start));
            }
            b'"' => {
                let (token, new_pos, new_line) = scan_input_text(source, pos, line);
                tokens.push(token);
                pos = new_pos;
                line = new_line;
            }
            b if b.is_ascii_alphanumeric() => {
                let (token, new_pos) = scan_id_or_char(source, pos, line);
                tokens.push(token);
                pos = new_pos;
            }
            _ => {
                // Consume one whole char so we never split a UTF-8 sequence.
                let len = source[pos..].chars().next().map_or(1, char::len_utf8);
                pos += len;
                tokens.push(make_token(TokenKind::Error, &source[start..pos], line, start));
            }
        }
    }

    tokens.push(make_token(TokenKind::Eof, "", line, pos));
    tokens
}

const fn punct_kind(b: u8) -> TokenKind {
    match b {
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b',' => TokenKind::Comma,
        b'.' => TokenKind::Dot,
        b'*' => TokenKind::Star,
        b'|' => TokenKind::Or,
        b'#' => TokenKind::Hash,
        _ => TokenKind::Underscore,
    }
}

/// A letter starts an alphanumeric run: length one is `CHAR`, longer is
/// `ID`. A digit is always a single `CHAR`.
fn scan_id_or_char(source: &str, start: usize, line: u32) -> (Token, usize) {
    let bytes = source.as_bytes();
    let mut pos = start + 1;

    if bytes[start].is_ascii_alphabetic() {
        while pos < bytes.len() && bytes[pos].is_ascii_alphanumeric() {
            pos += 1;
        }
    }

    let kind = if pos - start == 1 {
        TokenKind::Char
    } else {
        TokenKind::Id
    };
    (make_token(kind, &source[start..pos], line, start), pos)
}

/// Scan a quoted input text starting at the opening quote. The lexeme
/// keeps both quotes. An unterminated quote yields an `Error` token
/// spanning the rest of the source.
fn scan_input_text(source: &str, start: usize, line: u32) -> (Token, usize, u32) {
    let bytes = source.as_bytes();
    match memchr::memchr(b'"', &bytes[start + 1..]) {
        Some(rel) => {
            let end = start + 1 + rel + 1;
            let newlines = memchr::memchr_iter(b'\n', &bytes[start..end]).count();
            let token = make_token(TokenKind::InputText, &source[start..end], line, start);
            (token, end, line + u32::try_from(newlines).unwrap_or(0))
        }
        None => {
            let token = make_token(TokenKind::Error, &source[start..], line, start);
            (token, bytes.len(), line)
        }
    }
}

fn make_token(kind: TokenKind, text: &str, line: u32, start: usize) -> Token {
    let range = TextRange::at(
        TextSize::from(u32::try_from(start).unwrap_or(0)),
        TextSize::from(u32::try_from(text.len()).unwrap_or(0)),
    );
    Token::new(kind, text, line, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = scanner.advance();
            let done = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if done {
                break;
            }
        }
        kinds
    }

    #[test]
    fn test_scan_punctuation() {
        assert_eq!(
            kinds("( ) , . * | # _"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Star,
                TokenKind::Or,
                TokenKind::Hash,
                TokenKind::Underscore,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_id_and_char() {
        let mut scanner = Scanner::new("tok1 a 7");
        let id = scanner.advance();
        assert_eq!(id.kind, TokenKind::Id);
        assert_eq!(id.text, "tok1");
        let ch = scanner.advance();
        assert_eq!(ch.kind, TokenKind::Char);
        assert_eq!(ch.text, "a");
        let digit = scanner.advance();
        assert_eq!(digit.kind, TokenKind::Char);
        assert_eq!(digit.text, "7");
    }

    #[test]
    fn test_digit_never_starts_an_id() {
        let mut scanner = Scanner::new("1a");
        let first = scanner.advance();
        assert_eq!(first.kind, TokenKind::Char);
        assert_eq!(first.text, "1");
        let second = scanner.advance();
        assert_eq!(second.kind, TokenKind::Char);
        assert_eq!(second.text, "a");
    }

    #[test]
    fn test_scan_input_text_keeps_quotes() {
        let mut scanner = Scanner::new("# \"a b c\"");
        assert_eq!(scanner.advance().kind, TokenKind::Hash);
        let text = scanner.advance();
        assert_eq!(text.kind, TokenKind::InputText);
        assert_eq!(text.text, "\"a b c\"");
    }

    #[test]
    fn test_unterminated_input_text_is_error() {
        let mut scanner = Scanner::new("\"abc");
        assert_eq!(scanner.advance().kind, TokenKind::Error);
    }

    #[test]
    fn test_line_tracking() {
        let mut scanner = Scanner::new("t1 a ,\nt2 b\n# \"a\"");
        assert_eq!(scanner.advance().line, 1); // t1
        scanner.advance(); // a
        scanner.advance(); // ,
        assert_eq!(scanner.advance().line, 2); // t2
        scanner.advance(); // b
        assert_eq!(scanner.advance().line, 3); // #
    }

    #[test]
    fn test_unknown_char_is_error() {
        assert_eq!(kinds("$"), vec![TokenKind::Error, TokenKind::Eof]);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = Scanner::new("t1 a");
        assert_eq!(scanner.peek(0).kind, TokenKind::Id);
        assert_eq!(scanner.peek(1).kind, TokenKind::Char);
        assert_eq!(scanner.peek(5).kind, TokenKind::Eof);
        assert_eq!(scanner.advance().kind, TokenKind::Id);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.advance().kind, TokenKind::Eof);
        assert_eq!(scanner.advance().kind, TokenKind::Eof);
        assert!(scanner.is_at_end());
    }
}
