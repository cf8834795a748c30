//! # Error Types
//!
//! Error types for spec compilation and tokenization.
//!
//! Two phases, two error enums:
//!
//! - [`SpecError`]: errors while parsing the token specification. Syntax
//!   errors (general and per-expression) are fatal and immediate; duplicate
//!   token declarations are accumulated over the whole token list and
//!   reported in one batch.
//! - [`TokenizeError`]: errors while scanning the quoted input text. The
//!   epsilon-acceptance violation is detected in a pre-pass before any
//!   output is produced; a no-match halts the run but leaves previously
//!   matched lexemes intact.
//!
//! When the `diagnostics` feature is enabled, errors derive
//! [`miette::Diagnostic`] for rich reporting with source spans.

use crate::text::TextRange;
use compact_str::CompactString;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// One duplicate token declaration, referencing both declaration sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateDecl {
    /// The token name declared more than once
    pub name: CompactString,
    /// Line of the original declaration
    pub first_line: u32,
    /// Line of the repeat declaration
    pub line: u32,
}

impl fmt::Display for DuplicateDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {}: {} already declared on line {}",
            self.line, self.name, self.first_line
        )
    }
}

/// Errors raised while parsing a token specification
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum SpecError {
    /// Malformed outer spec structure; fatal and immediate.
    #[error("SYNTAX ERROR")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(minilex::syntax)))]
    Syntax {
        #[cfg_attr(feature = "diagnostics", label("Unexpected here"))]
        span: TextRange,
    },

    /// Malformed regular expression for a specific token; fatal and
    /// immediate, never batched with semantic errors.
    #[error("SYNTAX ERROR IN EXPRESSION OF {token_name}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(minilex::expr_syntax)))]
    ExprSyntax {
        token_name: CompactString,
        #[cfg_attr(feature = "diagnostics", label("In this expression"))]
        span: TextRange,
    },

    /// Duplicate token declarations, one entry per repeat occurrence,
    /// collected across the whole token list.
    #[error("{}", format_duplicates(duplicates))]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(minilex::duplicate_token)))]
    Duplicates { duplicates: Vec<DuplicateDecl> },
}

/// Errors raised while tokenizing the quoted input text
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum TokenizeError {
    /// One or more rules accept the empty string, which would match
    /// everywhere with zero width. Offenders in declaration order.
    #[error("EPSILON IS NOT A TOKEN{}", format_names(names))]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(minilex::epsilon_rule)))]
    EpsilonRule { names: Vec<CompactString> },

    /// No rule matched even one character at this word position. The
    /// whole remaining run is abandoned.
    #[error("ERROR")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(minilex::no_match)))]
    NoMatch { word: CompactString, offset: usize },
}

/// Any error the pipeline can produce
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum Error {
    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(transparent))]
    Spec(#[from] SpecError),

    #[error(transparent)]
    #[cfg_attr(feature = "diagnostics", diagnostic(transparent))]
    Tokenize(#[from] TokenizeError),
}

fn format_duplicates(duplicates: &[DuplicateDecl]) -> String {
    let lines: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
    lines.join("\n")
}

fn format_names(names: &[CompactString]) -> String {
    let mut out = String::new();
    for name in names {
        out.push(' ');
        out.push_str(name);
    }
    out
}

impl SpecError {
    /// Get the span of this error, when it has one
    #[must_use]
    pub const fn span(&self) -> Option<TextRange> {
        match self {
            Self::Syntax { span } | Self::ExprSyntax { span, .. } => Some(*span),
            Self::Duplicates { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextSize;

    #[test]
    fn test_syntax_error_message() {
        let error = SpecError::Syntax {
            span: TextRange::at(TextSize::from(3), TextSize::from(1)),
        };
        assert_eq!(format!("{error}"), "SYNTAX ERROR");
    }

    #[test]
    fn test_expr_syntax_error_names_token() {
        let error = SpecError::ExprSyntax {
            token_name: "tok1".into(),
            span: TextRange::at(TextSize::from(0), TextSize::from(1)),
        };
        assert_eq!(format!("{error}"), "SYNTAX ERROR IN EXPRESSION OF tok1");
    }

    #[test]
    fn test_duplicate_decl_message() {
        let dup = DuplicateDecl {
            name: "t1".into(),
            first_line: 1,
            line: 3,
        };
        assert_eq!(format!("{dup}"), "Line 3: t1 already declared on line 1");
    }

    #[test]
    fn test_duplicates_batched_one_per_line() {
        let error = SpecError::Duplicates {
            duplicates: vec![
                DuplicateDecl {
                    name: "t1".into(),
                    first_line: 1,
                    line: 2,
                },
                DuplicateDecl {
                    name: "t2".into(),
                    first_line: 1,
                    line: 3,
                },
            ],
        };
        assert_eq!(
            format!("{error}"),
            "Line 2: t1 already declared on line 1\nLine 3: t2 already declared on line 1"
        );
    }

    #[test]
    fn test_epsilon_rule_message() {
        let error = TokenizeError::EpsilonRule {
            names: vec!["t1".into(), "t3".into()],
        };
        assert_eq!(format!("{error}"), "EPSILON IS NOT A TOKEN t1 t3");
    }

    #[test]
    fn test_no_match_message_is_error_marker() {
        let error = TokenizeError::NoMatch {
            word: "xyz".into(),
            offset: 0,
        };
        assert_eq!(format!("{error}"), "ERROR");
    }

    #[test]
    fn test_error_wraps_both_phases() {
        let spec: Error = SpecError::Syntax {
            span: TextRange::at(TextSize::zero(), TextSize::from(1)),
        }
        .into();
        assert_eq!(format!("{spec}"), "SYNTAX ERROR");

        let tok: Error = TokenizeError::NoMatch {
            word: "w".into(),
            offset: 0,
        }
        .into();
        assert_eq!(format!("{tok}"), "ERROR");
    }
}
