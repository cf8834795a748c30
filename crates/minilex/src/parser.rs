//! # Spec Parser
//!
//! Recursive descent over the specification syntax, compiling each
//! declared token's expression into an automaton fragment as it goes:
//!
//! ```text
//! input          -> token_list HASH INPUT_TEXT EOF
//! token_list     -> token | token COMMA token_list
//! token          -> ID expr
//! expr           -> CHAR | UNDERSCORE
//!                |  ( expr ) . ( expr )
//!                |  ( expr ) | ( expr )
//!                |  ( expr ) *
//! ```
//!
//! Error policy: a malformed outer structure or a malformed expression is
//! fatal immediately (the latter names the owning token). Duplicate token
//! declarations are accumulated across the whole list and reported
//! together after EOF, before any tokenization can start.

use crate::error::{DuplicateDecl, SpecError};
use crate::nfa::{Fragment, NfaArena};
use crate::scanner::{Scanner, Token, TokenKind};
use compact_str::CompactString;
use hashbrown::HashMap;
use log::debug;

/// A declared token: its name paired with its compiled automaton.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: CompactString,
    /// Line of the declaration, for diagnostics
    pub line: u32,
    pub fragment: Fragment,
}

/// All declared rules in declaration order, plus the arena that owns
/// every node of every rule's automaton.
///
/// Declaration order matters: it is the tie-break during tokenization.
#[derive(Debug)]
pub struct RuleSet {
    arena: NfaArena,
    rules: Vec<Rule>,
}

impl RuleSet {
    #[must_use]
    pub fn arena(&self) -> &NfaArena {
        &self.arena
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// A fully parsed specification: the compiled rules and the input text
/// to tokenize (quotes stripped, one surrounding space per side trimmed).
#[derive(Debug)]
pub struct CompiledSpec {
    pub rules: RuleSet,
    pub input: String,
}

/// Parse a specification source text.
///
/// # Errors
///
/// Returns [`SpecError::Syntax`] on malformed outer structure,
/// [`SpecError::ExprSyntax`] on a malformed token expression, and
/// [`SpecError::Duplicates`] when token names are declared twice.
pub fn parse_spec(source: &str) -> Result<CompiledSpec, SpecError> {
    SpecParser::new(source).parse()
}

struct SpecParser {
    scanner: Scanner,
    arena: NfaArena,
    rules: Vec<Rule>,
    duplicates: Vec<DuplicateDecl>,
    declared: HashMap<CompactString, u32, ahash::RandomState>,
}

impl SpecParser {
    fn new(source: &str) -> Self {
        Self {
            scanner: Scanner::new(source),
            arena: NfaArena::new(),
            rules: Vec::new(),
            duplicates: Vec::new(),
            declared: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    fn parse(mut self) -> Result<CompiledSpec, SpecError> {
        self.parse_token_list()?;
        self.expect(TokenKind::Hash)?;
        let text = self.expect(TokenKind::InputText)?;
        self.expect(TokenKind::Eof)?;

        if !self.duplicates.is_empty() {
            return Err(SpecError::Duplicates {
                duplicates: self.duplicates,
            });
        }

        debug!(
            "compiled {} rules into {} nfa nodes",
            self.rules.len(),
            self.arena.len()
        );

        Ok(CompiledSpec {
            rules: RuleSet {
                arena: self.arena,
                rules: self.rules,
            },
            input: trim_input_text(&text.text),
        })
    }

    fn parse_token_list(&mut self) -> Result<(), SpecError> {
        loop {
            self.parse_token()?;
            match self.scanner.peek(0).kind {
                TokenKind::Comma => {
                    self.scanner.advance();
                }
                TokenKind::Hash => return Ok(()),
                _ => return Err(self.syntax_error()),
            }
        }
    }

    fn parse_token(&mut self) -> Result<(), SpecError> {
        let id = self.expect(TokenKind::Id)?;
        let fragment = self.parse_expr(&id)?;

        match self.declared.get(id.text.as_str()).copied() {
            Some(first_line) => self.duplicates.push(DuplicateDecl {
                name: id.text,
                first_line,
                line: id.line,
            }),
            None => {
                self.declared.insert(id.text.clone(), id.line);
                self.rules.push(Rule {
                    name: id.text,
                    line: id.line,
                    fragment,
                });
            }
        }
        Ok(())
    }

    fn parse_expr(&mut self, owner: &Token) -> Result<Fragment, SpecError> {
        match self.scanner.peek(0).kind {
            TokenKind::Char => {
                let ch = self.expect_expr(TokenKind::Char, owner)?;
                let c = ch.text.chars().next().unwrap_or('\0');
                Ok(self.arena.literal(c))
            }
            TokenKind::Underscore => {
                self.expect_expr(TokenKind::Underscore, owner)?;
                Ok(self.arena.epsilon_fragment())
            }
            TokenKind::LParen => {
                self.expect_expr(TokenKind::LParen, owner)?;
                let left = self.parse_expr(owner)?;
                self.expect_expr(TokenKind::RParen, owner)?;

                match self.scanner.peek(0).kind {
                    TokenKind::Dot => {
                        self.expect_expr(TokenKind::Dot, owner)?;
                        self.expect_expr(TokenKind::LParen, owner)?;
                        let right = self.parse_expr(owner)?;
                        self.expect_expr(TokenKind::RParen, owner)?;
                        Ok(self.arena.concat(left, right))
                    }
                    TokenKind::Or => {
                        self.expect_expr(TokenKind::Or, owner)?;
                        self.expect_expr(TokenKind::LParen, owner)?;
                        let right = self.parse_expr(owner)?;
                        self.expect_expr(TokenKind::RParen, owner)?;
                        Ok(self.arena.alternate(left, right))
                    }
                    TokenKind::Star => {
                        self.expect_expr(TokenKind::Star, owner)?;
                        Ok(self.arena.star(left))
                    }
                    _ => Err(self.expr_syntax_error(owner)),
                }
            }
            _ => Err(self.expr_syntax_error(owner)),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, SpecError> {
        if self.scanner.peek(0).kind == kind {
            Ok(self.scanner.advance())
        } else {
            Err(self.syntax_error())
        }
    }

    fn expect_expr(&mut self, kind: TokenKind, owner: &Token) -> Result<Token, SpecError> {
        if self.scanner.peek(0).kind == kind {
            Ok(self.scanner.advance())
        } else {
            Err(self.expr_syntax_error(owner))
        }
    }

    fn syntax_error(&self) -> SpecError {
        SpecError::Syntax {
            span: self.scanner.peek(0).range,
        }
    }

    fn expr_syntax_error(&self, owner: &Token) -> SpecError {
        SpecError::ExprSyntax {
            token_name: owner.text.clone(),
            span: self.scanner.peek(0).range,
        }
    }
}

/// Strip the surrounding quotes, then at most one leading and one
/// trailing space.
fn trim_input_text(lexeme: &str) -> String {
    let inner = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);
    let inner = inner.strip_prefix(' ').unwrap_or(inner);
    let inner = inner.strip_suffix(' ').unwrap_or(inner);
    inner.to_string()
}
