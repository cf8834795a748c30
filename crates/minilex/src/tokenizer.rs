//! # Tokenization Driver
//!
//! Greedy longest-match scanning of the input text against the compiled
//! rules.
//!
//! The input is split on whitespace; tokens never span a word boundary.
//! Within a word, every rule is evaluated at the cursor in declaration
//! order and the longest match wins; ties favor the earliest-declared
//! rule. When no rule matches even one character, the whole remaining
//! run is abandoned.
//!
//! Construction runs the epsilon-acceptance guard: a rule whose pattern
//! accepts the empty string would match everywhere with zero width, so
//! [`Tokenizer::new`] rejects such rule sets before any output can be
//! produced.

use crate::error::TokenizeError;
use crate::nfa::sim::{accepts_empty, match_len};
use crate::parser::RuleSet;
use compact_str::CompactString;
use log::trace;
use std::fmt;
use std::str::SplitWhitespace;

/// One matched token: the winning rule's name and the matched text.
///
/// Displays in the output line format: `name , "lexeme"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub name: CompactString,
    pub text: CompactString,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} , \"{}\"", self.name, self.text)
    }
}

/// The longest-match scanner over a compiled rule set.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    rules: &'a RuleSet,
}

impl<'a> Tokenizer<'a> {
    /// Build a tokenizer, running the epsilon-acceptance guard.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::EpsilonRule`] naming every rule whose
    /// pattern accepts the empty string, in declaration order.
    pub fn new(rules: &'a RuleSet) -> Result<Self, TokenizeError> {
        let offenders: Vec<CompactString> = rules
            .rules()
            .iter()
            .filter(|rule| accepts_empty(rules.arena(), rule.fragment))
            .map(|rule| rule.name.clone())
            .collect();

        if offenders.is_empty() {
            Ok(Self { rules })
        } else {
            Err(TokenizeError::EpsilonRule { names: offenders })
        }
    }

    /// Lazily scan `input`, yielding lexemes in order.
    ///
    /// The stream fuses after yielding a [`TokenizeError::NoMatch`]:
    /// lexemes already yielded stand, the rest of the input is abandoned.
    #[must_use]
    pub fn lexemes<'i>(&self, input: &'i str) -> Lexemes<'a, 'i> {
        Lexemes {
            rules: self.rules,
            words: input.split_whitespace(),
            word: "",
            cursor: 0,
            failed: false,
        }
    }

    /// Scan the whole input eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first [`TokenizeError`]; use [`Self::lexemes`] when
    /// the lexemes matched before the failure are still wanted.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Lexeme>, TokenizeError> {
        self.lexemes(input).collect()
    }
}

/// Iterator over matched lexemes. See [`Tokenizer::lexemes`].
pub struct Lexemes<'a, 'i> {
    rules: &'a RuleSet,
    words: SplitWhitespace<'i>,
    word: &'i str,
    cursor: usize,
    failed: bool,
}

impl Iterator for Lexemes<'_, '_> {
    type Item = Result<Lexeme, TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while self.cursor >= self.word.len() {
            self.word = self.words.next()?;
            self.cursor = 0;
        }

        let rules = self.rules;
        let arena = rules.arena();
        let mut best = 0usize;
        let mut winner = None;
        for rule in rules.rules() {
            let len = match_len(arena, rule.fragment, self.word, self.cursor);
            if len > best {
                best = len;
                winner = Some(rule);
            }
        }

        match winner {
            Some(rule) => {
                let text = &self.word[self.cursor..self.cursor + best];
                trace!("matched {} as {} at {}", text, rule.name, self.cursor);
                self.cursor += best;
                Some(Ok(Lexeme {
                    name: rule.name.clone(),
                    text: CompactString::from(text),
                }))
            }
            None => {
                self.failed = true;
                Some(Err(TokenizeError::NoMatch {
                    word: CompactString::from(self.word),
                    offset: self.cursor,
                }))
            }
        }
    }
}
