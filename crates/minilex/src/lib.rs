//! # Minilex
//!
//! A miniature lexical-analyzer generator: a regex compiler feeding a
//! greedy longest-match scanner.
//!
//! ## Overview
//!
//! A specification declares named tokens, each paired with a regular
//! expression in a small prefix/infix grammar, followed by a quoted
//! input text:
//!
//! ```text
//! t1 (a)|(b) , t2 (a).((a)*) # "abaa a"
//! ```
//!
//! Minilex compiles each expression into an automaton (Thompson-style
//! graph construction over a shared node arena), then tokenizes the
//! input by simulating the automata over sets of states, preferring the
//! longest match and breaking ties in favor of the earliest-declared
//! rule.
//!
//! ## Quick Start
//!
//! ```rust
//! use minilex::{Tokenizer, parse_spec};
//!
//! let spec = parse_spec("num (1)|(2) , op p # \"12p 2\"")?;
//! let tokenizer = Tokenizer::new(&spec.rules)?;
//!
//! let lines: Vec<String> = tokenizer
//!     .tokenize(&spec.input)?
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! assert_eq!(
//!     lines,
//!     vec![r#"num , "1""#, r#"num , "2""#, r#"op , "p""#, r#"num , "2""#],
//! );
//! # Ok::<(), minilex::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Spec-parsing errors are [`SpecError`]: syntax errors are fatal and
//! immediate, duplicate token declarations are batched. Scanning errors
//! are [`TokenizeError`]: an empty-accepting rule is rejected in a
//! pre-pass, and a position where no rule matches abandons the whole
//! remaining run. See [`error`] for details.
//!
//! ## Modules
//!
//! - [`scanner`] - Character-level scanner for spec source text
//! - [`parser`] - Spec parser and regex compiler
//! - [`nfa`] - Automaton fragments, node arena, state-set simulation
//! - [`tokenizer`] - Longest-match tokenization driver
//! - [`error`] - Error types

pub mod error;
pub mod nfa;
pub mod parser;
pub mod scanner;
pub mod text;
pub mod tokenizer;

// Re-export commonly used types
pub use error::{DuplicateDecl, Error, SpecError, TokenizeError};
pub use nfa::sim::{StateSet, accepts_empty, closure, match_len, step};
pub use nfa::{Fragment, Label, NfaArena, NodeId};
pub use parser::{CompiledSpec, Rule, RuleSet, parse_spec};
pub use scanner::Scanner;
pub use text::{TextRange, TextSize};
pub use tokenizer::{Lexeme, Lexemes, Tokenizer};
