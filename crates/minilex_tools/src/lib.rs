//! Minilex Tools - command-line utilities for the minilex generator
//!
//! This crate provides the `minilex` binary: run token specs end to end,
//! or visualize compiled rule automata.

pub mod cli;
pub mod visualize;

pub use visualize::*;
