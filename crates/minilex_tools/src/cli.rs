//! CLI interface for minilex-tools

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minilex")]
#[command(about = "Compile token specifications and tokenize their input text")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a spec and tokenize its quoted input text
    Tokenize {
        /// Spec file (reads stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Emit compiled rule automata as Graphviz DOT
    Viz {
        /// Spec file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Only visualize this rule (default: every rule)
        #[arg(short, long)]
        rule: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
