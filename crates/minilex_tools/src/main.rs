//! Minilex CLI
//!
//! Tokenizes input text against a token specification, or renders the
//! compiled automata as DOT.

use clap::Parser;
use minilex::{Tokenizer, parse_spec};
use minilex_tools::cli::{Cli, Commands};
use minilex_tools::visualize::generate_dot;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize { input } => cmd_tokenize(input.as_deref()),
        Commands::Viz {
            input,
            rule,
            output,
        } => cmd_viz(input.as_deref(), rule.as_deref(), output.as_deref()),
    }
}

/// Read a specification from a file, or from stdin when no path is given.
fn read_source(input: Option<&Path>) -> std::io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn cmd_tokenize(input: Option<&Path>) -> ExitCode {
    let source = match read_source(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let spec = match parse_spec(&source) {
        Ok(spec) => spec,
        Err(err) => {
            // Diagnostics go to stdout alongside the lexeme stream.
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let tokenizer = match Tokenizer::new(&spec.rules) {
        Ok(tokenizer) => tokenizer,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for lexeme in tokenizer.lexemes(&spec.input) {
        match lexeme {
            Ok(lexeme) => println!("{lexeme}"),
            Err(err) => {
                println!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn cmd_viz(input: Option<&Path>, rule: Option<&str>, output: Option<&Path>) -> ExitCode {
    let source = match read_source(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let spec = match parse_spec(&source) {
        Ok(spec) => spec,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(name) = rule {
        if spec.rules.get(name).is_none() {
            eprintln!("error: no rule named {name}");
            return ExitCode::FAILURE;
        }
    }

    let dot = generate_dot(&spec.rules, rule);

    match output {
        Some(path) => {
            if let Err(err) = fs::write(path, dot) {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
            println!("Wrote visualization to {}", path.display());
        }
        None => print!("{dot}"),
    }

    ExitCode::SUCCESS
}
