// ABOUTME: Thin CLI driver: one expression in, one printed result or error out

mod builtins;
mod env;
mod error;
mod eval;
mod interpreter;
mod reader;
mod token;
mod value;

use clap::Parser;
use interpreter::Interpreter;
use std::io::{self, Read};
use std::process::ExitCode;

/// Evaluates a single Scheme-like expression.
#[derive(Parser, Debug)]
#[command(name = "lisp-interpreter")]
#[command(version)]
#[command(about = "A small Scheme-flavored Lisp interpreter")]
struct CliArgs {
    /// The expression to evaluate. Read from standard input if omitted.
    expression: Option<String>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let source = match args.expression {
        Some(expression) => expression,
        None => {
            let mut buffer = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error: failed to read standard input: {err}");
                return ExitCode::FAILURE;
            }
            buffer
        }
    };

    match Interpreter::new().evaluate(&source) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
