// ABOUTME: Top-level interpreter pipeline -- tokenize, read, evaluate, print

use crate::builtins::register_builtins;
use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::{eval, DEFAULT_RECURSION_LIMIT};
use crate::reader::parse;
use std::rc::Rc;

/// A persistent interpreter session: one global environment, reused across
/// every call to `evaluate`. Bindings created by one expression (`define`,
/// `set!`) are visible to the next.
pub struct Interpreter {
    env: Rc<Environment>,
    recursion_limit: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        let env = Environment::new();
        register_builtins(&env);
        Interpreter { env, recursion_limit: DEFAULT_RECURSION_LIMIT }
    }

    /// Builds an interpreter whose nested closure calls are capped at
    /// `limit` rather than [`DEFAULT_RECURSION_LIMIT`]. The limit is held on
    /// this instance and threaded through every `evaluate` call; it has no
    /// effect on other `Interpreter`s.
    pub fn with_recursion_limit(limit: usize) -> Self {
        Interpreter { recursion_limit: limit, ..Self::new() }
    }

    /// Reads and evaluates exactly one expression from `source`, returning
    /// its printed representation.
    pub fn evaluate(&self, source: &str) -> Result<String, EvalError> {
        let expr = parse(source)?;
        let result = eval(&expr, &self.env, self.recursion_limit)?;
        Ok(result.to_string())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates a single expression against a fresh environment. Convenience
/// wrapper around [`Interpreter`] for one-shot use.
pub fn evaluate(source: &str) -> Result<String, EvalError> {
    Interpreter::new().evaluate(source)
}
