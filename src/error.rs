// ABOUTME: Error types for the tokenizer, reader, and evaluator

use thiserror::Error;

/// The three error kinds a caller of `evaluate` can distinguish between.
///
/// Each variant carries a human-readable message; the exact text is not
/// part of the contract, only the variant (and therefore the kind).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Malformed token sequence or ill-formed list structure: missing `)`,
    /// an orphan `.`, trailing tokens after a complete expression, or the
    /// wrong shape for a special form.
    #[error("SyntaxError: {0}")]
    SyntaxError(String),

    /// A symbol lookup failed anywhere in the environment chain, or `set!`
    /// was applied to a name that was never `define`d.
    #[error("NameError: {0}")]
    NameError(String),

    /// A type violation, an arity mismatch caught during evaluation,
    /// division by zero, or an out-of-range list index.
    #[error("RuntimeError: {0}")]
    RuntimeError(String),
}

impl EvalError {
    pub fn syntax(message: impl Into<String>) -> Self {
        EvalError::SyntaxError(message.into())
    }

    pub fn name(message: impl Into<String>) -> Self {
        EvalError::NameError(message.into())
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        EvalError::RuntimeError(message.into())
    }

    /// Builds a `RuntimeError` describing an arity mismatch for `function`.
    pub fn arity(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::RuntimeError(format!(
            "{function}: expected {} argument(s), got {actual}",
            expected.into()
        ))
    }

    /// Builds a `RuntimeError` describing a type mismatch for `function`.
    pub fn type_mismatch(function: &str, expected: &str, actual: &str) -> Self {
        EvalError::RuntimeError(format!("{function}: expected {expected}, got {actual}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_prefix() {
        assert_eq!(
            EvalError::syntax("missing )").to_string(),
            "SyntaxError: missing )"
        );
        assert_eq!(
            EvalError::name("undefined-name").to_string(),
            "NameError: undefined-name"
        );
        assert_eq!(
            EvalError::runtime("division by zero").to_string(),
            "RuntimeError: division by zero"
        );
    }

    #[test]
    fn arity_helper_formats_function_and_counts() {
        let err = EvalError::arity("abs", "1", 2);
        assert!(matches!(err, EvalError::RuntimeError(_)));
        assert!(err.to_string().contains("abs"));
    }
}
