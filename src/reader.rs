// ABOUTME: Consumes a token stream and builds the Cell-based AST

use crate::error::EvalError;
use crate::token::{Token, Tokenizer};
use crate::value::Value;

fn read_expr(tokenizer: &mut Tokenizer) -> Result<Value, EvalError> {
    match tokenizer.peek() {
        None => Err(EvalError::syntax("unexpected end of input")),
        Some(Token::Integer(n)) => {
            let n = *n;
            tokenizer.advance()?;
            Ok(Value::Number(n))
        }
        Some(Token::Boolean(b)) => {
            let b = *b;
            tokenizer.advance()?;
            Ok(Value::Boolean(b))
        }
        Some(Token::Symbol(s)) => {
            let s = s.clone();
            tokenizer.advance()?;
            Ok(Value::Symbol(s))
        }
        Some(Token::Quote) => {
            tokenizer.advance()?;
            let quoted = read_expr(tokenizer)?;
            Ok(Value::cons(
                Value::Symbol("quote".to_string()),
                Some(Value::cons(quoted, None)),
            ))
        }
        Some(Token::OpenParen) => {
            tokenizer.advance()?;
            read_list(tokenizer)
        }
        Some(Token::CloseParen) => Err(EvalError::syntax("unexpected )")),
        Some(Token::Dot) => Err(EvalError::syntax("unexpected .")),
    }
}

/// Reads the contents of a list after the opening `(` has been consumed.
fn read_list(tokenizer: &mut Tokenizer) -> Result<Value, EvalError> {
    match tokenizer.peek() {
        None => Err(EvalError::syntax("missing ) before end of input")),
        Some(Token::CloseParen) => {
            tokenizer.advance()?;
            Ok(Value::nil())
        }
        Some(Token::Dot) => Err(EvalError::syntax(". with no preceding list element")),
        _ => {
            let first = read_expr(tokenizer)?;
            match tokenizer.peek() {
                Some(Token::Dot) => {
                    tokenizer.advance()?;
                    let tail = read_expr(tokenizer)?;
                    match tokenizer.peek() {
                        Some(Token::CloseParen) => {
                            tokenizer.advance()?;
                            Ok(Value::cons(first, Some(tail)))
                        }
                        _ => Err(EvalError::syntax("expected ) after dotted tail")),
                    }
                }
                _ => {
                    let rest = read_list(tokenizer)?;
                    Ok(Value::cons(first, Some(rest)))
                }
            }
        }
    }
}

/// Parses exactly one expression from `tokenizer`, then requires that the
/// stream is exhausted; trailing tokens are a syntax error.
pub fn read(tokenizer: &mut Tokenizer) -> Result<Value, EvalError> {
    let expr = read_expr(tokenizer)?;
    if !tokenizer.at_end() {
        return Err(EvalError::syntax("trailing input after complete expression"));
    }
    Ok(expr)
}

/// Tokenizes and reads one complete expression from `source`.
pub fn parse(source: &str) -> Result<Value, EvalError> {
    let mut tokenizer = Tokenizer::new(source)?;
    read(&mut tokenizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_atoms() {
        assert!(matches!(parse("42").unwrap(), Value::Number(42)));
        assert!(matches!(parse("#t").unwrap(), Value::Boolean(true)));
        assert!(matches!(parse("foo").unwrap(), Value::Symbol(s) if s == "foo"));
    }

    #[test]
    fn reads_proper_list() {
        let value = parse("(+ 1 2)").unwrap();
        assert_eq!(value.to_string(), "(+ 1 2)");
    }

    #[test]
    fn reads_nested_list() {
        let value = parse("(1 (2 3) 4)").unwrap();
        assert_eq!(value.to_string(), "(1 (2 3) 4)");
    }

    #[test]
    fn reads_empty_list_as_nil() {
        let value = parse("()").unwrap();
        assert!(value.is_nil());
    }

    #[test]
    fn reads_dotted_pair() {
        let value = parse("(1 . 2)").unwrap();
        assert_eq!(value.to_string(), "(1 . 2)");
    }

    #[test]
    fn reads_improper_list_with_multiple_elements() {
        let value = parse("(1 2 . 3)").unwrap();
        assert_eq!(value.to_string(), "(1 2 . 3)");
    }

    #[test]
    fn desugars_quote_prefix() {
        let value = parse("'x").unwrap();
        assert_eq!(value.to_string(), "(quote x)");

        let list = parse("'(1 2)").unwrap();
        assert_eq!(list.to_string(), "(quote (1 2))");
    }

    #[test]
    fn missing_close_paren_is_syntax_error() {
        assert!(matches!(parse("(+ 1 2"), Err(EvalError::SyntaxError(_))));
    }

    #[test]
    fn trailing_tokens_are_syntax_error() {
        assert!(matches!(parse("1 2"), Err(EvalError::SyntaxError(_))));
    }

    #[test]
    fn orphan_dot_is_syntax_error() {
        assert!(matches!(parse("(. 1)"), Err(EvalError::SyntaxError(_))));
    }

    #[test]
    fn dot_without_closing_paren_is_syntax_error() {
        assert!(matches!(parse("(1 . 2 3)"), Err(EvalError::SyntaxError(_))));
    }
}
