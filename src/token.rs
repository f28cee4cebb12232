// ABOUTME: Streams a character source into a lazy sequence of tokens

use crate::error::EvalError;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, multispace0},
    combinator::{map, map_res, value},
    IResult,
};

/// A lexical token. Only the current one is ever buffered by `Tokenizer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Integer(i64),
    Symbol(String),
    Boolean(bool),
    OpenParen,
    CloseParen,
    Dot,
    Quote,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')' || c == '.' || c == '\''
}

fn lex_integer(input: &str) -> IResult<&str, Token> {
    map_res(digit1, |s: &str| s.parse::<i64>().map(Token::Integer))(input)
}

/// Any visible character that is not a digit or a delimiter starts a symbol;
/// the lexeme runs until the next whitespace, paren, dot, quote, or digit.
/// Only once the whole lexeme has accumulated is it compared against `#t`
/// and `#f`, so `#true` or `#foo` read as a single symbol rather than a
/// boolean followed by a spurious trailing symbol.
fn lex_symbol(input: &str) -> IResult<&str, Token> {
    map(
        take_while1(|c: char| !is_delimiter(c) && !c.is_ascii_digit()),
        |s: &str| match s {
            "#t" => Token::Boolean(true),
            "#f" => Token::Boolean(false),
            _ => Token::Symbol(s.to_string()),
        },
    )(input)
}

fn lex_token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Quote, char('\'')),
        value(Token::Dot, char('.')),
        value(Token::OpenParen, char('(')),
        value(Token::CloseParen, char(')')),
        lex_integer,
        lex_symbol,
    ))(input)
}

/// Skips leading whitespace and lexes the next token, if any remains.
fn next_token(input: &str) -> Result<Option<(Token, &str)>, EvalError> {
    let (input, _) = multispace0::<_, nom::error::Error<&str>>(input)
        .map_err(|_| EvalError::syntax("tokenizer failed to skip whitespace"))?;
    if input.is_empty() {
        return Ok(None);
    }
    match lex_token(input) {
        Ok((rest, token)) => Ok(Some((token, rest))),
        Err(_) => {
            let snippet: String = input.chars().take(16).collect();
            Err(EvalError::syntax(format!(
                "unrecognized token near '{snippet}'"
            )))
        }
    }
}

/// A lazy token stream over a source slice. Construction loads the first
/// token (if any); `advance` consumes the current one and loads the next.
pub struct Tokenizer<'a> {
    rest: &'a str,
    current: Option<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Result<Self, EvalError> {
        let mut tokenizer = Tokenizer {
            rest: input,
            current: None,
        };
        tokenizer.advance()?;
        Ok(tokenizer)
    }

    /// The current token, or `None` once the stream is exhausted.
    pub fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Consumes the current token and loads the next one.
    pub fn advance(&mut self) -> Result<(), EvalError> {
        match next_token(self.rest)? {
            Some((token, rest)) => {
                self.rest = rest;
                self.current = Some(token);
            }
            None => self.current = None,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &str) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(source).unwrap();
        let mut tokens = Vec::new();
        while let Some(token) = tokenizer.peek() {
            tokens.push(token.clone());
            tokenizer.advance().unwrap();
        }
        tokens
    }

    #[test]
    fn empty_input_is_immediately_at_end() {
        let tokenizer = Tokenizer::new("   ").unwrap();
        assert!(tokenizer.at_end());
    }

    #[test]
    fn lexes_parens_dot_and_quote() {
        assert_eq!(
            collect("(. ')"),
            vec![Token::OpenParen, Token::Dot, Token::Quote, Token::CloseParen]
        );
    }

    #[test]
    fn lexes_integers() {
        assert_eq!(collect("0 42 007"), vec![
            Token::Integer(0),
            Token::Integer(42),
            Token::Integer(7),
        ]);
    }

    #[test]
    fn lexes_booleans_before_symbols() {
        assert_eq!(collect("#t #f"), vec![Token::Boolean(true), Token::Boolean(false)]);
    }

    #[test]
    fn lexes_symbols_stopping_at_delimiters() {
        assert_eq!(
            collect("foo bar-baz +"),
            vec![
                Token::Symbol("foo".to_string()),
                Token::Symbol("bar-baz".to_string()),
                Token::Symbol("+".to_string()),
            ]
        );
    }

    #[test]
    fn full_expression_tokenizes_in_order() {
        assert_eq!(
            collect("(+ 1 2)"),
            vec![
                Token::OpenParen,
                Token::Symbol("+".to_string()),
                Token::Integer(1),
                Token::Integer(2),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn overflowing_integer_literal_is_a_syntax_error() {
        assert!(next_token("99999999999999999999999999").is_err());
    }

    #[test]
    fn boolean_prefixed_symbols_stay_whole_symbols() {
        assert_eq!(collect("#foo #true #test"), vec![
            Token::Symbol("#foo".to_string()),
            Token::Symbol("#true".to_string()),
            Token::Symbol("#test".to_string()),
        ]);
    }
}
