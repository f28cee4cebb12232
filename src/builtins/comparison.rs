//! Comparison operations: =, <, <=, >, >=
//!
//! Each is a chained relation: true iff it holds between every adjacent
//! pair of arguments. Zero-ary and unary applications return `#t`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Callable, Value};
use std::rc::Rc;

fn as_numbers(function: &str, args: &[Value]) -> Result<Vec<i64>, EvalError> {
    args.iter()
        .map(|arg| match arg {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::type_mismatch(function, "number", other.type_name())),
        })
        .collect()
}

fn chained(function: &str, args: &[Value], relation: impl Fn(i64, i64) -> bool) -> Result<Value, EvalError> {
    let numbers = as_numbers(function, args)?;
    let holds = numbers.windows(2).all(|pair| relation(pair[0], pair[1]));
    Ok(Value::Boolean(holds))
}

pub fn builtin_eq(args: &[Value]) -> Result<Value, EvalError> {
    chained("=", args, |a, b| a == b)
}

pub fn builtin_lt(args: &[Value]) -> Result<Value, EvalError> {
    chained("<", args, |a, b| a < b)
}

pub fn builtin_le(args: &[Value]) -> Result<Value, EvalError> {
    chained("<=", args, |a, b| a <= b)
}

pub fn builtin_gt(args: &[Value]) -> Result<Value, EvalError> {
    chained(">", args, |a, b| a > b)
}

pub fn builtin_ge(args: &[Value]) -> Result<Value, EvalError> {
    chained(">=", args, |a, b| a >= b)
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "=".to_string(),
        Value::Callable(Callable::Primitive { name: "=", func: builtin_eq }),
    );
    env.define(
        "<".to_string(),
        Value::Callable(Callable::Primitive { name: "<", func: builtin_lt }),
    );
    env.define(
        "<=".to_string(),
        Value::Callable(Callable::Primitive { name: "<=", func: builtin_le }),
    );
    env.define(
        ">".to_string(),
        Value::Callable(Callable::Primitive { name: ">", func: builtin_gt }),
    );
    env.define(
        ">=".to_string(),
        Value::Callable(Callable::Primitive { name: ">=", func: builtin_ge }),
    );
}
