//! Logical operations: not, and, or
//!
//! `not` is an ordinary primitive. `and` and `or` are special forms so they
//! can short-circuit: each walks its raw argument chain and evaluates one
//! operand at a time, stopping as soon as the result is determined.

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::{Callable, Value};
use std::rc::Rc;

pub fn builtin_not(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [value] => Ok(Value::Boolean(matches!(value, Value::Boolean(false)))),
        _ => Err(EvalError::arity("not", "exactly 1", args.len())),
    }
}

pub fn and_form(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let mut cursor = args.clone();
    let mut result = Value::Boolean(true);
    loop {
        match cursor {
            Value::Cell(None) => return Ok(result),
            Value::Cell(Some(node)) => {
                result = eval(&node.first, env, limit)?;
                if !result.is_truthy() {
                    return Ok(result);
                }
                cursor = node.second.clone().unwrap_or_else(Value::nil);
            }
            other => return Err(EvalError::syntax(format!("and: improper form: {other}"))),
        }
    }
}

pub fn or_form(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let mut cursor = args.clone();
    loop {
        match cursor {
            Value::Cell(None) => return Ok(Value::Boolean(false)),
            Value::Cell(Some(node)) => {
                let result = eval(&node.first, env, limit)?;
                if result.is_truthy() {
                    return Ok(result);
                }
                cursor = node.second.clone().unwrap_or_else(Value::nil);
            }
            other => return Err(EvalError::syntax(format!("or: improper form: {other}"))),
        }
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "not".to_string(),
        Value::Callable(Callable::Primitive { name: "not", func: builtin_not }),
    );
    env.define(
        "and".to_string(),
        Value::Callable(Callable::SpecialForm { name: "and", func: and_form }),
    );
    env.define(
        "or".to_string(),
        Value::Callable(Callable::SpecialForm { name: "or", func: or_form }),
    );
}
