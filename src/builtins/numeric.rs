//! Numeric operations: max, min, abs

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

pub fn builtin_max(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("max", "at least 1", 0));
    }
    let numbers = as_numbers("max", args)?;
    Ok(Value::Number(numbers.into_iter().max().unwrap()))
}

pub fn builtin_min(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("min", "at least 1", 0));
    }
    let numbers = as_numbers("min", args)?;
    Ok(Value::Number(numbers.into_iter().min().unwrap()))
}

pub fn builtin_abs(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [value] => {
            let n = as_numbers("abs", std::slice::from_ref(value))?[0];
            Ok(Value::Number(n.abs()))
        }
        _ => Err(EvalError::arity("abs", "exactly 1", args.len())),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "max".to_string(),
        Value::Callable(Callable::Primitive { name: "max", func: builtin_max }),
    );
    env.define(
        "min".to_string(),
        Value::Callable(Callable::Primitive { name: "min", func: builtin_min }),
    );
    env.define(
        "abs".to_string(),
        Value::Callable(Callable::Primitive { name: "abs", func: builtin_abs }),
    );
}
