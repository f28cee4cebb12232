//! Type predicates: number?, boolean?, symbol?, pair?, null?, list?

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Callable, Value};
use std::rc::Rc;

fn one_arg<'a>(function: &str, args: &'a [Value]) -> Result<&'a Value, EvalError> {
    match args {
        [value] => Ok(value),
        _ => Err(EvalError::arity(function, "exactly 1", args.len())),
    }
}

pub fn builtin_number_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(one_arg("number?", args)?, Value::Number(_))))
}

pub fn builtin_boolean_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(one_arg("boolean?", args)?, Value::Boolean(_))))
}

pub fn builtin_symbol_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(one_arg("symbol?", args)?, Value::Symbol(_))))
}

pub fn builtin_pair_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Boolean(matches!(one_arg("pair?", args)?, Value::Pair(_))))
}

pub fn builtin_null_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Boolean(one_arg("null?", args)?.is_nil()))
}

pub fn builtin_list_p(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Boolean(one_arg("list?", args)?.is_list()))
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "number?".to_string(),
        Value::Callable(Callable::Primitive { name: "number?", func: builtin_number_p }),
    );
    env.define(
        "boolean?".to_string(),
        Value::Callable(Callable::Primitive { name: "boolean?", func: builtin_boolean_p }),
    );
    env.define(
        "symbol?".to_string(),
        Value::Callable(Callable::Primitive { name: "symbol?", func: builtin_symbol_p }),
    );
    env.define(
        "pair?".to_string(),
        Value::Callable(Callable::Primitive { name: "pair?", func: builtin_pair_p }),
    );
    env.define(
        "null?".to_string(),
        Value::Callable(Callable::Primitive { name: "null?", func: builtin_null_p }),
    );
    env.define(
        "list?".to_string(),
        Value::Callable(Callable::Primitive { name: "list?", func: builtin_list_p }),
    );
}
