//! List operations: cons, car, cdr, set-car!, set-cdr!, list, list-ref, list-tail

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::{Callable, Value};
use std::cell::Cell as IntCell;
use std::rc::Rc;

fn as_number(function: &str, value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_mismatch(function, "number", other.type_name())),
    }
}

fn as_pair<'a>(function: &str, value: &'a Value) -> Result<&'a Rc<IntCell<(i64, i64)>>, EvalError> {
    match value {
        Value::Pair(p) => Ok(p),
        other => Err(EvalError::type_mismatch(function, "pair", other.type_name())),
    }
}

fn as_index(function: &str, value: &Value) -> Result<usize, EvalError> {
    let n = as_number(function, value)?;
    usize::try_from(n).map_err(|_| EvalError::runtime(format!("{function}: negative index")))
}

/// Constructs a pair from two integers. This is the only form `cons`
/// supports; it does not build arbitrary cons cells.
pub fn builtin_cons(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [a, b] => {
            let a = as_number("cons", a)?;
            let b = as_number("cons", b)?;
            Ok(Value::Pair(Rc::new(IntCell::new((a, b)))))
        }
        _ => Err(EvalError::arity("cons", "exactly 2", args.len())),
    }
}

pub fn builtin_car(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [value] => Ok(Value::Number(as_pair("car", value)?.get().0)),
        _ => Err(EvalError::arity("car", "exactly 1", args.len())),
    }
}

pub fn builtin_cdr(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [value] => Ok(Value::Number(as_pair("cdr", value)?.get().1)),
        _ => Err(EvalError::arity("cdr", "exactly 1", args.len())),
    }
}

/// `(set-car! pair-expr value)` evaluates `pair-expr` to any expression that
/// yields a pair, not just a bound name, then mutates its first slot in
/// place -- every binding sharing the pair observes the change.
pub fn set_car_bang(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let (target, value) = two_raw_args("set-car!", args)?;
    let pair = eval(&target, env, limit)?;
    let cell = as_pair("set-car!", &pair)?;
    let new_value = as_number("set-car!", &eval(&value, env, limit)?)?;
    let (_, second) = cell.get();
    cell.set((new_value, second));
    Ok(Value::Boolean(true))
}

pub fn set_cdr_bang(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let (target, value) = two_raw_args("set-cdr!", args)?;
    let pair = eval(&target, env, limit)?;
    let cell = as_pair("set-cdr!", &pair)?;
    let new_value = as_number("set-cdr!", &eval(&value, env, limit)?)?;
    let (first, _) = cell.get();
    cell.set((first, new_value));
    Ok(Value::Boolean(true))
}

fn two_raw_args(function: &str, args: &Value) -> Result<(Value, Value), EvalError> {
    let mut items = Vec::new();
    let mut cursor = args.clone();
    loop {
        match cursor {
            Value::Cell(None) => break,
            Value::Cell(Some(node)) => {
                items.push(node.first.clone());
                cursor = node.second.clone().unwrap_or_else(Value::nil);
            }
            other => return Err(EvalError::syntax(format!("{function}: improper form: {other}"))),
        }
    }
    match items.as_slice() {
        [a, b] => Ok((a.clone(), b.clone())),
        _ => Err(EvalError::syntax(format!("{function}: expected exactly 2 arguments"))),
    }
}

pub fn builtin_list(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        Ok(Value::nil())
    } else {
        Ok(Value::ListValue(Rc::new(args.to_vec())))
    }
}

pub fn builtin_list_ref(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [list, index] => {
            let items = list
                .as_sequence()
                .ok_or_else(|| EvalError::type_mismatch("list-ref", "list", list.type_name()))?;
            let index = as_index("list-ref", index)?;
            items
                .get(index)
                .cloned()
                .ok_or_else(|| EvalError::runtime(format!("list-ref: index {index} out of range")))
        }
        _ => Err(EvalError::arity("list-ref", "exactly 2", args.len())),
    }
}

pub fn builtin_list_tail(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [list, index] => {
            let items = list
                .as_sequence()
                .ok_or_else(|| EvalError::type_mismatch("list-tail", "list", list.type_name()))?;
            let index = as_index("list-tail", index)?;
            if index > items.len() {
                return Err(EvalError::runtime(format!("list-tail: index {index} out of range")));
            }
            if items.len() - index == 0 {
                Ok(Value::nil())
            } else {
                Ok(Value::ListValue(Rc::new(items[index..].to_vec())))
            }
        }
        _ => Err(EvalError::arity("list-tail", "exactly 2", args.len())),
    }
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "cons".to_string(),
        Value::Callable(Callable::Primitive { name: "cons", func: builtin_cons }),
    );
    env.define(
        "car".to_string(),
        Value::Callable(Callable::Primitive { name: "car", func: builtin_car }),
    );
    env.define(
        "cdr".to_string(),
        Value::Callable(Callable::Primitive { name: "cdr", func: builtin_cdr }),
    );
    env.define(
        "set-car!".to_string(),
        Value::Callable(Callable::SpecialForm { name: "set-car!", func: set_car_bang }),
    );
    env.define(
        "set-cdr!".to_string(),
        Value::Callable(Callable::SpecialForm { name: "set-cdr!", func: set_cdr_bang }),
    );
    env.define(
        "list".to_string(),
        Value::Callable(Callable::Primitive { name: "list", func: builtin_list }),
    );
    env.define(
        "list-ref".to_string(),
        Value::Callable(Callable::Primitive { name: "list-ref", func: builtin_list_ref }),
    );
    env.define(
        "list-tail".to_string(),
        Value::Callable(Callable::Primitive { name: "list-tail", func: builtin_list_tail }),
    );
}
