//! Arithmetic operations: +, -, *, /
//!
//! All four operate on signed 64-bit integers. `+` and `*` are variadic with
//! identities 0 and 1; `-` and `/` require at least one argument and leave a
//! single operand unchanged (no implicit negation or reciprocal).

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Callable, Value};
use std::rc::Rc;

fn as_number(function: &str, value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_mismatch(function, "number", other.type_name())),
    }
}

pub fn builtin_add(args: &[Value]) -> Result<Value, EvalError> {
    let mut sum: i64 = 0;
    for arg in args {
        sum += as_number("+", arg)?;
    }
    Ok(Value::Number(sum))
}

pub fn builtin_sub(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("-", "at least 1", 0));
    }
    let first = as_number("-", &args[0])?;
    let mut result = first;
    for arg in &args[1..] {
        result -= as_number("-", arg)?;
    }
    Ok(Value::Number(result))
}

pub fn builtin_mul(args: &[Value]) -> Result<Value, EvalError> {
    let mut product: i64 = 1;
    for arg in args {
        product *= as_number("*", arg)?;
    }
    Ok(Value::Number(product))
}

pub fn builtin_div(args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity("/", "at least 1", 0));
    }
    let first = as_number("/", &args[0])?;
    let mut result = first;
    for arg in &args[1..] {
        let divisor = as_number("/", arg)?;
        if divisor == 0 {
            return Err(EvalError::runtime("/: division by zero"));
        }
        result /= divisor;
    }
    Ok(Value::Number(result))
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "+".to_string(),
        Value::Callable(Callable::Primitive { name: "+", func: builtin_add }),
    );
    env.define(
        "-".to_string(),
        Value::Callable(Callable::Primitive { name: "-", func: builtin_sub }),
    );
    env.define(
        "*".to_string(),
        Value::Callable(Callable::Primitive { name: "*", func: builtin_mul }),
    );
    env.define(
        "/".to_string(),
        Value::Callable(Callable::Primitive { name: "/", func: builtin_div }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sums_and_defaults_to_zero() {
        assert_eq!(builtin_add(&[]).unwrap().to_string(), "0");
        assert_eq!(
            builtin_add(&[Value::Number(1), Value::Number(2), Value::Number(3)])
                .unwrap()
                .to_string(),
            "6"
        );
    }

    #[test]
    fn sub_requires_at_least_one_arg_and_unary_is_identity() {
        assert!(matches!(builtin_sub(&[]), Err(EvalError::RuntimeError(_))));
        assert_eq!(builtin_sub(&[Value::Number(5)]).unwrap().to_string(), "5");
        assert_eq!(
            builtin_sub(&[Value::Number(10), Value::Number(3), Value::Number(2)])
                .unwrap()
                .to_string(),
            "5"
        );
    }

    #[test]
    fn mul_multiplies_and_defaults_to_one() {
        assert_eq!(builtin_mul(&[]).unwrap().to_string(), "1");
        assert_eq!(
            builtin_mul(&[Value::Number(2), Value::Number(3), Value::Number(4)])
                .unwrap()
                .to_string(),
            "24"
        );
    }

    #[test]
    fn div_requires_at_least_one_arg_and_unary_is_identity() {
        assert!(matches!(builtin_div(&[]), Err(EvalError::RuntimeError(_))));
        assert_eq!(builtin_div(&[Value::Number(5)]).unwrap().to_string(), "5");
        assert_eq!(
            builtin_div(&[Value::Number(20), Value::Number(4)]).unwrap().to_string(),
            "5"
        );
    }

    #[test]
    fn div_by_zero_is_runtime_error() {
        assert!(matches!(
            builtin_div(&[Value::Number(1), Value::Number(0)]),
            Err(EvalError::RuntimeError(_))
        ));
    }

    #[test]
    fn non_number_operand_is_runtime_error() {
        assert!(matches!(
            builtin_add(&[Value::Boolean(true)]),
            Err(EvalError::RuntimeError(_))
        ));
    }
}
