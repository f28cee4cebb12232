// ABOUTME: Evaluator module dispatching on value kind and applying callables

use crate::builtins::special_forms;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Callable, Value};
use std::cell::Cell;
use std::rc::Rc;

/// Default ceiling on nested closure invocations, guarding against a stack
/// overflow from runaway recursive user programs. Configurable per
/// interpreter via [`crate::interpreter::Interpreter::with_recursion_limit`],
/// which threads its chosen limit through every `eval`/`apply` call made on
/// that interpreter.
pub const DEFAULT_RECURSION_LIMIT: usize = 4_000;

thread_local! {
    static RECURSION_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct DepthGuard;

impl DepthGuard {
    fn enter(limit: usize) -> Result<Self, EvalError> {
        let depth = RECURSION_DEPTH.with(|cell| {
            let depth = cell.get() + 1;
            cell.set(depth);
            depth
        });
        if depth > limit {
            RECURSION_DEPTH.with(|cell| cell.set(cell.get() - 1));
            return Err(EvalError::runtime(format!(
                "recursion limit of {limit} exceeded"
            )));
        }
        Ok(DepthGuard)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        RECURSION_DEPTH.with(|cell| cell.set(cell.get() - 1));
    }
}

/// Evaluates `expr` against `env` by value-kind dispatch. Atoms other than
/// symbols self-evaluate; symbols resolve through the environment; a
/// non-empty `Cell` is an application. `limit` is the caller's
/// recursion-depth ceiling, carried along so every nested closure call
/// enforces the same bound.
pub fn eval(expr: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    match expr {
        Value::Number(_)
        | Value::Boolean(_)
        | Value::Pair(_)
        | Value::ListValue(_)
        | Value::Callable(_)
        | Value::Cell(None) => Ok(expr.clone()),
        Value::Symbol(name) => env
            .lookup(name)
            .ok_or_else(|| EvalError::name(format!("unbound variable: {name}"))),
        Value::Cell(Some(node)) => {
            let tail = node.second.clone().unwrap_or_else(Value::nil);
            if matches!(&node.first, Value::Symbol(s) if s == "lambda") {
                return special_forms::lambda(&tail, env, limit);
            }
            let callable = eval(&node.first, env, limit)?;
            apply(&callable, &tail, env, limit)
        }
    }
}

/// Applies `callable` to the raw, unevaluated `args` chain. Special forms
/// and closures decide for themselves what to evaluate; primitives have
/// their arguments pre-evaluated via `eval_list`.
pub fn apply(
    callable: &Value,
    args: &Value,
    env: &Rc<Environment>,
    limit: usize,
) -> Result<Value, EvalError> {
    match callable {
        Value::Callable(Callable::Primitive { func, .. }) => {
            let evaluated = eval_list(args, env, limit)?;
            func(&evaluated)
        }
        Value::Callable(Callable::SpecialForm { func, .. }) => func(args, env, limit),
        Value::Callable(Callable::Closure(closure)) => {
            let evaluated = eval_list(args, env, limit)?;
            if evaluated.len() != closure.params.len() {
                return Err(EvalError::runtime(format!(
                    "closure expected {} argument(s), got {}",
                    closure.params.len(),
                    evaluated.len()
                )));
            }
            let _guard = DepthGuard::enter(limit)?;
            let call_env = Environment::with_parent(closure.env.clone());
            for (param, value) in closure.params.iter().zip(evaluated) {
                call_env.define(param.clone(), value);
            }
            let mut result = Value::nil();
            for expr in &closure.body {
                result = eval(expr, &call_env, limit)?;
            }
            Ok(result)
        }
        other => Err(EvalError::runtime(format!("not callable: {other}"))),
    }
}

/// Walks a `Cell` argument chain, evaluating each element against `env`.
/// Tolerates an improper terminal `second` only when it is a raw `Number`
/// (the internal representation produced when reading something like
/// `(cons a b)` into an argument position).
pub fn eval_list(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Vec<Value>, EvalError> {
    let mut out = Vec::new();
    let mut cursor = args.clone();
    loop {
        match cursor {
            Value::Cell(None) => break,
            Value::Cell(Some(node)) => {
                out.push(eval(&node.first, env, limit)?);
                cursor = node.second.clone().unwrap_or_else(Value::nil);
            }
            Value::Number(n) => {
                out.push(Value::Number(n));
                break;
            }
            other => {
                return Err(EvalError::runtime(format!(
                    "improper argument list ending in {other}"
                )))
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::reader::parse;

    fn global_env() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        env
    }

    fn eval_str(source: &str, env: &Rc<Environment>) -> Result<Value, EvalError> {
        eval(&parse(source).unwrap(), env, DEFAULT_RECURSION_LIMIT)
    }

    #[test]
    fn numbers_and_booleans_self_evaluate() {
        let env = global_env();
        assert_eq!(eval_str("42", &env).unwrap().to_string(), "42");
        assert_eq!(eval_str("#t", &env).unwrap().to_string(), "#t");
    }

    #[test]
    fn symbol_resolves_through_environment() {
        let env = global_env();
        env.define("x".to_string(), Value::Number(10));
        assert_eq!(eval_str("x", &env).unwrap().to_string(), "10");
    }

    #[test]
    fn unbound_symbol_is_name_error() {
        let env = global_env();
        assert!(matches!(
            eval_str("undefined-name", &env),
            Err(EvalError::NameError(_))
        ));
    }

    #[test]
    fn application_calls_primitive() {
        let env = global_env();
        assert_eq!(eval_str("(+ 1 2)", &env).unwrap().to_string(), "3");
    }

    #[test]
    fn quote_returns_argument_unevaluated() {
        let env = global_env();
        assert_eq!(eval_str("'(1 2 . 3)", &env).unwrap().to_string(), "(1 2 . 3)");
    }

    #[test]
    fn if_picks_branch_on_condition() {
        let env = global_env();
        assert_eq!(eval_str("(if #f 1 2)", &env).unwrap().to_string(), "2");
        assert_eq!(eval_str("(if #t 1 2)", &env).unwrap().to_string(), "1");
        assert_eq!(eval_str("(if #f 1)", &env).unwrap().to_string(), "()");
    }

    #[test]
    fn define_then_lookup_sequence() {
        let env = global_env();
        assert_eq!(eval_str("(define x 10)", &env).unwrap().to_string(), "#t");
        assert_eq!(eval_str("(* x x)", &env).unwrap().to_string(), "100");
    }

    #[test]
    fn define_function_shape_then_call() {
        let env = global_env();
        assert_eq!(
            eval_str("(define (sq x) (* x x))", &env).unwrap().to_string(),
            "#t"
        );
        assert_eq!(eval_str("(sq 5)", &env).unwrap().to_string(), "25");
    }

    #[test]
    fn set_bang_requires_existing_name() {
        let env = global_env();
        assert!(matches!(
            eval_str("(set! missing 1)", &env),
            Err(EvalError::NameError(_))
        ));

        eval_str("(define x 1)", &env).unwrap();
        assert_eq!(eval_str("(set! x 2)", &env).unwrap().to_string(), "#t");
        assert_eq!(eval_str("x", &env).unwrap().to_string(), "2");
    }

    #[test]
    fn closure_captures_current_environment_lexically() {
        let env = global_env();
        eval_str("(define (make-adder n) (lambda (x) (+ x n)))", &env).unwrap();
        eval_str("(define add5 (make-adder 5))", &env).unwrap();
        assert_eq!(eval_str("(add5 3)", &env).unwrap().to_string(), "8");
    }

    #[test]
    fn closure_arity_mismatch_is_runtime_error() {
        let env = global_env();
        eval_str("(define (id x) x)", &env).unwrap();
        assert!(matches!(
            eval_str("(id 1 2)", &env),
            Err(EvalError::RuntimeError(_))
        ));
    }

    #[test]
    fn division_by_zero_is_runtime_error() {
        let env = global_env();
        assert!(matches!(
            eval_str("(/ 1 0)", &env),
            Err(EvalError::RuntimeError(_))
        ));
    }

    #[test]
    fn cons_set_car_and_car_round_trip() {
        let env = global_env();
        assert_eq!(eval_str("(define p (cons 1 2))", &env).unwrap().to_string(), "#t");
        assert_eq!(eval_str("(set-car! p 7)", &env).unwrap().to_string(), "#t");
        assert_eq!(eval_str("(car p)", &env).unwrap().to_string(), "7");
    }

    #[test]
    fn list_tail_returns_suffix() {
        let env = global_env();
        assert_eq!(
            eval_str("(list-tail (list 1 2 3 4) 2)", &env).unwrap().to_string(),
            "(3 4)"
        );
    }

    #[test]
    fn unbounded_recursion_is_stopped_by_the_configured_limit() {
        let env = global_env();
        eval_str("(define (loop n) (loop n))", &env).unwrap();
        let result = eval(&parse("(loop 0)").unwrap(), &env, 50);
        assert!(matches!(result, Err(EvalError::RuntimeError(_))));
    }

    #[test]
    fn and_or_short_circuit() {
        let env = global_env();
        eval_str("(define calls (cons 0 0))", &env).unwrap();
        // and should not evaluate the second operand once the first is #f.
        eval_str("(and #f (set-car! calls 1))", &env).unwrap();
        assert_eq!(eval_str("(car calls)", &env).unwrap().to_string(), "0");

        // or should not evaluate the second operand once the first is truthy.
        eval_str("(or #t (set-car! calls 1))", &env).unwrap();
        assert_eq!(eval_str("(car calls)", &env).unwrap().to_string(), "0");
    }
}
