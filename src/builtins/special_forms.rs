// ABOUTME: Special forms -- quote, if, define, set!, lambda

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::{Callable, Closure, Value};
use std::rc::Rc;

/// Walks a raw `Cell` argument chain without evaluating anything, collecting
/// each element in order. Used by special forms that need positional access
/// to their unevaluated operands.
fn raw_args(args: &Value) -> Result<Vec<Value>, EvalError> {
    let mut out = Vec::new();
    let mut cursor = args.clone();
    loop {
        match cursor {
            Value::Cell(None) => break,
            Value::Cell(Some(node)) => {
                out.push(node.first.clone());
                cursor = node.second.clone().unwrap_or_else(Value::nil);
            }
            other => return Err(EvalError::syntax(format!("improper form: {other}"))),
        }
    }
    Ok(out)
}

pub fn quote(args: &Value, _env: &Rc<Environment>, _limit: usize) -> Result<Value, EvalError> {
    let forms = raw_args(args)?;
    match forms.as_slice() {
        [single] => Ok(single.clone()),
        _ => Err(EvalError::syntax("quote: expected exactly 1 argument")),
    }
}

pub fn if_form(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let forms = raw_args(args)?;
    if forms.len() < 2 || forms.len() > 3 {
        return Err(EvalError::syntax("if: expected (if cond then [else])"));
    }
    let condition = eval(&forms[0], env, limit)?;
    if condition.is_truthy() {
        eval(&forms[1], env, limit)
    } else if let Some(else_branch) = forms.get(2) {
        eval(else_branch, env, limit)
    } else {
        Ok(Value::nil())
    }
}

/// Handles both `(define name expr)` and the function shorthand
/// `(define (name params...) body...)`.
pub fn define(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let forms = raw_args(args)?;
    if forms.is_empty() {
        return Err(EvalError::syntax("define: expected a name or signature"));
    }
    match &forms[0] {
        Value::Symbol(name) => {
            if forms.len() != 2 {
                return Err(EvalError::syntax("define: expected (define name expr)"));
            }
            let value = eval(&forms[1], env, limit)?;
            env.define(name.clone(), value);
            Ok(Value::Boolean(true))
        }
        signature @ Value::Cell(_) => {
            let signature = raw_args(signature)?;
            let (name, params) = signature
                .split_first()
                .ok_or_else(|| EvalError::syntax("define: empty function signature"))?;
            let name = match name {
                Value::Symbol(name) => name.clone(),
                other => {
                    return Err(EvalError::syntax(format!(
                        "define: expected a symbol in function position, got {other}"
                    )))
                }
            };
            let params = params
                .iter()
                .map(|param| match param {
                    Value::Symbol(param) => Ok(param.clone()),
                    other => Err(EvalError::syntax(format!(
                        "define: expected a symbol parameter, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let closure = Closure {
                params,
                body: forms[1..].to_vec(),
                env: env.clone(),
            };
            env.define(name, Value::Callable(Callable::Closure(Rc::new(closure))));
            Ok(Value::Boolean(true))
        }
        other => Err(EvalError::syntax(format!(
            "define: expected a name or signature, got {other}"
        ))),
    }
}

pub fn set_bang(args: &Value, env: &Rc<Environment>, limit: usize) -> Result<Value, EvalError> {
    let forms = raw_args(args)?;
    let [name, expr] = forms.as_slice() else {
        return Err(EvalError::syntax("set!: expected (set! name expr)"));
    };
    let name = match name {
        Value::Symbol(name) => name.clone(),
        other => return Err(EvalError::syntax(format!("set!: expected a symbol, got {other}"))),
    };
    let value = eval(expr, env, limit)?;
    env.assign(&name, value)?;
    Ok(Value::Boolean(true))
}

/// Builds a closure from `(params...) body...`. Called directly by the
/// evaluator when `lambda` appears in head position, bypassing environment
/// lookup, and also registered as an ordinary special form.
pub fn lambda(args: &Value, env: &Rc<Environment>, _limit: usize) -> Result<Value, EvalError> {
    let forms = raw_args(args)?;
    let (params, body) = forms
        .split_first()
        .ok_or_else(|| EvalError::syntax("lambda: expected (lambda (params...) body...)"))?;
    let params = raw_args(params)?
        .into_iter()
        .map(|param| match param {
            Value::Symbol(param) => Ok(param),
            other => Err(EvalError::syntax(format!(
                "lambda: expected a symbol parameter, got {other}"
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if body.is_empty() {
        return Err(EvalError::syntax("lambda: expected at least one body expression"));
    }
    let closure = Closure {
        params,
        body: body.to_vec(),
        env: env.clone(),
    };
    Ok(Value::Callable(Callable::Closure(Rc::new(closure))))
}

pub fn register(env: &Rc<Environment>) {
    env.define(
        "quote".to_string(),
        Value::Callable(Callable::SpecialForm { name: "quote", func: quote }),
    );
    env.define(
        "if".to_string(),
        Value::Callable(Callable::SpecialForm { name: "if", func: if_form }),
    );
    env.define(
        "define".to_string(),
        Value::Callable(Callable::SpecialForm { name: "define", func: define }),
    );
    env.define(
        "set!".to_string(),
        Value::Callable(Callable::SpecialForm { name: "set!", func: set_bang }),
    );
    env.define(
        "lambda".to_string(),
        Value::Callable(Callable::SpecialForm { name: "lambda", func: lambda }),
    );
}
