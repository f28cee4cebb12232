// ABOUTME: Value types shared by the AST, the environment, and the evaluator

use crate::env::Environment;
use crate::error::EvalError;
use std::cell::Cell as IntCell;
use std::fmt;
use std::rc::Rc;

/// A built-in primitive: its arguments are evaluated by the caller via
/// `eval_list` before `func` runs.
pub type PrimitiveFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A special form: receives the raw, unevaluated argument `Cell` chain (or
/// `Value::nil()` when there are no arguments), the environment, and the
/// caller's recursion-depth ceiling to thread through any nested `eval`
/// calls it makes; decides for itself what to evaluate.
pub type SpecialFormFn = fn(&Value, &Rc<Environment>, usize) -> Result<Value, EvalError>;

/// The single tagged variant shared by the reader's AST and the evaluator's
/// runtime values (see the data model's note on AST/value conflation).
#[derive(Debug, Clone)]
pub enum Value {
    Number(i64),
    Boolean(bool),
    Symbol(String),
    /// A cons cell, or `None` for the canonical empty list.
    Cell(Option<Rc<ConsCell>>),
    /// The two-integer value constructed by `cons`. Shared via `Rc` so that
    /// `set-car!`/`set-cdr!` mutation is visible through every binding that
    /// shares the same pair.
    Pair(Rc<IntCell<(i64, i64)>>),
    /// The ordered sequence constructed by `list`.
    ListValue(Rc<Vec<Value>>),
    Callable(Callable),
}

/// A single node of a cons chain. `second` absent means this cell ends a
/// proper list; `second` holding a non-`Cell` value means this cell is the
/// tail of an improper list.
#[derive(Debug)]
pub struct ConsCell {
    pub first: Value,
    pub second: Option<Value>,
}

#[derive(Clone)]
pub enum Callable {
    Primitive { name: &'static str, func: PrimitiveFn },
    SpecialForm { name: &'static str, func: SpecialFormFn },
    Closure(Rc<Closure>),
}

/// A user-defined function: parameter names, a non-empty body sequence, and
/// the environment captured at construction time (the defining scope, not
/// the global environment — see the design notes on lambda parent scope).
#[derive(Debug)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Vec<Value>,
    pub env: Rc<Environment>,
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Primitive { name, .. } => write!(f, "Primitive({name})"),
            Callable::SpecialForm { name, .. } => write!(f, "SpecialForm({name})"),
            Callable::Closure(c) => f.debug_struct("Closure").field("params", &c.params).finish(),
        }
    }
}

impl Value {
    pub fn nil() -> Value {
        Value::Cell(None)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Cell(None))
    }

    /// Only `#f` is falsy; every other value, including `0`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    pub fn cons(first: Value, second: Option<Value>) -> Value {
        Value::Cell(Some(Rc::new(ConsCell { first, second })))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Symbol(_) => "symbol",
            Value::Cell(None) => "empty-list",
            Value::Cell(Some(_)) => "cell",
            Value::Pair(_) => "pair",
            Value::ListValue(_) => "list",
            Value::Callable(_) => "callable",
        }
    }

    /// Flattens a `ListValue` or a proper `Cell` chain into an owned `Vec`.
    /// Returns `None` for an improper chain or any non-sequence value.
    pub fn as_sequence(&self) -> Option<Vec<Value>> {
        match self {
            Value::ListValue(items) => Some(items.as_ref().clone()),
            Value::Cell(None) => Some(Vec::new()),
            Value::Cell(Some(_)) => {
                let mut out = Vec::new();
                let mut cursor = self.clone();
                loop {
                    match cursor {
                        Value::Cell(None) => break,
                        Value::Cell(Some(node)) => {
                            out.push(node.first.clone());
                            cursor = node.second.clone().unwrap_or_else(Value::nil);
                        }
                        _ => return None,
                    }
                }
                Some(out)
            }
            _ => None,
        }
    }

    /// True for the empty list, any `ListValue`, and any proper `Cell` chain.
    pub fn is_list(&self) -> bool {
        match self {
            Value::ListValue(_) | Value::Cell(None) => true,
            Value::Cell(Some(_)) => self.as_sequence().is_some(),
            _ => false,
        }
    }
}

fn fmt_cell_tail(second: &Option<Value>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match second {
        None => Ok(()),
        Some(Value::Cell(None)) => Ok(()),
        Some(Value::Cell(Some(node))) => {
            write!(f, " {}", node.first)?;
            fmt_cell_tail(&node.second, f)
        }
        Some(other) => write!(f, " . {other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Cell(None) => write!(f, "()"),
            Value::Cell(Some(node)) => {
                write!(f, "({}", node.first)?;
                fmt_cell_tail(&node.second, f)?;
                write!(f, ")")
            }
            Value::Pair(p) => {
                let (a, b) = p.get();
                write!(f, "({a} . {b})")
            }
            Value::ListValue(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Callable(Callable::Primitive { name, .. }) => write!(f, "#<primitive:{name}>"),
            Value::Callable(Callable::SpecialForm { name, .. }) => {
                write!(f, "#<special-form:{name}>")
            }
            Value::Callable(Callable::Closure(_)) => write!(f, "#<closure>"),
        }
    }
}
