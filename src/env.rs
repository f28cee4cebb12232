// ABOUTME: Environment module for managing variable bindings and lexical scopes

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment whose parent is fixed at construction
    /// time; parent lineage never changes afterward.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds `name` unconditionally in this frame, overwriting any prior
    /// binding with the same name in this frame.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Searches this frame, then recurses into the parent chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Rebinds `name` in whichever frame already holds it. Fails with a
    /// `NameError` if `name` is unbound anywhere in the chain.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EvalError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.assign(name, value);
        }
        Err(EvalError::name(format!("unbound variable: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_lookup() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Number(42));
        assert!(matches!(env.lookup("x"), Some(Value::Number(42))));
    }

    #[test]
    fn undefined_name_is_none() {
        let env = Environment::new();
        assert!(env.lookup("undefined").is_none());
    }

    #[test]
    fn child_shadows_parent() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(42));

        let child = Environment::with_parent(parent);
        child.define("x".to_string(), Value::Number(100));

        assert!(matches!(child.lookup("x"), Some(Value::Number(100))));
    }

    #[test]
    fn child_sees_parent_binding() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(42));

        let child = Environment::with_parent(parent);
        assert!(matches!(child.lookup("x"), Some(Value::Number(42))));
    }

    #[test]
    fn multiple_levels_resolve() {
        let grandparent = Environment::new();
        grandparent.define("a".to_string(), Value::Number(1));

        let parent = Environment::with_parent(grandparent);
        parent.define("b".to_string(), Value::Number(2));

        let child = Environment::with_parent(parent);
        child.define("c".to_string(), Value::Number(3));

        assert!(matches!(child.lookup("a"), Some(Value::Number(1))));
        assert!(matches!(child.lookup("b"), Some(Value::Number(2))));
        assert!(matches!(child.lookup("c"), Some(Value::Number(3))));
    }

    #[test]
    fn assign_rebinds_in_defining_frame() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Number(1));
        let child = Environment::with_parent(parent.clone());

        child.assign("x", Value::Number(2)).unwrap();

        assert!(matches!(parent.lookup("x"), Some(Value::Number(2))));
        assert!(matches!(child.lookup("x"), Some(Value::Number(2))));
    }

    #[test]
    fn assign_on_unbound_name_is_name_error() {
        let env = Environment::new();
        let err = env.assign("missing", Value::Number(1)).unwrap_err();
        assert!(matches!(err, EvalError::NameError(_)));
    }
}
