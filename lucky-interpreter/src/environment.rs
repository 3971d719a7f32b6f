use crate::value::Value;
use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Trace, Finalize)]
pub struct EnvironmentCore {
    store: HashMap<Rc<str>, Value>,
    outer: Option<Environment>,
}

/// A scope of variable bindings with an optional enclosing scope. Clones
/// share the same bindings.
///
/// Closures keep their defining environment alive and environments hold
/// closures, so cycles are expected. They are reclaimed by the collector.
#[derive(Debug, Clone, Trace, Finalize)]
pub struct Environment {
    environment: Gc<GcCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    /// Looks `key` up in this scope, then in the enclosing ones.
    pub fn get(&self, key: &str) -> Option<Value> {
        let env = self.environment.borrow();
        env.store
            .get(key)
            .cloned()
            .or_else(|| env.outer.as_ref().and_then(|outer| outer.get(key)))
    }

    /// Only this scope, ignoring enclosing ones.
    pub fn get_local(&self, key: &str) -> Option<Value> {
        self.environment.borrow().store.get(key).cloned()
    }

    /// Updates the nearest scope that already binds `key`. When none does,
    /// the binding is created here.
    pub fn assign(&mut self, key: Rc<str>, value: Value) {
        let mut target = self.defining_scope(&key).unwrap_or_else(|| self.clone());
        target.define(key, value);
    }

    /// Binds `key` in this scope, shadowing any enclosing binding.
    pub fn define(&mut self, key: Rc<str>, value: Value) {
        self.environment.borrow_mut().store.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.environment.borrow().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Gc::ptr_eq(&self.environment, &other.environment)
    }

    fn defining_scope(&self, key: &str) -> Option<Environment> {
        let env = self.environment.borrow();
        if env.store.contains_key(key) {
            return Some(self.clone());
        }
        env.outer.as_ref().and_then(|outer| outer.defining_scope(key))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
