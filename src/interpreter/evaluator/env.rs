use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use crate::interpreter::value::core::Value;

/// A shared handle to one scope in the environment chain.
pub type Env = Rc<RefCell<Scope>>;

/// One level of the environment chain.
///
/// The global scope has no parent. Every call creates a scope whose parent is
/// the scope the callee was declared in.
#[derive(Debug, Default)]
pub struct Scope {
    vars:   HashMap<String, Value>,
    parent: Option<Env>,
}

impl Scope {
    /// Creates an empty global scope.
    #[must_use]
    pub fn global() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates an empty scope nested in `parent`.
    #[must_use]
    pub fn child(parent: &Env) -> Env {
        Rc::new(RefCell::new(Self { vars:   HashMap::new(),
                                    parent: Some(Rc::clone(parent)), }))
    }

    /// Looks a name up, walking outward through the enclosing scopes.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::{evaluator::env::Scope, value::core::Value};
    ///
    /// let global = Scope::global();
    /// Scope::define(&global, "x", Value::from(1));
    /// let inner = Scope::child(&global);
    ///
    /// assert_eq!(Scope::lookup(&inner, "x"), Some(Value::from(1)));
    /// assert_eq!(Scope::lookup(&inner, "y"), None);
    /// ```
    #[must_use]
    pub fn lookup(env: &Env, name: &str) -> Option<Value> {
        let mut current = Rc::clone(env);
        loop {
            let next = {
                let scope = current.borrow();
                if let Some(value) = scope.vars.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()?
            };
            current = next;
        }
    }

    /// Binds a name in this scope only, shadowing any outer binding.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::{evaluator::env::Scope, value::core::Value};
    ///
    /// let global = Scope::global();
    /// Scope::define(&global, "x", Value::from(1));
    /// let inner = Scope::child(&global);
    /// Scope::define(&inner, "x", Value::from(2));
    ///
    /// assert_eq!(Scope::lookup(&global, "x"), Some(Value::from(1)));
    /// assert_eq!(Scope::lookup(&inner, "x"), Some(Value::from(2)));
    /// ```
    pub fn define(env: &Env, name: &str, value: Value) {
        env.borrow_mut().vars.insert(name.to_string(), value);
    }
}

/// Remembers the scopes and arrays of a run that may end up in reference
/// cycles, so the run can empty them when it ends.
///
/// A function captures the scope it is declared in, so a scope that binds a
/// function keeps itself alive; an array pushed into itself does the same.
/// Call scopes and every array that has an array stored into it are
/// recorded as weak references. [`CycleTracker::release`] empties whatever is
/// still alive, which breaks every cycle and lets the values go.
#[derive(Debug, Default)]
pub struct CycleTracker {
    scopes: Vec<Weak<RefCell<Scope>>>,
    arrays: Vec<Weak<RefCell<Vec<Value>>>>,
}

impl CycleTracker {
    /// Records a scope.
    pub fn track_scope(&mut self, env: &Env) {
        track(&mut self.scopes, env);
    }

    /// Records `container` when storing `stored` into it could close a cycle
    /// of arrays.
    pub fn track_store(&mut self, container: &Value, stored: &Value) {
        if let (Value::Array(container), Value::Array(_)) = (container, stored) {
            track(&mut self.arrays, container);
        }
    }

    /// Empties every recorded scope and array that is still alive.
    ///
    /// Values are dropped from a work list rather than recursively, so a
    /// deeply nested array does not exhaust the stack on its way out.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::{
    ///     evaluator::env::{CycleTracker, Scope},
    ///     value::core::Value,
    /// };
    ///
    /// let array = Value::from(vec![1.into()]);
    /// let Value::Array(items) = &array else { unreachable!() };
    /// items.borrow_mut().push(array.clone());
    ///
    /// let global = Scope::global();
    /// Scope::define(&global, "a", array.clone());
    ///
    /// let mut cycles = CycleTracker::default();
    /// cycles.track_scope(&global);
    /// cycles.track_store(&array, &array);
    /// cycles.release();
    ///
    /// assert_eq!(Scope::lookup(&global, "a"), None);
    /// assert_eq!(array.to_string(), "[]");
    /// ```
    pub fn release(&mut self) {
        let mut pending: Vec<Value> = Vec::new();
        for scope in self.scopes.drain(..).filter_map(|scope| scope.upgrade()) {
            pending.extend(scope.borrow_mut().vars.drain().map(|(_, value)| value));
        }
        for array in self.arrays.drain(..).filter_map(|array| array.upgrade()) {
            pending.append(&mut array.borrow_mut());
        }

        while let Some(value) = pending.pop() {
            if let Value::Array(items) = &value
               && let Ok(mut items) = items.try_borrow_mut()
            {
                pending.append(&mut items);
            }
        }
    }
}

/// Pushes a weak reference to `item`, first dropping the references whose
/// target is gone whenever the list would otherwise grow.
fn track<T>(list: &mut Vec<Weak<T>>, item: &Rc<T>) {
    if list.last().is_some_and(|last| std::ptr::eq(last.as_ptr(), Rc::as_ptr(item))) {
        return;
    }
    if list.len() == list.capacity() {
        list.retain(|entry| entry.strong_count() > 0);
    }
    list.push(Rc::downgrade(item));
}
