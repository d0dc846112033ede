use std::rc::Rc;

use crate::{ast::FunctionDecl, interpreter::evaluator::env::Env};

/// A user-defined function closed over its defining scope.
///
/// Calls push a fresh scope whose parent is `env`, so a function sees the
/// bindings visible where it was declared, not where it is called.
pub struct Function {
    /// The shared declaration.
    pub decl: Rc<FunctionDecl>,
    /// The scope the declaration was executed in.
    pub env:  Env,
}

impl Function {
    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// The number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.decl.params.len()
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.decl.name)
         .field("params", &self.decl.params)
         .finish_non_exhaustive()
    }
}
