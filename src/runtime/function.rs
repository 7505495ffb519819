use std::{fmt, sync::Arc};

use crate::runtime::{
    Args, Result, arity::Arity, closure::Closure, env::Env, lambda::Lambda, stats, value::Value,
};

/// Callable runtime value: a closure plus the arguments bound so far.
///
/// Invariant: `bound.len() < arity` whenever `arity > 0`, and an arity-0
/// function has no bound arguments. A function that would receive its last
/// argument is invoked by the resolver instead of being built.
///
/// Functions are immutable and share everything through `Arc`, so the same
/// partial application can be reused from any number of call sites.
#[derive(Clone)]
pub struct Function {
    closure: Arc<Closure>,
    bound: Arc<[Value]>,
}

impl Function {
    pub fn new(closure: Closure) -> Self {
        stats::record_function();
        Self {
            closure: Arc::new(closure),
            bound: Arc::from(Vec::new()),
        }
    }

    pub fn from_lambda(lambda: Lambda) -> Self {
        Self::new(Closure::new(Arc::new(lambda), Env::empty()))
    }

    pub fn closure(&self) -> &Closure {
        &self.closure
    }

    pub fn name(&self) -> &str {
        self.closure.lambda().name()
    }

    pub fn bound(&self) -> &[Value] {
        &self.bound
    }

    /// Arguments still required before the body runs.
    pub fn need(&self) -> usize {
        self.arity() - self.bound.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.bound.is_empty()
    }

    /// Returns a new function with `args` appended to the bound arguments.
    pub(crate) fn with_bound(&self, args: Args) -> Function {
        debug_assert!(args.len() < self.need());
        if args.is_empty() {
            return self.clone();
        }
        stats::record_function();
        let mut bound = Vec::with_capacity(self.bound.len() + args.len());
        bound.extend(self.bound.iter().cloned());
        bound.extend(args);
        Self {
            closure: self.closure.clone(),
            bound: Arc::from(bound),
        }
    }

    /// Concatenates the bound arguments with the final ones.
    pub(crate) fn saturate(&self, args: Args) -> Args {
        if self.bound.is_empty() {
            return args;
        }
        let mut full = Vec::with_capacity(self.bound.len() + args.len());
        full.extend(self.bound.iter().cloned());
        full.extend(args);
        full
    }
}

impl Arity for Function {
    fn arity(&self) -> usize {
        self.closure.arity()
    }

    fn to_function(&self) -> Result<Function> {
        Ok(self.clone())
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        let no_bound = self.bound.is_empty() && other.bound.is_empty();
        Arc::ptr_eq(&self.closure, &other.closure)
            && (no_bound || Arc::ptr_eq(&self.bound, &other.bound))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name())
            .field("arity", &self.arity())
            .field("bound", &self.bound.len())
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bound.is_empty() {
            write!(f, "<function {}/{}>", self.name(), self.arity())
        } else {
            write!(
                f,
                "<function {}/{} [{} bound]>",
                self.name(),
                self.arity(),
                self.bound.len()
            )
        }
    }
}
