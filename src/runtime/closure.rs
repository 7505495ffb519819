use std::sync::Arc;

use crate::runtime::{
    Args, Result,
    arity::Arity,
    env::Env,
    fault::Fault,
    function::Function,
    lambda::Lambda,
    stats,
    thunk::Thunk,
};

/// A lambda paired with the environment it captured when it was built.
#[derive(Debug, Clone)]
pub struct Closure {
    lambda: Arc<Lambda>,
    env: Env,
}

impl Closure {
    pub fn new(lambda: Arc<Lambda>, env: Env) -> Self {
        stats::record_closure();
        Self { lambda, env }
    }

    pub fn lambda(&self) -> &Lambda {
        &self.lambda
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Runs the body with exactly `arity` arguments.
    ///
    /// Only the resolver should call this. A mismatched count never reaches the
    /// body and is reported as [`Fault::ArityMismatch`]. Faults raised by the
    /// body are returned unchanged.
    pub fn invoke(&self, args: Args) -> Result<Thunk> {
        if args.len() != self.lambda.arity() {
            return Err(Fault::ArityMismatch {
                name: self.lambda.name().into(),
                expected: self.lambda.arity(),
                got: args.len(),
            });
        }
        stats::record_invocation();
        let value = self.lambda.call(&self.env, args)?;
        Ok(Thunk::from(value))
    }
}

impl Arity for Closure {
    fn arity(&self) -> usize {
        self.lambda.arity()
    }

    fn to_function(&self) -> Result<Function> {
        Ok(Function::new(self.clone()))
    }
}
