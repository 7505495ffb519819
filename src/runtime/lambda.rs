use std::{fmt, sync::Arc};

use crate::runtime::{
    Args, Code, Result,
    arity::{Arity, MAX_ARITY, check_arity},
    closure::Closure,
    env::Env,
    fault::Fault,
    function::Function,
    stats,
    value::Value,
};

/// Compiled body of a callable together with its declared arity.
///
/// One type covers the whole `0..=MAX_ARITY` invoker family. The code receives
/// the captured environment and exactly `arity` argument slots; it must not
/// force the arguments itself unless the result demands it.
#[derive(Clone)]
pub struct Lambda {
    name: Arc<str>,
    arity: usize,
    code: Arc<Code>,
}

impl Lambda {
    pub fn new<F>(name: impl Into<Arc<str>>, arity: usize, code: F) -> Result<Self>
    where
        F: Fn(&Env, Args) -> Result<Value> + Send + Sync + 'static,
    {
        check_arity(arity, MAX_ARITY)?;
        stats::record_lambda();
        Ok(Self {
            name: name.into(),
            arity,
            code: Arc::new(code),
        })
    }

    /// Builds a lambda whose arity is fixed at compile time.
    ///
    /// The code receives its arguments as a `[Value; K]` array.
    pub fn fixed<const K: usize>(
        name: impl Into<Arc<str>>,
        code: impl Fn(&Env, [Value; K]) -> Result<Value> + Send + Sync + 'static,
    ) -> Result<Self> {
        let name: Arc<str> = name.into();
        let label = name.clone();
        Self::new(name, K, move |env: &Env, args: Args| {
            let got = args.len();
            let args: [Value; K] = args.try_into().map_err(|_| Fault::ArityMismatch {
                name: label.clone(),
                expected: K,
                got,
            })?;
            code(env, args)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn call(&self, env: &Env, args: Args) -> Result<Value> {
        (self.code)(env, args)
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lambda({}/{})", self.name, self.arity)
    }
}

impl Arity for Lambda {
    fn arity(&self) -> usize {
        self.arity
    }

    fn to_function(&self) -> Result<Function> {
        Ok(Function::new(Closure::new(Arc::new(self.clone()), Env::empty())))
    }
}
