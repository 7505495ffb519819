use std::sync::OnceLock;

use crate::runtime::{
    Args, Result, config::RuntimeConfig, function::Function, thunk::Thunk, value::Value,
};

mod apply;

/// Outcome of applying a callable to an argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Exact or over-application: the (possibly deferred) result.
    Thunk(Thunk),
    /// Partial application: a callable still waiting for arguments.
    Partial(Function),
}

impl Applied {
    pub fn into_value(self) -> Value {
        match self {
            Applied::Thunk(thunk) => Value::Thunk(thunk),
            Applied::Partial(function) => Value::Function(function),
        }
    }

    /// Forces the result. A partial application is already a value.
    pub fn force(&self) -> Result<Value> {
        match self {
            Applied::Thunk(thunk) => thunk.force(),
            Applied::Partial(function) => Ok(Value::Function(function.clone())),
        }
    }

    pub fn as_partial(&self) -> Option<&Function> {
        match self {
            Applied::Partial(function) => Some(function),
            Applied::Thunk(_) => None,
        }
    }

    pub fn as_thunk(&self) -> Option<&Thunk> {
        match self {
            Applied::Thunk(thunk) => Some(thunk),
            Applied::Partial(_) => None,
        }
    }
}

/// Decides between exact, partial, and over-application.
///
/// The resolver holds no mutable state, so one instance can serve every
/// worker thread.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: RuntimeConfig,
    trace: bool,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            trace: false,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Emits a `tracing` event for every application decision.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }
}

fn default_resolver() -> &'static Resolver {
    static DEFAULT: OnceLock<Resolver> = OnceLock::new();
    DEFAULT.get_or_init(Resolver::new)
}

/// Applies `callee` to `args` with the default limits.
pub fn apply(callee: &Value, args: Args) -> Result<Applied> {
    default_resolver().apply(callee, args)
}

/// Applies `callee` to `args` and forces the result.
pub fn eval(callee: &Value, args: Args) -> Result<Value> {
    default_resolver().eval(callee, args)
}
