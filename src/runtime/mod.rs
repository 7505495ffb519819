//! Lazy function-application core.
//!
//! Callables of any arity share one representation ([`function::Function`]),
//! results flow through memoizing [`thunk::Thunk`] cells, and the
//! [`resolver`] decides whether an application is exact, partial, or over.
//!
//! # No-Cycle Invariant
//! Runtime values are immutable graphs shared through `Arc`, so they are
//! expected to stay acyclic:
//! - Closures may capture values, but captured values must not reference the
//!   capturing closure.
//! - A thunk may reach its own cell only through its pending computation; the
//!   computation is dropped when the cell is first forced.
//!
//! Any future cyclic data feature must use cycle-aware memory management.
use crate::runtime::{env::Env, fault::Fault, value::Value};

pub mod arity;
pub mod closure;
pub mod config;
pub mod env;
pub mod fault;
pub mod function;
pub mod lambda;
pub mod resolver;
pub mod stats;
pub mod thunk;
pub mod value;

/// Argument slots handed to an invoker, in application order.
pub type Args = Vec<Value>;

/// Compiled body: captured environment and exactly `arity` arguments in, a
/// possibly deferred value out.
pub type Code = dyn Fn(&Env, Args) -> Result<Value> + Send + Sync;

pub type Result<T> = std::result::Result<T, Fault>;
