use crate::runtime::{Result, fault::Fault, function::Function};

/// Largest arity the runtime generates invokers for.
pub const MAX_ARITY: usize = 25;

/// Capability shared by everything that can be applied.
///
/// Exposes the declared arity and a way to enter application as a
/// [`Function`]. There is deliberately no invocation method here: invocation
/// is exact-arity and only the resolver performs it.
pub trait Arity {
    /// Number of arguments required before the body runs.
    fn arity(&self) -> usize;

    /// The callable value that represents `self` in application, or
    /// [`Fault::NotCallable`] when `self` cannot be applied.
    fn to_function(&self) -> Result<Function>;
}

pub(crate) fn check_arity(arity: usize, max: usize) -> Result<()> {
    if arity > max {
        return Err(Fault::ArityOutOfRange { arity, max });
    }
    Ok(())
}
