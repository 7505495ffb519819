use std::cmp::Ordering;

use crate::runtime::{
    Args, Result,
    arity::{Arity, check_arity},
    fault::Fault,
    function::Function,
    stats,
    thunk::Thunk,
    value::Value,
};

use super::{Applied, Resolver};

impl Resolver {
    /// Applies a runtime value to `args`.
    ///
    /// A thunk in callee position is forced first; anything other than a
    /// function is [`Fault::NotCallable`].
    pub fn apply(&self, callee: &Value, args: Args) -> Result<Applied> {
        let function = callee.force()?.to_function()?;
        self.apply_function(&function, args)
    }

    /// Applies anything satisfying the arity contract.
    pub fn apply_to(&self, callee: &impl Arity, args: Args) -> Result<Applied> {
        self.apply_function(&callee.to_function()?, args)
    }

    /// Applies and forces the result to weak head normal form.
    pub fn eval(&self, callee: &Value, args: Args) -> Result<Value> {
        self.apply(callee, args)?.force()
    }

    /// Core application loop.
    ///
    /// Arguments are consumed left to right. Over-application is iterative:
    /// each step saturates the current function, forces its result, and
    /// continues with the leftover arguments.
    pub fn apply_function(&self, function: &Function, mut args: Args) -> Result<Applied> {
        let mut function = function.clone();
        let mut steps = 0;

        loop {
            check_arity(function.arity(), self.config.max_arity)?;
            let need = function.need();

            match args.len().cmp(&need) {
                Ordering::Equal => {
                    if self.trace {
                        tracing::trace!(
                            function = function.name(),
                            arity = function.arity(),
                            bound = function.bound().len(),
                            supplied = args.len(),
                            "exact application"
                        );
                    }
                    return self.invoke_exact(&function, args).map(Applied::Thunk);
                }
                Ordering::Less => {
                    if self.trace {
                        tracing::trace!(
                            function = function.name(),
                            arity = function.arity(),
                            bound = function.bound().len(),
                            supplied = args.len(),
                            "partial application"
                        );
                    }
                    stats::record_partial_application();
                    return Ok(Applied::Partial(function.with_bound(args)));
                }
                Ordering::Greater => {
                    steps += 1;
                    if steps > self.config.max_chain_depth {
                        return Err(Fault::ChainTooDeep {
                            limit: self.config.max_chain_depth,
                        });
                    }
                    if self.trace {
                        tracing::trace!(
                            function = function.name(),
                            arity = function.arity(),
                            bound = function.bound().len(),
                            supplied = args.len(),
                            "over application"
                        );
                    }
                    stats::record_over_application();

                    let rest = args.split_off(need);
                    function = self.invoke_exact(&function, args)?.force()?.to_function()?;
                    args = rest;
                }
            }
        }
    }

    fn invoke_exact(&self, function: &Function, args: Args) -> Result<Thunk> {
        function.closure().invoke(function.saturate(args))
    }
}
