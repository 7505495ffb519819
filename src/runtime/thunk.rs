//! Memoizing deferred result cells.
//!
//! A cell moves `Unevaluated -> Evaluating -> Evaluated` exactly once. The
//! thread that claims the cell runs the computation; concurrent forcers block
//! on the cell's condition variable until the value (or fault) is published.
//! Forcing a cell from inside its own computation is a [`Fault::CyclicForce`].

use std::{
    fmt, mem,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread::{self, ThreadId},
};

use rayon::prelude::*;

use crate::runtime::{Result, fault::Fault, stats, value::Value};

type Computation = Box<dyn FnOnce() -> Result<Value> + Send>;

enum State {
    Unevaluated(Computation),
    Evaluating(ThreadId),
    Evaluated(Value),
    /// The computation failed; the fault is replayed to every later forcer.
    Failed(Fault),
}

struct Cell {
    state: Mutex<State>,
    ready: Condvar,
}

impl Cell {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, state: State) {
        *self.lock() = state;
        self.ready.notify_all();
    }
}

/// Publishes `Failed(Panicked)` if the computation unwinds before finishing,
/// so waiting forcers are released.
struct Publish<'a> {
    cell: &'a Cell,
    done: bool,
}

impl Publish<'_> {
    fn finish(mut self, state: State) {
        self.cell.settle(state);
        self.done = true;
    }
}

impl Drop for Publish<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.cell.settle(State::Failed(Fault::Panicked));
        }
    }
}

/// Shared handle to a deferred result cell.
#[derive(Clone)]
pub struct Thunk {
    cell: Arc<Cell>,
}

impl Thunk {
    /// Suspends `computation` until the first force.
    pub fn new<F>(computation: F) -> Self
    where
        F: FnOnce() -> Result<Value> + Send + 'static,
    {
        Self::with_state(State::Unevaluated(Box::new(computation)))
    }

    /// Wraps an already-known value.
    ///
    /// A `Value::Thunk` is returned as the same cell rather than nested.
    pub fn evaluated(value: Value) -> Self {
        match value {
            Value::Thunk(thunk) => thunk,
            value => Self::with_state(State::Evaluated(value)),
        }
    }

    fn with_state(state: State) -> Self {
        stats::record_thunk();
        Self {
            cell: Arc::new(Cell {
                state: Mutex::new(state),
                ready: Condvar::new(),
            }),
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(*self.cell.lock(), State::Evaluated(_))
    }

    /// Returns the cached value without forcing.
    pub fn peek(&self) -> Option<Value> {
        match &*self.cell.lock() {
            State::Evaluated(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Thunk) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Evaluates the cell to weak head normal form and caches the result.
    ///
    /// The computation runs at most once per cell, no matter how many threads
    /// force it. If it yields another thunk, that thunk is forced as well and
    /// the final value is what gets cached.
    pub fn force(&self) -> Result<Value> {
        let me = thread::current().id();
        let computation = {
            let mut state = self.cell.lock();
            loop {
                match mem::replace(&mut *state, State::Evaluating(me)) {
                    State::Unevaluated(computation) => break computation,
                    State::Evaluated(value) => {
                        *state = State::Evaluated(value.clone());
                        stats::record_cache_hit();
                        return Ok(value);
                    }
                    State::Failed(fault) => {
                        *state = State::Failed(fault.clone());
                        return Err(fault);
                    }
                    State::Evaluating(owner) => {
                        *state = State::Evaluating(owner);
                        if owner == me {
                            stats::record_cyclic_force();
                            tracing::debug!("cyclic force detected");
                            return Err(Fault::CyclicForce);
                        }
                        tracing::trace!(?owner, "waiting for thunk owned by another thread");
                        state = self
                            .cell
                            .ready
                            .wait(state)
                            .unwrap_or_else(PoisonError::into_inner);
                    }
                }
            }
        };

        tracing::trace!("computing thunk");
        stats::record_computation();
        let publish = Publish {
            cell: &self.cell,
            done: false,
        };
        let outcome = computation().and_then(|value| value.force());
        publish.finish(match &outcome {
            Ok(value) => State::Evaluated(value.clone()),
            Err(fault) => State::Failed(fault.clone()),
        });
        outcome
    }
}

impl From<Value> for Thunk {
    fn from(value: Value) -> Self {
        Thunk::evaluated(value)
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.cell.lock() {
            State::Unevaluated(_) => write!(f, "Thunk(<unevaluated>)"),
            State::Evaluating(_) => write!(f, "Thunk(<evaluating>)"),
            State::Evaluated(value) => write!(f, "Thunk({:?})", value),
            State::Failed(fault) => write!(f, "Thunk(<failed: {}>)", fault),
        }
    }
}

/// Forces independent thunks in parallel on the rayon pool.
///
/// Values come back in input order. The first fault encountered is returned.
pub fn force_all(thunks: &[Thunk]) -> Result<Vec<Value>> {
    thunks.par_iter().map(Thunk::force).collect()
}
