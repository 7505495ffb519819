//! Faults raised while invoking, applying, or forcing.
//!
//! Every fault propagates synchronously to the caller of `force`, `invoke`, or
//! `apply`. Nothing in the core retries or recovers.

use std::{error::Error as StdError, fmt, sync::Arc};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub code: &'static str,
    pub title: &'static str,
}

pub const WRONG_NUMBER_OF_ARGUMENTS: ErrorCode = ErrorCode {
    code: "E1000",
    title: "WRONG NUMBER OF ARGUMENTS",
};

pub const NOT_A_FUNCTION: ErrorCode = ErrorCode {
    code: "E1001",
    title: "NOT A FUNCTION",
};

pub const EVALUATION_FAULT: ErrorCode = ErrorCode {
    code: "E1003",
    title: "EVALUATION FAULT",
};

pub const CYCLIC_FORCE: ErrorCode = ErrorCode {
    code: "E1010",
    title: "INFINITE LOOP IN LAZY BINDING",
};

pub const ARITY_OUT_OF_RANGE: ErrorCode = ErrorCode {
    code: "E1011",
    title: "ARITY OUT OF RANGE",
};

pub const APPLICATION_TOO_DEEP: ErrorCode = ErrorCode {
    code: "E1012",
    title: "APPLICATION TOO DEEP",
};

pub const PANIC_IN_THUNK: ErrorCode = ErrorCode {
    code: "E1013",
    title: "PANIC IN THUNK",
};

/// A fault raised by user-level code inside a lambda body or thunk.
///
/// The original error is kept behind an `Arc` so the fault can be cached in a
/// failed thunk and handed to every later forcer unchanged.
#[derive(Clone)]
pub struct BodyFault(Arc<dyn StdError + Send + Sync>);

impl BodyFault {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    pub fn message(message: impl Into<String>) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = message.into().into();
        Self(Arc::from(boxed))
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for BodyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyFault({:?})", self.0)
    }
}

impl fmt::Display for BodyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Error)]
pub enum Fault {
    /// An invoker was called with other than its exact argument count.
    #[error("function `{name}` expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: Arc<str>,
        expected: usize,
        got: usize,
    },

    /// Application reached a value that is not callable.
    #[error("cannot apply a non-function value (got {type_name})")]
    NotCallable { type_name: &'static str },

    /// A thunk was forced again while its own computation was running.
    #[error("thunk forced while it was being evaluated")]
    CyclicForce,

    #[error("arity {arity} exceeds the maximum supported arity {max}")]
    ArityOutOfRange { arity: usize, max: usize },

    #[error("application chain exceeded {limit} steps")]
    ChainTooDeep { limit: usize },

    #[error("computation panicked while being forced")]
    Panicked,

    #[error("{0}")]
    Body(BodyFault),
}

impl Fault {
    /// Wraps a user-level error as a body fault.
    pub fn body<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Fault::Body(BodyFault::new(error))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Fault::Body(BodyFault::message(message))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Fault::ArityMismatch { .. } => WRONG_NUMBER_OF_ARGUMENTS,
            Fault::NotCallable { .. } => NOT_A_FUNCTION,
            Fault::CyclicForce => CYCLIC_FORCE,
            Fault::ArityOutOfRange { .. } => ARITY_OUT_OF_RANGE,
            Fault::ChainTooDeep { .. } => APPLICATION_TOO_DEEP,
            Fault::Panicked => PANIC_IN_THUNK,
            Fault::Body(_) => EVALUATION_FAULT,
        }
    }

    /// Returns `true` for faults that only a broken producer can trigger.
    ///
    /// Well-typed programs applied through the resolver never see these.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Fault::ArityMismatch { .. } | Fault::NotCallable { .. }
        )
    }

    /// Renders the fault with its code and title for diagnostics output.
    pub fn render(&self) -> String {
        let code = self.code();
        format!("error[{}]: {}\n\n{}.", code.code, code.title, self)
    }
}
