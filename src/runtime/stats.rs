//! Process-wide counters for the application core.
//!
//! Counters are relaxed atomics: cheap enough to bump on every call, precise
//! enough for diagnostics, and never used for synchronization.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeStats {
    pub lambdas: usize,
    pub closures: usize,
    pub functions: usize,
    pub invocations: usize,
    pub partial_applications: usize,
    pub over_applications: usize,
    pub thunks: usize,
    pub computations: usize,
    pub cache_hits: usize,
    pub cyclic_forces: usize,
}

impl RuntimeStats {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

static LAMBDAS: AtomicUsize = AtomicUsize::new(0);
static CLOSURES: AtomicUsize = AtomicUsize::new(0);
static FUNCTIONS: AtomicUsize = AtomicUsize::new(0);
static INVOCATIONS: AtomicUsize = AtomicUsize::new(0);
static PARTIAL_APPLICATIONS: AtomicUsize = AtomicUsize::new(0);
static OVER_APPLICATIONS: AtomicUsize = AtomicUsize::new(0);
static THUNKS: AtomicUsize = AtomicUsize::new(0);
static COMPUTATIONS: AtomicUsize = AtomicUsize::new(0);
static CACHE_HITS: AtomicUsize = AtomicUsize::new(0);
static CYCLIC_FORCES: AtomicUsize = AtomicUsize::new(0);

pub fn record_lambda() {
    LAMBDAS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_closure() {
    CLOSURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_function() {
    FUNCTIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_invocation() {
    INVOCATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_partial_application() {
    PARTIAL_APPLICATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_over_application() {
    OVER_APPLICATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_thunk() {
    THUNKS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_computation() {
    COMPUTATIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cache_hit() {
    CACHE_HITS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_cyclic_force() {
    CYCLIC_FORCES.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> RuntimeStats {
    RuntimeStats {
        lambdas: LAMBDAS.load(Ordering::Relaxed),
        closures: CLOSURES.load(Ordering::Relaxed),
        functions: FUNCTIONS.load(Ordering::Relaxed),
        invocations: INVOCATIONS.load(Ordering::Relaxed),
        partial_applications: PARTIAL_APPLICATIONS.load(Ordering::Relaxed),
        over_applications: OVER_APPLICATIONS.load(Ordering::Relaxed),
        thunks: THUNKS.load(Ordering::Relaxed),
        computations: COMPUTATIONS.load(Ordering::Relaxed),
        cache_hits: CACHE_HITS.load(Ordering::Relaxed),
        cyclic_forces: CYCLIC_FORCES.load(Ordering::Relaxed),
    }
}
