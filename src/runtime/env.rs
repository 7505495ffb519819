use std::{slice, sync::Arc};

use crate::runtime::value::Value;

/// Free variables captured by a closure when it is built.
///
/// Captured bindings are shared, never copied or mutated, and are usually
/// thunks so that capturing does not force anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Env {
    values: Arc<[Value]>,
}

impl Default for Env {
    fn default() -> Self {
        Self::empty()
    }
}

impl Env {
    pub fn empty() -> Self {
        Self {
            values: Arc::from(Vec::new()),
        }
    }

    pub fn capture(values: Vec<Value>) -> Self {
        Self {
            values: Arc::from(values),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl FromIterator<Value> for Env {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::capture(iter.into_iter().collect())
    }
}
