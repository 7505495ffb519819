use std::{any::Any, fmt, sync::Arc};

use crate::runtime::{Result, arity::Arity, fault::Fault, function::Function, thunk::Thunk};

/// Host payload carried through argument slots without interpretation.
///
/// Equality is pointer identity.
#[derive(Clone)]
pub struct Foreign(Arc<dyn Any + Send + Sync>);

impl Foreign {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &Foreign) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Foreign {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Foreign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Foreign({:p})", Arc::as_ptr(&self.0))
    }
}

/// Runtime value passed through argument slots, environments, and thunks.
///
/// ## Memory Management Model
///
/// Heap-backed variants share their payload through `Arc`, so cloning a value
/// is O(1) and values can cross worker threads. Primitives stay unboxed.
///
/// The application core never inspects argument contents: values are handed
/// to lambda bodies exactly as they were supplied, including unevaluated
/// `Thunk`s.
///
/// ### No-Cycle Invariant
///
/// Values form DAGs. A thunk whose computation refers back to its own cell is
/// the only sanctioned back-edge, and it is broken as soon as the cell is
/// forced (the computation is consumed on first force).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// UTF-8 string value.
    String(Arc<str>),
    /// The unit value.
    Unit,
    /// Ordered collection of values.
    Array(Arc<Vec<Value>>),
    /// Callable value, possibly with bound arguments.
    Function(Function),
    /// Deferred result cell.
    Thunk(Thunk),
    /// Opaque host value.
    Foreign(Foreign),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Unit => write!(f, "()"),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Function(function) => write!(f, "{}", function),
            Value::Thunk(thunk) => match thunk.peek() {
                Some(value) => write!(f, "{}", value),
                None => write!(f, "<thunk>"),
            },
            Value::Foreign(_) => write!(f, "<foreign>"),
        }
    }
}

impl Value {
    /// Returns the canonical runtime type label used in faults.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Int",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Bool",
            Value::String(_) => "String",
            Value::Unit => "Unit",
            Value::Array(_) => "Array",
            Value::Function(_) => "Function",
            Value::Thunk(_) => "Thunk",
            Value::Foreign(_) => "Foreign",
        }
    }

    /// Returns the callable behind this value without forcing anything.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Reduces the value to weak head normal form.
    ///
    /// Thunks are forced (and memoized); every other variant is returned as a
    /// cheap clone.
    pub fn force(&self) -> Result<Value> {
        match self {
            Value::Thunk(thunk) => thunk.force(),
            other => Ok(other.clone()),
        }
    }
}

/// Only `Value::Function` is callable; every other variant has arity 0 and
/// reports [`Fault::NotCallable`].
impl Arity for Value {
    fn arity(&self) -> usize {
        self.as_function().map_or(0, |function| function.arity())
    }

    fn to_function(&self) -> Result<Function> {
        match self {
            Value::Function(function) => Ok(function.clone()),
            other => Err(Fault::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(Arc::new(values))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Thunk> for Value {
    fn from(thunk: Thunk) -> Self {
        Value::Thunk(thunk)
    }
}

impl From<Foreign> for Value {
    fn from(foreign: Foreign) -> Self {
        Value::Foreign(foreign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::lambda::Lambda;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Unit.to_string(), "()");
        assert_eq!(
            Value::from(vec![Value::Integer(1), Value::from("a")]).to_string(),
            "[1, \"a\"]"
        );
    }

    #[test]
    fn test_thunk_display_shows_value_only_once_forced() {
        let thunk = Thunk::new(|| Ok(Value::Integer(7)));
        let value = Value::Thunk(thunk.clone());
        assert_eq!(value.to_string(), "<thunk>");

        thunk.force().unwrap();
        assert_eq!(value.to_string(), "7");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Integer(1).type_name(), "Int");
        assert_eq!(Value::Float(1.0).type_name(), "Float");
        assert_eq!(Value::Boolean(true).type_name(), "Bool");
        assert_eq!(Value::from("x").type_name(), "String");
        assert_eq!(Value::Unit.type_name(), "Unit");
        assert_eq!(Value::from(vec![]).type_name(), "Array");
        assert_eq!(
            Value::Thunk(Thunk::evaluated(Value::Unit)).type_name(),
            "Thunk"
        );
        assert_eq!(Value::from(Foreign::new(1u8)).type_name(), "Foreign");
    }

    #[test]
    fn test_foreign_equality_is_identity() {
        let handle = Foreign::new(String::from("socket"));
        let value = Value::from(handle.clone());

        assert_eq!(value, Value::Foreign(handle.clone()));
        assert_ne!(value, Value::from(Foreign::new(String::from("socket"))));
        assert_eq!(value.to_string(), "<foreign>");
        assert_eq!(
            handle.downcast_ref::<String>().map(String::as_str),
            Some("socket")
        );
        assert!(handle.downcast_ref::<i64>().is_none());
    }

    #[test]
    fn test_only_functions_satisfy_arity_contract() {
        let pair = Function::from_lambda(
            Lambda::fixed::<2>("pair", |_, [a, b]| Ok(Value::from(vec![a, b]))).unwrap(),
        );
        let value = Value::Function(pair.clone());
        assert_eq!(value.arity(), 2);
        assert_eq!(value.to_function().unwrap(), pair);

        let err = Value::Integer(1).to_function().unwrap_err();
        assert!(matches!(err, Fault::NotCallable { type_name: "Int" }));
        assert_eq!(Value::Integer(1).arity(), 0);
    }

    #[test]
    fn test_force_passes_plain_values_through() {
        assert_eq!(Value::Integer(3).force().unwrap(), Value::Integer(3));
    }

    #[test]
    fn test_force_propagates_thunk_faults() {
        let value = Value::Thunk(Thunk::new(|| Err(Fault::message("boom"))));
        let err = value.force().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_clone_shares_arc_for_string_and_array() {
        let value = Value::from("hello");
        let cloned = value.clone();
        match (value, cloned) {
            (Value::String(left), Value::String(right)) => {
                assert!(Arc::ptr_eq(&left, &right));
                assert_eq!(Arc::strong_count(&left), 2);
            }
            _ => panic!("expected string values"),
        }

        let array = Value::from(vec![Value::Integer(1), Value::Integer(2)]);
        let array_clone = array.clone();
        match (array, array_clone) {
            (Value::Array(left), Value::Array(right)) => {
                assert!(Arc::ptr_eq(&left, &right));
                assert_eq!(Arc::strong_count(&left), 2);
            }
            _ => panic!("expected array values"),
        }
    }

    #[test]
    fn test_values_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
    }
}
