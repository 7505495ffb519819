#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use sloth::runtime::{
    Result, fault::Fault, function::Function, lambda::Lambda, thunk::Thunk, value::Value,
};

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}

pub fn force_int(value: &Value) -> Result<i64> {
    match value.force()? {
        Value::Integer(v) => Ok(v),
        other => Err(Fault::message(format!("expected Int, got {}", other.type_name()))),
    }
}

/// `f(x, y, z) = x + y + z`, evaluated lazily; `calls` counts body runs.
pub fn add3(calls: &Arc<AtomicUsize>) -> Function {
    let calls = calls.clone();
    let lambda = Lambda::fixed::<3>("add3", move |_, [x, y, z]| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Thunk(Thunk::new(move || {
            Ok(Value::Integer(force_int(&x)? + force_int(&y)? + force_int(&z)?))
        })))
    });
    match lambda {
        Ok(lambda) => Function::from_lambda(lambda),
        Err(fault) => panic!("add3: {}", fault),
    }
}

/// Curried addition returning a one-argument adder.
pub fn add2() -> Function {
    let lambda = Lambda::fixed::<2>("add2", |_, [a, b]| {
        let add1 = Lambda::fixed::<1>("add1", move |_, [c]| {
            Ok(Value::Integer(force_int(&a)? + force_int(&b)? + force_int(&c)?))
        })?;
        Ok(Value::Function(Function::from_lambda(add1)))
    });
    match lambda {
        Ok(lambda) => Function::from_lambda(lambda),
        Err(fault) => panic!("add2: {}", fault),
    }
}
