//! Logical operators: `and`, `or`, `not`, `equals`.
//!
//! `and` and `or` evaluate every operand; there is no short-circuit.

use crate::env::Env;
use crate::error::EvalError;
use crate::evaluate::reduce;
use crate::expr::Node;
use crate::trace::Tracer;
use crate::util;
use serde_json::Value;

fn truthiness<T: Tracer>(items: &[Node], env: &Env, tracer: &mut T) -> Result<Vec<bool>, EvalError> {
    items
        .iter()
        .map(|item| reduce(item, env, tracer).map(|v| util::is_truthy(&v)))
        .collect()
}

pub(crate) fn and_eval<T: Tracer>(items: &[Node], env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    let flags = truthiness(items, env, tracer)?;
    Ok(Value::Bool(flags.into_iter().all(|b| b)))
}

pub(crate) fn or_eval<T: Tracer>(items: &[Node], env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    let flags = truthiness(items, env, tracer)?;
    Ok(Value::Bool(flags.into_iter().any(|b| b)))
}

pub(crate) fn not_eval<T: Tracer>(value: &Node, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    let val = reduce(value, env, tracer)?;
    Ok(Value::Bool(!util::is_truthy(&val)))
}

pub(crate) fn equals_eval<T: Tracer>(left: &Node, right: &Node, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    let left = reduce(left, env, tracer)?;
    let right = reduce(right, env, tracer)?;
    Ok(Value::Bool(util::same_value(&left, &right)))
}
