//! String operators: `concat`, `uppercase`, `lowercase`, `length`, `substring`.

use crate::env::Env;
use crate::error::EvalError;
use crate::evaluate::reduce;
use crate::expr::Node;
use crate::trace::Tracer;
use crate::util;
use serde_json::Value;

fn string_of<T: Tracer>(node: &Node, env: &Env, tracer: &mut T) -> Result<String, EvalError> {
    Ok(util::str_val(&reduce(node, env, tracer)?))
}

pub(crate) fn concat_eval<T: Tracer>(items: &[Node], env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    let mut result = String::new();
    for item in items {
        result.push_str(&string_of(item, env, tracer)?);
    }
    Ok(Value::String(result))
}

pub(crate) fn uppercase_eval<T: Tracer>(value: &Node, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    Ok(Value::String(string_of(value, env, tracer)?.to_uppercase()))
}

pub(crate) fn lowercase_eval<T: Tracer>(value: &Node, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    Ok(Value::String(string_of(value, env, tracer)?.to_lowercase()))
}

pub(crate) fn length_eval<T: Tracer>(value: &Node, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    let count = string_of(value, env, tracer)?.chars().count();
    Ok(Value::from(count as u64))
}

pub(crate) fn substring_eval<T: Tracer>(
    value: &Node,
    start: &Node,
    end: Option<&Node>,
    env: &Env,
    tracer: &mut T,
) -> Result<Value, EvalError> {
    let s = string_of(value, env, tracer)?;
    let start = util::num(&reduce(start, env, tracer)?);
    let end = match end {
        Some(end) => Some(util::num(&reduce(end, env, tracer)?)),
        None => None,
    };
    Ok(Value::String(util::substring(&s, start, end)))
}
