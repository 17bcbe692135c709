//! The reduction routine shared by the strict and diagnostic evaluators.

use crate::compile::Evaluator;
use crate::env::Env;
use crate::error::EvalError;
use crate::expr::{Expr, Node};
use crate::operators::{branching, logical, scope, string};
use crate::trace::{Coverage, Strict, Traced, Tracer};
use serde_json::Value;

/// Evaluates `expr` under `env` with default options.
///
/// - Null and primitives are returned as-is, except `$name` strings, which are
///   resolved in `env`.
/// - Sequences are evaluated element-wise.
/// - Mappings dispatch on their operation key; `{}` evaluates to itself.
///
/// The first failure propagates to the caller unchanged.
pub fn evaluate(expr: &Value, env: &Env) -> Result<Value, EvalError> {
    Evaluator::new().evaluate(expr, env)
}

/// Evaluates `expr` under `env` without ever failing, recording the path of
/// every visited node. Failed nodes evaluate to [`crate::PLACEHOLDER`].
pub fn evaluate_with_coverage(expr: &Value, env: &Env) -> Traced {
    Evaluator::new().evaluate_with_coverage(expr, env)
}

/// Strict evaluation of an already parsed node.
pub fn evaluate_node(node: &Node, env: &Env) -> Result<Value, EvalError> {
    reduce(node, env, &mut Strict)
}

/// Diagnostic evaluation of an already parsed node.
pub fn trace_node(node: &Node, env: &Env) -> Traced {
    let mut coverage = Coverage::default();
    let value = match reduce(node, env, &mut coverage) {
        Ok(value) => value,
        // The root boundary already replaced any failure.
        Err(_) => Value::String(crate::trace::PLACEHOLDER.to_string()),
    };
    let traced = coverage.finish(value);
    tracing::debug!(
        visited = traced.coverage.len(),
        failures = traced.failures.len(),
        "coverage pass complete"
    );
    traced
}

pub(crate) fn reduce<T: Tracer>(node: &Node, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    tracer.enter(node);
    let result = reduce_expr(&node.expr, env, tracer);
    tracer.leave(node, result)
}

fn reduce_expr<T: Tracer>(expr: &Expr, env: &Env, tracer: &mut T) -> Result<Value, EvalError> {
    if let Some(name) = expr.operation() {
        tracing::trace!(operation = name, "dispatch");
    }
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Var(name) => env.resolve(name),
        Expr::Seq(items) => items
            .iter()
            .map(|item| reduce(item, env, tracer))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Expr::Let { bindings, body } => scope::let_eval(bindings, body, env, tracer),
        Expr::Concat(items) => string::concat_eval(items, env, tracer),
        Expr::Uppercase(value) => string::uppercase_eval(value, env, tracer),
        Expr::Lowercase(value) => string::lowercase_eval(value, env, tracer),
        Expr::Length(value) => string::length_eval(value, env, tracer),
        Expr::Substring { value, start, end } => {
            string::substring_eval(value, start, end.as_deref(), env, tracer)
        }
        Expr::And(items) => logical::and_eval(items, env, tracer),
        Expr::Or(items) => logical::or_eval(items, env, tracer),
        Expr::Not(value) => logical::not_eval(value, env, tracer),
        Expr::Equals { left, right } => logical::equals_eval(left, right, env, tracer),
        Expr::If {
            condition,
            then,
            otherwise,
        } => branching::if_eval(condition, then.as_deref(), otherwise.as_deref(), env, tracer),
        Expr::Unknown(name) => Err(EvalError::UnknownOperation(name.clone())),
        Expr::Malformed { operation, reason } => Err(EvalError::malformed(*operation, reason.clone())),
        Expr::TooDeep { limit } => Err(EvalError::EvaluationDepthExceeded { limit: *limit }),
    }
}
