//! The `let` operator.

use crate::env::Env;
use crate::error::EvalError;
use crate::evaluate::reduce;
use crate::expr::Node;
use crate::trace::Tracer;
use serde_json::Value;

/// Installs bindings in order, each one seeing the earlier ones, then reduces
/// the body in the extended scope.
///
/// The extended scope is a child of `env`; `env` itself is never modified, so
/// nothing bound here is visible once this returns, whether or not it failed.
pub(crate) fn let_eval<T: Tracer>(
    bindings: &[(String, Node)],
    body: &Node,
    env: &Env,
    tracer: &mut T,
) -> Result<Value, EvalError> {
    let mut scope = env.clone();
    for (name, expr) in bindings {
        let value = reduce(expr, &scope, tracer)?;
        scope = scope.with(name.as_str(), value);
    }
    reduce(body, &scope, tracer)
}
