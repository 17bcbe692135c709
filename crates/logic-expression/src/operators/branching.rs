//! The `if` operator.

use crate::env::Env;
use crate::error::EvalError;
use crate::evaluate::reduce;
use crate::expr::Node;
use crate::trace::Tracer;
use crate::util;
use serde_json::Value;

/// Only the selected branch is reduced. A missing branch yields `null`.
pub(crate) fn if_eval<T: Tracer>(
    condition: &Node,
    then: Option<&Node>,
    otherwise: Option<&Node>,
    env: &Env,
    tracer: &mut T,
) -> Result<Value, EvalError> {
    let condition = reduce(condition, env, tracer)?;
    let branch = if util::is_truthy(&condition) { then } else { otherwise };
    match branch {
        Some(branch) => reduce(branch, env, tracer),
        None => Ok(Value::Null),
    }
}
