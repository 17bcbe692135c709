//! Node-boundary hooks.
//!
//! Both evaluators run the same reduction routine; they differ only in the
//! [`Tracer`] wrapped around every node.

use crate::error::EvalError;
use crate::expr::Node;
use crate::path::{CoverageSet, PathId, Route};
use serde::Serialize;
use serde_json::Value;

/// Value substituted by the diagnostic evaluator for a node that failed.
pub const PLACEHOLDER: &str = "<error>";

pub(crate) trait Tracer {
    /// Called before a node is reduced.
    fn enter(&mut self, node: &Node);

    /// Called with the node's result; the returned result is what the parent
    /// sees.
    fn leave(&mut self, node: &Node, result: Result<Value, EvalError>) -> Result<Value, EvalError>;
}

/// Strict evaluation: no bookkeeping, failures pass through.
pub(crate) struct Strict;

impl Tracer for Strict {
    #[inline]
    fn enter(&mut self, _node: &Node) {}

    #[inline]
    fn leave(&mut self, _node: &Node, result: Result<Value, EvalError>) -> Result<Value, EvalError> {
        result
    }
}

/// A failure swallowed by the diagnostic evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub path: PathId,
    #[serde(serialize_with = "error_text")]
    pub error: EvalError,
}

fn error_text<S: serde::Serializer>(error: &EvalError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of a diagnostic pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Traced {
    pub value: Value,
    pub coverage: CoverageSet,
    /// Failures in the order they were swallowed (innermost first).
    pub failures: Vec<Failure>,
}

/// Diagnostic evaluation: records every visited node and replaces failures
/// with [`PLACEHOLDER`].
#[derive(Default)]
pub(crate) struct Coverage {
    route: Route,
    ids: Vec<PathId>,
    coverage: CoverageSet,
    failures: Vec<Failure>,
}

impl Coverage {
    pub(crate) fn finish(self, value: Value) -> Traced {
        Traced {
            value,
            coverage: self.coverage,
            failures: self.failures,
        }
    }
}

impl Tracer for Coverage {
    fn enter(&mut self, node: &Node) {
        let id = self.route.enter(&node.step, &node.signature);
        self.coverage.insert(id.clone());
        self.ids.push(id);
    }

    fn leave(&mut self, node: &Node, result: Result<Value, EvalError>) -> Result<Value, EvalError> {
        self.route.leave(&node.step);
        let id = self.ids.pop();
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                if let Some(path) = id {
                    tracing::debug!(path = %path, %error, "substituting placeholder");
                    self.failures.push(Failure { path, error });
                }
                Ok(Value::String(PLACEHOLDER.to_string()))
            }
        }
    }
}
