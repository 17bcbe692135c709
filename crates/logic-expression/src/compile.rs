//! Option-carrying evaluator and pre-parsed expressions.

use crate::display::{build_node_tree, DisplayNode};
use crate::env::Env;
use crate::error::EvalError;
use crate::evaluate::{evaluate_node, trace_node};
use crate::expr::Node;
use crate::options::EvalOptions;
use crate::parse::parse_with;
use crate::path::CoverageSet;
use crate::trace::Traced;
use serde_json::Value;

/// Evaluator configured with [`EvalOptions`].
///
/// The free functions [`crate::evaluate`], [`crate::evaluate_with_coverage`]
/// and [`crate::build_display_tree`] use `Evaluator::default()`.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvalOptions,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    pub fn with_options(options: EvalOptions) -> Self {
        Evaluator { options }
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Parses `expr` once so it can be evaluated many times.
    pub fn compile(&self, expr: &Value) -> CompiledExpr {
        CompiledExpr {
            root: parse_with(expr, &self.options),
        }
    }

    pub fn evaluate(&self, expr: &Value, env: &Env) -> Result<Value, EvalError> {
        self.compile(expr).evaluate(env)
    }

    pub fn evaluate_with_coverage(&self, expr: &Value, env: &Env) -> Traced {
        self.compile(expr).evaluate_with_coverage(env)
    }

    pub fn build_display_tree(
        &self,
        expr: &Value,
        env: &Env,
        coverage: Option<&CoverageSet>,
    ) -> DisplayNode {
        self.compile(expr).display_tree(env, coverage)
    }
}

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    root: Node,
}

impl CompiledExpr {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn evaluate(&self, env: &Env) -> Result<Value, EvalError> {
        evaluate_node(&self.root, env)
    }

    pub fn evaluate_with_coverage(&self, env: &Env) -> Traced {
        trace_node(&self.root, env)
    }

    pub fn display_tree(&self, env: &Env, coverage: Option<&CoverageSet>) -> DisplayNode {
        build_node_tree(&self.root, env, coverage)
    }
}
