//! Display trees for external renderers.
//!
//! A display node is covered iff its path identifier is in the coverage set
//! produced by a diagnostic pass over the same expression.

use crate::compile::Evaluator;
use crate::env::Env;
use crate::expr::{Expr, Node, VAR_SIGIL};
use crate::path::{CoverageSet, PathId, Route};
use serde::Serialize;
use serde_json::Value;

/// Inferred type tag of a display node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Variable,
    Operation,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayNode {
    pub label: String,
    pub kind: NodeKind,
    pub value: String,
    pub path: PathId,
    /// `None` when the tree was built without a coverage set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covered: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Depth-first iteration over this node and its descendants.
    pub fn walk(&self) -> Vec<&DisplayNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    /// Finds the first node (depth-first) whose route equals `route`.
    pub fn find(&self, route: &str) -> Option<&DisplayNode> {
        self.walk().into_iter().find(|n| n.path.route() == route)
    }
}

/// Builds the display tree of `expr` with default options.
pub fn build_display_tree(expr: &Value, env: &Env, coverage: Option<&CoverageSet>) -> DisplayNode {
    Evaluator::new().build_display_tree(expr, env, coverage)
}

/// Builds the display tree of an already parsed node.
pub fn build_node_tree(root: &Node, env: &Env, coverage: Option<&CoverageSet>) -> DisplayNode {
    let mut builder = Builder {
        env,
        coverage,
        route: Route::default(),
    };
    builder.build("expression".to_string(), root)
}

struct Builder<'a> {
    env: &'a Env,
    coverage: Option<&'a CoverageSet>,
    route: Route,
}

impl Builder<'_> {
    fn build(&mut self, label: String, node: &Node) -> DisplayNode {
        let path = self.route.enter(&node.step, &node.signature);
        let children = node
            .children()
            .into_iter()
            .map(|(label, child)| self.build(label, child))
            .collect();
        self.route.leave(&node.step);
        let (kind, value) = self.describe(&node.expr);
        DisplayNode {
            label,
            kind,
            value,
            covered: self.coverage.map(|set| set.contains(&path)),
            path,
            children,
        }
    }

    fn describe(&self, expr: &Expr) -> (NodeKind, String) {
        match expr {
            Expr::Literal(value) => (literal_kind(value), value.to_string()),
            Expr::Var(name) => {
                let value = match self.env.get(name) {
                    Some(value) => format!("{VAR_SIGIL}{name} = {value}"),
                    None => format!("{VAR_SIGIL}{name} (undefined)"),
                };
                (NodeKind::Variable, value)
            }
            Expr::Seq(items) => (NodeKind::Array, format!("array({})", items.len())),
            other => match other.error() {
                Some(error) => (NodeKind::Invalid, error.to_string()),
                None => (
                    NodeKind::Operation,
                    other.operation().unwrap_or_default().to_string(),
                ),
            },
        }
    }
}

fn literal_kind(value: &Value) -> NodeKind {
    match value {
        Value::Null => NodeKind::Null,
        Value::Bool(_) => NodeKind::Boolean,
        Value::Number(_) => NodeKind::Number,
        Value::String(_) => NodeKind::String,
        Value::Array(_) => NodeKind::Array,
        Value::Object(_) => NodeKind::Object,
    }
}
