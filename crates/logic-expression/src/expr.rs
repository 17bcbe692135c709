//! Typed expression tree.
//!
//! Source trees are `serde_json::Value`s; [`crate::parse`] normalizes them into
//! [`Node`]s once, so evaluation never has to sniff payload shapes.

use crate::error::EvalError;
use crate::path::Signature;
use serde_json::Value;

/// Sigil marking a string as a variable reference.
pub const VAR_SIGIL: char = '$';

/// One parsed node of the source tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub expr: Expr,
    /// Accessors leading from the parent's source value to this node's source
    /// value. Empty for the root.
    pub step: Vec<String>,
    /// Structural signature of the source value.
    pub signature: Signature,
}

/// Expression variants, one per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Null, booleans, numbers, non-reference strings and the empty mapping.
    Literal(Value),
    Var(String),
    Seq(Vec<Node>),
    Let {
        bindings: Vec<(String, Node)>,
        body: Box<Node>,
    },
    Concat(Vec<Node>),
    Uppercase(Box<Node>),
    Lowercase(Box<Node>),
    Length(Box<Node>),
    Substring {
        value: Box<Node>,
        start: Box<Node>,
        end: Option<Box<Node>>,
    },
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Box<Node>),
    Equals {
        left: Box<Node>,
        right: Box<Node>,
    },
    If {
        condition: Box<Node>,
        then: Option<Box<Node>>,
        otherwise: Option<Box<Node>>,
    },
    /// A mapping whose key names no known operation.
    Unknown(String),
    /// A known operation with an unusable payload.
    Malformed {
        operation: &'static str,
        reason: String,
    },
    /// Nesting went past the configured depth limit.
    TooDeep { limit: usize },
}

impl Expr {
    /// Operation name, for operation variants.
    pub fn operation(&self) -> Option<&str> {
        Some(match self {
            Expr::Let { .. } => "let",
            Expr::Concat(_) => "concat",
            Expr::Uppercase(_) => "uppercase",
            Expr::Lowercase(_) => "lowercase",
            Expr::Length(_) => "length",
            Expr::Substring { .. } => "substring",
            Expr::And(_) => "and",
            Expr::Or(_) => "or",
            Expr::Not(_) => "not",
            Expr::Equals { .. } => "equals",
            Expr::If { .. } => "if",
            Expr::Unknown(name) => name.as_str(),
            Expr::Malformed { operation, .. } => *operation,
            Expr::Literal(_) | Expr::Var(_) | Expr::Seq(_) | Expr::TooDeep { .. } => return None,
        })
    }

    /// The error this node raises as soon as it is evaluated, if any.
    pub fn error(&self) -> Option<EvalError> {
        match self {
            Expr::Unknown(name) => Some(EvalError::UnknownOperation(name.clone())),
            Expr::Malformed { operation, reason } => Some(EvalError::malformed(*operation, reason.clone())),
            Expr::TooDeep { limit } => Some(EvalError::EvaluationDepthExceeded { limit: *limit }),
            _ => None,
        }
    }
}

impl Node {
    /// Direct children in source order, each with its role in the parent:
    /// `[i]` for sequence items, the binding name or `in` for `let`, the field
    /// name for named operands.
    pub fn children(&self) -> Vec<(String, &Node)> {
        fn indexed(items: &[Node]) -> Vec<(String, &Node)> {
            items
                .iter()
                .enumerate()
                .map(|(i, n)| (format!("[{i}]"), n))
                .collect()
        }
        match &self.expr {
            Expr::Seq(items) | Expr::Concat(items) | Expr::And(items) | Expr::Or(items) => {
                indexed(items)
            }
            Expr::Let { bindings, body } => {
                let mut out: Vec<(String, &Node)> =
                    bindings.iter().map(|(name, n)| (name.clone(), n)).collect();
                out.push(("in".to_string(), &**body));
                out
            }
            Expr::Uppercase(v) | Expr::Lowercase(v) | Expr::Length(v) | Expr::Not(v) => {
                vec![("value".to_string(), &**v)]
            }
            Expr::Substring { value, start, end } => {
                let mut out = vec![("value".to_string(), &**value), ("start".to_string(), &**start)];
                out.extend(end.as_deref().map(|n| ("end".to_string(), n)));
                out
            }
            Expr::Equals { left, right } => {
                vec![("left".to_string(), &**left), ("right".to_string(), &**right)]
            }
            Expr::If {
                condition,
                then,
                otherwise,
            } => {
                let mut out = vec![("condition".to_string(), &**condition)];
                out.extend(then.as_deref().map(|n| ("then".to_string(), n)));
                out.extend(otherwise.as_deref().map(|n| ("else".to_string(), n)));
                out
            }
            Expr::Literal(_)
            | Expr::Var(_)
            | Expr::Unknown(_)
            | Expr::Malformed { .. }
            | Expr::TooDeep { .. } => Vec::new(),
        }
    }
}
