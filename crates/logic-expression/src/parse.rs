//! Normalization of source values into typed [`Node`]s.
//!
//! Parsing never fails. Payloads that cannot be used become
//! [`Expr::Malformed`], unrecognized operation keys become [`Expr::Unknown`],
//! and anything nested past the depth limit becomes [`Expr::TooDeep`]. Those
//! nodes raise only when evaluated, so an invalid branch that is never taken
//! never fails.

use crate::expr::{Expr, Node, VAR_SIGIL};
use crate::options::EvalOptions;
use crate::path::Signature;
use serde_json::{Map, Value};

/// Operation keys of the canonical dialect.
pub const OPERATIONS: &[&str] = &[
    "let",
    "concat",
    "uppercase",
    "lowercase",
    "length",
    "substring",
    "and",
    "or",
    "not",
    "equals",
    "if",
];

/// Variable access operation of the legacy dialect.
const LEGACY_GET: &str = "get";

/// Parses `value` with default options.
pub fn parse(value: &Value) -> Node {
    parse_with(value, &EvalOptions::default())
}

/// Parses `value` with the given options.
pub fn parse_with(value: &Value, options: &EvalOptions) -> Node {
    Parser { options }.node(value, Vec::new(), 0)
}

struct Parser<'a> {
    options: &'a EvalOptions,
}

fn step(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

impl Parser<'_> {
    fn node(&self, value: &Value, step: Vec<String>, depth: usize) -> Node {
        let expr = if depth >= self.options.max_depth {
            Expr::TooDeep {
                limit: self.options.max_depth,
            }
        } else {
            self.expr(value, depth)
        };
        Node {
            expr,
            step,
            signature: Signature::of(value),
        }
    }

    fn child(&self, value: &Value, segments: &[&str], depth: usize) -> Box<Node> {
        Box::new(self.node(value, step(segments), depth + 1))
    }

    fn expr(&self, value: &Value, depth: usize) -> Expr {
        match value {
            Value::String(s) => match s.strip_prefix(VAR_SIGIL) {
                Some(name) => Expr::Var(name.to_string()),
                None => Expr::Literal(value.clone()),
            },
            Value::Array(items) => Expr::Seq(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.node(item, vec![i.to_string()], depth + 1))
                    .collect(),
            ),
            Value::Object(map) => self.operation(map, depth),
            _ => Expr::Literal(value.clone()),
        }
    }

    fn is_operation(&self, key: &str) -> bool {
        OPERATIONS.contains(&key) || (self.options.legacy && key == LEGACY_GET)
    }

    fn operation(&self, map: &Map<String, Value>, depth: usize) -> Expr {
        let key = match map.keys().find(|k| self.is_operation(k)).or_else(|| map.keys().next()) {
            Some(key) => key.as_str(),
            None => return Expr::Literal(Value::Object(Map::new())),
        };
        let payload = &map[key];
        match key {
            "let" => self.let_op(payload, depth),
            "concat" => self.values("concat", payload, depth).map_or_else(|e| e, Expr::Concat),
            "and" => self.values("and", payload, depth).map_or_else(|e| e, Expr::And),
            "or" => self.values("or", payload, depth).map_or_else(|e| e, Expr::Or),
            "uppercase" => Expr::Uppercase(self.value("uppercase", payload, depth)),
            "lowercase" => Expr::Lowercase(self.value("lowercase", payload, depth)),
            "length" => Expr::Length(self.value("length", payload, depth)),
            "not" => Expr::Not(self.value("not", payload, depth)),
            "substring" => self.substring(payload, depth),
            "equals" => self.equals(payload, depth),
            "if" => self.if_op(map, payload, depth),
            LEGACY_GET if self.options.legacy => legacy_get(payload),
            other => Expr::Unknown(other.to_string()),
        }
    }

    /// Sequence payload: `[..]` or `{values: [..]}`.
    fn values(&self, op: &'static str, payload: &Value, depth: usize) -> Result<Vec<Node>, Expr> {
        const DIRECT: &[&str] = &[];
        const NAMED: &[&str] = &["values"];
        let (items, prefix) = match payload {
            Value::Array(items) => (items, DIRECT),
            Value::Object(fields) => match fields.get("values") {
                Some(Value::Array(items)) => (items, NAMED),
                Some(_) => return Err(malformed(op, "`values` must be a sequence")),
                None => return Err(malformed(op, "expected a sequence or `values` field")),
            },
            _ => return Err(malformed(op, "expected a sequence or `values` field")),
        };
        Ok(items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let index = i.to_string();
                let mut segments = vec![op];
                segments.extend_from_slice(prefix);
                segments.push(&index);
                *self.child(item, &segments, depth)
            })
            .collect())
    }

    /// Single-value payload: the value itself or `{value: ..}`.
    fn value(&self, op: &'static str, payload: &Value, depth: usize) -> Box<Node> {
        match payload.get("value") {
            Some(inner) if payload.is_object() => self.child(inner, &[op, "value"], depth),
            _ => self.child(payload, &[op], depth),
        }
    }

    fn let_op(&self, payload: &Value, depth: usize) -> Expr {
        let Value::Object(fields) = payload else {
            return malformed("let", "expected a mapping of bindings");
        };
        let Some(body) = fields.get("in") else {
            return malformed("let", "missing `in` expression");
        };
        let bindings = fields
            .iter()
            .filter(|(name, _)| name.as_str() != "in")
            .map(|(name, value)| (name.clone(), *self.child(value, &["let", name.as_str()], depth)))
            .collect();
        Expr::Let {
            bindings,
            body: self.child(body, &["let", "in"], depth),
        }
    }

    fn substring(&self, payload: &Value, depth: usize) -> Expr {
        let Value::Object(fields) = payload else {
            return malformed("substring", "expected an object with `value` and `start`");
        };
        let (Some(value), Some(start)) = (fields.get("value"), fields.get("start")) else {
            return malformed("substring", "missing `value` or `start`");
        };
        Expr::Substring {
            value: self.child(value, &["substring", "value"], depth),
            start: self.child(start, &["substring", "start"], depth),
            end: fields
                .get("end")
                .map(|end| self.child(end, &["substring", "end"], depth)),
        }
    }

    fn equals(&self, payload: &Value, depth: usize) -> Expr {
        let Value::Object(fields) = payload else {
            return malformed("equals", "expected an object with `left` and `right`");
        };
        let (Some(left), Some(right)) = (fields.get("left"), fields.get("right")) else {
            return malformed("equals", "missing `left` or `right`");
        };
        Expr::Equals {
            left: self.child(left, &["equals", "left"], depth),
            right: self.child(right, &["equals", "right"], depth),
        }
    }

    fn if_op(&self, map: &Map<String, Value>, payload: &Value, depth: usize) -> Expr {
        if let Some(condition) = payload.get("condition").filter(|_| payload.is_object()) {
            return Expr::If {
                condition: self.child(condition, &["if", "condition"], depth),
                then: payload
                    .get("then")
                    .map(|v| self.child(v, &["if", "then"], depth)),
                otherwise: payload
                    .get("else")
                    .map(|v| self.child(v, &["if", "else"], depth)),
            };
        }
        // Flat legacy form: {"if": cond, "then": .., "else": ..}
        if self.options.legacy && (map.contains_key("then") || map.contains_key("else")) {
            return Expr::If {
                condition: self.child(payload, &["if"], depth),
                then: map.get("then").map(|v| self.child(v, &["then"], depth)),
                otherwise: map.get("else").map(|v| self.child(v, &["else"], depth)),
            };
        }
        malformed("if", "missing `condition`")
    }
}

fn legacy_get(payload: &Value) -> Expr {
    let name = match payload {
        Value::String(name) => name,
        Value::Object(fields) => match fields.get("name") {
            Some(Value::String(name)) => name,
            _ => return malformed(LEGACY_GET, "`name` must be a string"),
        },
        _ => return malformed(LEGACY_GET, "expected a variable name"),
    };
    Expr::Var(name.strip_prefix(VAR_SIGIL).unwrap_or(name).to_string())
}

fn malformed(operation: &'static str, reason: &str) -> Expr {
    Expr::Malformed {
        operation,
        reason: reason.to_string(),
    }
}
