//! Logic expression evaluator.
//!
//! # Overview
//!
//! Expressions are JSON trees. Scalars evaluate to themselves, strings starting
//! with `$` are variable references, sequences evaluate element-wise, and a
//! mapping is an operation keyed by its name:
//!
//! | operation   | payload                                             |
//! |-------------|-----------------------------------------------------|
//! | `let`       | `{name: expr, ..., in: expr}`                       |
//! | `concat`    | `[..]` or `{values: [..]}`                          |
//! | `uppercase` | `expr` or `{value: expr}` (also `lowercase`, `length`, `not`) |
//! | `substring` | `{value, start, end?}`                              |
//! | `and`, `or` | `[..]` or `{values: [..]}`                          |
//! | `equals`    | `{left, right}`                                     |
//! | `if`        | `{condition, then?, else?}`                         |
//!
//! Two evaluators share one reduction routine. [`evaluate`] is strict and
//! fails with [`EvalError`]. [`evaluate_with_coverage`] never fails: it
//! substitutes [`PLACEHOLDER`] for failed nodes and records a [`PathId`] for
//! every node it visits, which [`build_display_tree`] uses to mark coverage.
//!
//! # Example
//!
//! ```
//! use logic_expression::{evaluate, evaluate_with_coverage, Env};
//! use serde_json::json;
//!
//! let expr = json!({"let": {"a": "hello", "b": {"uppercase": "$a"}, "in": "$b"}});
//! assert_eq!(evaluate(&expr, &Env::new()).unwrap(), json!("HELLO"));
//!
//! let traced = evaluate_with_coverage(&json!("$missing"), &Env::new());
//! assert_eq!(traced.value, json!(logic_expression::PLACEHOLDER));
//! assert_eq!(traced.failures.len(), 1);
//! ```

pub mod compile;
pub mod display;
pub mod env;
pub mod error;
pub mod evaluate;
pub mod expr;
pub(crate) mod operators;
pub mod options;
pub mod parse;
pub mod path;
pub mod program;
pub mod trace;
pub mod util;

pub use compile::{CompiledExpr, Evaluator};
pub use display::{build_display_tree, DisplayNode, NodeKind};
pub use env::Env;
pub use error::{EvalError, ProgramError};
pub use evaluate::{evaluate, evaluate_node, evaluate_with_coverage, trace_node};
pub use expr::{Expr, Node};
pub use options::{EvalOptions, DEFAULT_MAX_DEPTH};
pub use parse::{parse, parse_with};
pub use path::{CoverageSet, PathId, Signature};
pub use program::{Program, ProgramMeta};
pub use trace::{Failure, Traced, PLACEHOLDER};
