use serde::{Deserialize, Serialize};

/// Default bound on expression nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Evaluation options.
///
/// Can be embedded in a program document under `options`; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Maximum nesting depth of operations and sequences. Deeper nodes fail
    /// with `EvaluationDepthExceeded`.
    pub max_depth: usize,
    /// Accept the legacy surface syntax: `{"get": name}` variable access and
    /// flat `{"if": cond, "then": .., "else": ..}` conditionals.
    pub legacy: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        EvalOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            legacy: true,
        }
    }
}

impl EvalOptions {
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn legacy(mut self, legacy: bool) -> Self {
        self.legacy = legacy;
        self
    }
}
