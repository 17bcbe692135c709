//! Program documents.
//!
//! ```json
//! {
//!   "program": { "name": "greeting", "version": "1.0" },
//!   "variables": { "name": "world" },
//!   "expression": { "concat": ["hello ", "$name"] }
//! }
//! ```

use crate::compile::Evaluator;
use crate::display::DisplayNode;
use crate::env::Env;
use crate::error::ProgramError;
use crate::options::EvalOptions;
use crate::trace::Traced;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Descriptive metadata. Not used by evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub program: ProgramMeta,
    /// Initial environment.
    #[serde(default)]
    pub variables: Map<String, Value>,
    pub expression: Value,
    #[serde(default)]
    pub options: EvalOptions,
}

impl Program {
    pub fn from_json_str(json: &str) -> Result<Self, ProgramError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn environment(&self) -> Env {
        Env::from_map(&self.variables)
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator::with_options(self.options.clone())
    }

    /// Strict evaluation of the program's expression.
    pub fn run(&self) -> Result<Value, ProgramError> {
        let value = self.evaluator().evaluate(&self.expression, &self.environment())?;
        Ok(value)
    }

    /// Diagnostic evaluation of the program's expression.
    pub fn run_with_coverage(&self) -> Traced {
        self.evaluator()
            .evaluate_with_coverage(&self.expression, &self.environment())
    }

    /// Runs a diagnostic pass and overlays its coverage onto a display tree.
    pub fn coverage_tree(&self) -> (Traced, DisplayNode) {
        let compiled = self.evaluator().compile(&self.expression);
        let env = self.environment();
        let traced = compiled.evaluate_with_coverage(&env);
        let tree = compiled.display_tree(&env, Some(&traced.coverage));
        (traced, tree)
    }
}
