use thiserror::Error;

/// Errors raised by the strict evaluator.
///
/// The diagnostic evaluator never surfaces these; it records them next to the
/// path of the node that failed and substitutes a placeholder instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("malformed \"{operation}\" arguments: {reason}")]
    MalformedOperationArgs { operation: &'static str, reason: String },

    #[error("evaluation depth exceeded (limit {limit})")]
    EvaluationDepthExceeded { limit: usize },
}

impl EvalError {
    pub(crate) fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        EvalError::MalformedOperationArgs {
            operation,
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading or running a program document.
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("invalid program document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
