use thiserror::Error;

pub type Result<T> = std::result::Result<T, MathError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("generation dead end")]
    GenerationDeadend,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("symbolic evaluator failed: {0}")]
    Evaluator(String),
    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),
    #[error("generator `{0}` is already registered")]
    DuplicateGenerator(String),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("template error: {0}")]
    Template(String),
}
