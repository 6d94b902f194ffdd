use thiserror::Error;

use crate::statement::Rule;

#[derive(Error, Debug)]
pub enum MadError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Type error: input must be a string, not {0}")]
    NotText(&'static str),
    #[error("Type error: invalid range format: {0}")]
    InvalidRange(String),
    #[error("Type error: argument sources must be lists or mappings, not {0}")]
    InvalidArgumentSource(&'static str),
    #[error("Type error: malformed argument: {0}")]
    MalformedArgument(String),
    #[error("Type error: unsupported value for `{key}`: {kind}")]
    UnsupportedValue { key: String, kind: String },
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Result retrieval error: {0}")]
    Results(String),
    #[error("Execution error: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, MadError>;

// Helper conversions
impl From<config::ConfigError> for MadError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

impl From<pest::error::Error<Rule>> for MadError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };
        Self::Parse { message: e.variant.message().to_string(), line: Some(line), col: Some(col) }
    }
}

/// Name of the JSON kind of a value, used in type errors.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
