use thiserror::Error;

/// Errors produced while decoding a stored asset value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
