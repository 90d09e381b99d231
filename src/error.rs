use thiserror::Error;

pub type Result<T> = std::result::Result<T, CasError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CasError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(String),
    #[error("undefined result: {0}")]
    UndefinedResult(String),
}

impl CasError {
    pub(crate) fn overflow(what: impl Into<String>) -> Self {
        CasError::ArithmeticOverflow(what.into())
    }

    pub(crate) fn undefined(what: impl Into<String>) -> Self {
        CasError::UndefinedResult(what.into())
    }

    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        CasError::UnsupportedOperation(what.into())
    }
}
