use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the regression library.
pub type Result<T> = std::result::Result<T, MlError>;

/// The regression library's error type.
#[derive(Debug, PartialEq, Eq)]
pub enum MlError {
    /// A buffer or batch does not have the expected dimensions.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An operation that needs at least one sample received none.
    EmptyData(&'static str),
}

impl Display for MlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlError::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(f, "{what} length mismatch: got {got}, expected {expected}"),
            MlError::EmptyData(what) => write!(f, "{what} must contain at least one sample"),
        }
    }
}

impl Error for MlError {}
