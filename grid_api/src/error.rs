use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// Failures while opening the backing dataset. These can only happen at
/// startup; once a store is open its operations are infallible.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "could not read dataset: {e}"),
            StoreError::Parse(e) => write!(f, "could not parse dataset: {e}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
