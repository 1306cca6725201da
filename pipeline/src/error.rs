use std::{
    error::Error,
    fmt::{self, Display},
};

use regression::MlError;

/// Failures of one pipeline run. Every variant is fatal to the run; the
/// next invocation starts from scratch.
#[derive(Debug)]
pub enum PipelineError {
    /// The record fetch or its JSON decoding failed.
    Http(reqwest::Error),
    /// The fetched page had no record with both fields present.
    EmptyPage { page: usize },
    /// The model, dataset or normalization rejected its inputs.
    Ml(MlError),
    /// The render surface could not produce its output.
    Render(String),
    /// The blocking training task was cancelled or panicked.
    Join(tokio::task::JoinError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Http(e) => write!(f, "home rates request failed: {e}"),
            PipelineError::EmptyPage { page } => {
                write!(f, "page {page} contained no usable records")
            }
            PipelineError::Ml(e) => write!(f, "model error: {e}"),
            PipelineError::Render(msg) => write!(f, "render failed: {msg}"),
            PipelineError::Join(e) => write!(f, "training task aborted: {e}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Http(e) => Some(e),
            PipelineError::Ml(e) => Some(e),
            PipelineError::Join(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<MlError> for PipelineError {
    fn from(e: MlError) -> Self {
        Self::Ml(e)
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Join(e)
    }
}
