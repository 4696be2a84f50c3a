use thiserror::Error;

/// Errors raised by the quantification core.
///
/// Numeric non-availability (missing controls, absent calibrator, failed
/// replicates) is never an error; it surfaces as NaN in the output tables.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QpcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl QpcrError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

pub type QpcrResult<T> = std::result::Result<T, QpcrError>;
