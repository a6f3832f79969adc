//! Dual-channel results: a value, or an error that may still carry one.
//!
//! Shape mismatches are data errors, not programmer errors. An operation
//! that cannot fully succeed reports why and, where it can, hands back the
//! best-effort value it managed to build (the *partial*). The caller decides
//! whether to abort or to continue with the degraded value.

use crate::error::OpsError;

/// Outcome of a fallible tree operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DataResult<R> {
    Success(R),
    Error(PartialResult<R>),
}

/// The error channel of a [`DataResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialResult<R> {
    pub error: OpsError,
    pub partial: Option<R>,
}

impl<R> DataResult<R> {
    pub fn success(value: R) -> Self {
        DataResult::Success(value)
    }

    /// An error with no usable value.
    pub fn error(error: OpsError) -> Self {
        tracing::debug!(%error, "tree operation failed");
        DataResult::Error(PartialResult {
            error,
            partial: None,
        })
    }

    /// An error that still carries a best-effort value.
    pub fn error_with_partial(error: OpsError, partial: R) -> Self {
        tracing::debug!(%error, "tree operation failed with partial result");
        DataResult::Error(PartialResult {
            error,
            partial: Some(partial),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DataResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// The success value, discarding any error.
    pub fn result(self) -> Option<R> {
        match self {
            DataResult::Success(value) => Some(value),
            DataResult::Error(_) => None,
        }
    }

    /// The partial value of an error result.
    pub fn partial(&self) -> Option<&R> {
        match self {
            DataResult::Success(_) => None,
            DataResult::Error(err) => err.partial.as_ref(),
        }
    }

    pub fn error_ref(&self) -> Option<&OpsError> {
        match self {
            DataResult::Success(_) => None,
            DataResult::Error(err) => Some(&err.error),
        }
    }

    /// The success value, or the partial value of an error.
    pub fn result_or_partial(self) -> Option<R> {
        match self {
            DataResult::Success(value) => Some(value),
            DataResult::Error(err) => err.partial,
        }
    }

    /// Transform both the success value and any partial value.
    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> DataResult<U> {
        match self {
            DataResult::Success(value) => DataResult::Success(f(value)),
            DataResult::Error(err) => DataResult::Error(PartialResult {
                error: err.error,
                partial: err.partial.map(f),
            }),
        }
    }

    /// Chain another fallible step. A partial value is fed through `f`; if
    /// both steps fail, the first error wins.
    pub fn flat_map<U>(self, f: impl FnOnce(R) -> DataResult<U>) -> DataResult<U> {
        match self {
            DataResult::Success(value) => f(value),
            DataResult::Error(err) => {
                let partial = err.partial.and_then(|p| f(p).result_or_partial());
                DataResult::Error(PartialResult {
                    error: err.error,
                    partial,
                })
            }
        }
    }

    /// Treat every error as fatal.
    pub fn into_result(self) -> Result<R, OpsError> {
        match self {
            DataResult::Success(value) => Ok(value),
            DataResult::Error(err) => Err(err.error),
        }
    }

    /// Accept a partial value as a success, logging the error it came with.
    /// Errors without a partial stay errors.
    pub fn promote_partial(self) -> DataResult<R> {
        match self {
            DataResult::Error(PartialResult {
                error,
                partial: Some(partial),
            }) => {
                tracing::warn!(%error, "continuing with partial result");
                DataResult::Success(partial)
            }
            other => other,
        }
    }
}

impl<R> From<DataResult<R>> for Result<R, OpsError> {
    fn from(result: DataResult<R>) -> Self {
        result.into_result()
    }
}
