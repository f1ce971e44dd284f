use thiserror::Error;

/// Errors reported by the engine and the cursor.
///
/// Reaching either end of the hunk sequence while navigating is not an
/// error; it is reported through `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DiffError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DiffError::InvalidArgument(msg.into())
    }
}

pub type Result<T, E = DiffError> = std::result::Result<T, E>;
