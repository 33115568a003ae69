use thiserror::Error;

use crate::RouterId;

/// Errors raised by the topology store, the path engine and the persistence layer.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Out-of-range id, self-loop, non-positive cost or malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("router R{0} does not exist")]
    NotFound(RouterId),

    /// The destination lies in another connected component.
    #[error("no route from R{from} to R{to}")]
    NoRoute { from: RouterId, to: RouterId },

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

impl NetworkError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        NetworkError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
