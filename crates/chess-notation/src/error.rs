//! Notation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Malformed move token {token:?}: {reason}")]
    MalformedMoveToken { token: String, reason: &'static str },
}

impl NotationError {
    pub(crate) fn malformed(token: &str, reason: &'static str) -> Self {
        NotationError::MalformedMoveToken {
            token: token.to_string(),
            reason,
        }
    }
}
