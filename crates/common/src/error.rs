use thiserror::Error;

/// Navigation errors surface programmer mistakes at the call that introduced
/// them. Recoverable conditions (popping an empty stack, a transaction host
/// that already saved its state) are reported as `false` returns instead and
/// never appear here.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl NavError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        NavError::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        NavError::InvalidState(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
