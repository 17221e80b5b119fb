use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PaceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PaceError::InvalidInput(msg.into())
    }
}
