use thiserror::Error;

/// Errors originating from the core engine types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid engine config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },
}
