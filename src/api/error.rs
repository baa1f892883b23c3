use crate::notify::GENERIC_ERROR_MSG;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error taxonomy for backend calls. `Unauthorized` and `NotFound` get their
/// own variants because controllers branch on them (forced logout, not-found
/// view); everything else is either a server-reported failure or a transport
/// problem that never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Text suitable for a user-facing notification: the server's message
    /// when it sent one, otherwise the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. } => message.clone(),
            ApiError::Transport(_) => GENERIC_ERROR_MSG.to_string(),
        }
    }
}
