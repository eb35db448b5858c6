use scoreboard_core::ValidationError;

/// Failure of a client operation.
#[derive(Debug)]
pub enum ClientError {
    /// Rejected locally before any request was made.
    Validation(ValidationError),
    /// The request did not complete or the response could not be decoded.
    Transport(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The API answered 401. The session has already been cleared.
    AuthExpired,
}

impl ClientError {
    /// Whether the operator can simply retry the same action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_)) || matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Transport(m) => write!(f, "could not reach the scoreboard API: {m}"),
            Self::Api { status, message } => write!(f, "API error ({status}): {message}"),
            Self::AuthExpired => write!(f, "session expired, please log in again"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
