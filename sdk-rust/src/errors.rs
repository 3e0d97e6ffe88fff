use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request to the service failed or the parsing of the response
    /// failed.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The request returns a non-OK status code
    #[error("Status error: {1} (Status {0})")]
    StatusCode(StatusCode, String),
    /// The response from the service was unexpected. (e.g. a mocked provider
    /// ran out of queued results)
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

impl ApiError {
    /// The HTTP status returned by the service, if the request got that far.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::StatusCode(status, _) => Some(*status),
            Self::Transport(error) => error.status(),
            Self::InvalidInput(_) | Self::Invariant(..) => None,
        }
    }

    /// Whether the service rejected the bearer token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
