use serde::Serialize;
use thiserror::Error;
use trip_planner_sdk::ApiError;

/// Machine-readable category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Credential,
    Registration,
    Profile,
    Verification,
    Recents,
    Itinerary,
    Suggestion,
    Generation,
    Unauthenticated,
    Validation,
    Storage,
    Config,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credential => "credential",
            Self::Registration => "registration",
            Self::Profile => "profile",
            Self::Verification => "verification",
            Self::Recents => "recents",
            Self::Itinerary => "itinerary",
            Self::Suggestion => "suggestion",
            Self::Generation => "generation",
            Self::Unauthenticated => "unauthenticated",
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Login failed: {0}")]
    Credential(#[source] ApiError),
    #[error("Registration failed: {0}")]
    Registration(#[source] ApiError),
    #[error("Profile fetch failed: {0}")]
    Profile(#[source] ApiError),
    #[error("Email verification failed: {0}")]
    Verification(#[source] ApiError),
    #[error("Recent itineraries fetch failed: {0}")]
    Recents(#[source] ApiError),
    #[error("Itinerary fetch failed: {0}")]
    Itinerary(#[source] ApiError),
    #[error("Suggestion fetch failed: {0}")]
    Suggestion(#[source] ApiError),
    #[error("Itinerary generation failed: {0}")]
    Generation(#[source] ApiError),
    /// A protected operation was attempted without an access token.
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Credential(_) => ErrorKind::Credential,
            Self::Registration(_) => ErrorKind::Registration,
            Self::Profile(_) => ErrorKind::Profile,
            Self::Verification(_) => ErrorKind::Verification,
            Self::Recents(_) => ErrorKind::Recents,
            Self::Itinerary(_) => ErrorKind::Itinerary,
            Self::Suggestion(_) => ErrorKind::Suggestion,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Short text suitable for showing next to the form that failed.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Credential(_) => "check your credentials".to_string(),
            Self::Registration(_) => "could not register at the moment".to_string(),
            Self::Profile(_) => "Cannot fetch details at the moment".to_string(),
            Self::Verification(_) => "Cannot verify at the moment".to_string(),
            Self::Recents(_) => "cannot find recents".to_string(),
            Self::Generation(_) | Self::Itinerary(_) => {
                "Cannot proceed with the query. try again".to_string()
            }
            Self::Unauthenticated => "please sign in".to_string(),
            Self::Suggestion(_) | Self::Validation(_) | Self::Storage(_) | Self::Config(_) => {
                self.to_string()
            }
        }
    }

    /// The underlying request error, for the kinds that come from a request.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Credential(error)
            | Self::Registration(error)
            | Self::Profile(error)
            | Self::Verification(error)
            | Self::Recents(error)
            | Self::Itinerary(error)
            | Self::Suggestion(error)
            | Self::Generation(error) => Some(error),
            Self::Unauthenticated
            | Self::Validation(_)
            | Self::Storage(_)
            | Self::Config(_) => None,
        }
    }

    /// Whether the backend rejected the bearer token (401 or 403).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_unauthorized)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Storage(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
