use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /auth/token/`. The username is the account email.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Body of `POST /user/register/`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `GET /user/profile/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Body of `POST /itinerary/generate/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateItineraryRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_of_days: i64,
    pub destination: String,
    pub must_includes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Some detail endpoints wrap their payload in `{data: ...}` and some do not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeEnveloped<T> {
    Enveloped(DataEnvelope<T>),
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Enveloped(envelope) => envelope.data,
            Self::Bare(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let credentials = Credentials::new("ada@example.com", "hunter2");
        let printed = format!("{credentials:?}");
        assert!(printed.contains("ada@example.com"));
        assert!(!printed.contains("hunter2"));

        let token = TokenResponse {
            access: "eyJhbGciOi".into(),
            refresh: None,
        };
        assert!(!format!("{token:?}").contains("eyJhbGciOi"));
    }

    #[test]
    fn generate_request_uses_backend_field_names() {
        let request = GenerateItineraryRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 3).expect("valid date"),
            num_of_days: 3,
            destination: "Lisbon, Portugal".into(),
            must_includes: vec!["Tourist Places".into()],
        };

        let value = serde_json::to_value(&request).expect("encodes");
        assert_eq!(value["start_date"], "2024-01-01");
        assert_eq!(value["end_date"], "2024-01-03");
        assert_eq!(value["num_of_days"], 3);
        assert_eq!(value["must_includes"][0], "Tourist Places");
    }
}
