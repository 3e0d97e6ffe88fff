use super::api::{
    Credentials, DataEnvelope, GenerateItineraryRequest, MaybeEnveloped, Profile, Registration,
    TokenResponse,
};
use crate::{client_utils, opentelemetry::trace_request, ApiError, ApiResult, Itinerary};
use reqwest::{header::HeaderMap, Client};
use std::time::Duration;

const SERVICE: &str = "trip-planner";
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Client for the itinerary backend. Every call fails once on error; there
/// are no retries.
#[derive(Debug, Clone)]
pub struct TripPlannerClient {
    base_url: String,
    client: Client,
    timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct TripPlannerClientOptions {
    pub base_url: Option<String>,
    pub client: Option<Client>,
    /// Per-request timeout. No timeout when unset.
    pub timeout: Option<Duration>,
}

impl TripPlannerClient {
    #[must_use]
    pub fn new(mut options: TripPlannerClientOptions) -> Self {
        let base_url = options
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            client: options.client.take().unwrap_or_default(),
            timeout: options.timeout,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /auth/token/`: exchange credentials for a bearer token.
    pub async fn obtain_token(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        let path = "/auth/token/";
        trace_request(
            SERVICE,
            "obtain_token",
            "POST",
            path,
            client_utils::send_json(
                &self.client,
                &self.url(path),
                credentials,
                HeaderMap::new(),
                self.timeout,
            ),
        )
        .await
    }

    /// `POST /user/register/`. The account stays inactive until the emailed
    /// verification link is opened.
    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let path = "/user/register/";
        trace_request(
            SERVICE,
            "register",
            "POST",
            path,
            client_utils::send_json_discard(
                &self.client,
                &self.url(path),
                registration,
                HeaderMap::new(),
                self.timeout,
            ),
        )
        .await
    }

    /// `GET /user/profile/`
    pub async fn profile(&self, token: &str) -> ApiResult<Profile> {
        let path = "/user/profile/";
        let headers = client_utils::bearer_headers(token)?;
        trace_request(
            SERVICE,
            "profile",
            "GET",
            path,
            client_utils::get_json(&self.client, &self.url(path), headers, self.timeout),
        )
        .await
    }

    /// `GET /user/verify-email/{token}/`
    pub async fn verify_email(&self, verification_token: &str) -> ApiResult<()> {
        if verification_token.trim().is_empty() {
            return Err(ApiError::InvalidInput(
                "Verification token is empty".to_string(),
            ));
        }

        let path = format!(
            "/user/verify-email/{}/",
            urlencoding::encode(verification_token)
        );
        let request = self.client.get(self.url(&path));
        trace_request(SERVICE, "verify_email", "GET", &path, async {
            client_utils::send(request, self.timeout).await?;
            Ok(())
        })
        .await
    }

    /// `GET /itinerary/recent/`, newest first.
    pub async fn recent_itineraries(&self, token: &str) -> ApiResult<Vec<Itinerary>> {
        let path = "/itinerary/recent/";
        let headers = client_utils::bearer_headers(token)?;
        let envelope: DataEnvelope<Vec<Itinerary>> = trace_request(
            SERVICE,
            "recent_itineraries",
            "GET",
            path,
            client_utils::get_json(&self.client, &self.url(path), headers, self.timeout),
        )
        .await?;
        Ok(envelope.data)
    }

    /// `POST /itinerary/generate/`
    pub async fn generate_itinerary(
        &self,
        token: &str,
        request: &GenerateItineraryRequest,
    ) -> ApiResult<Itinerary> {
        let path = "/itinerary/generate/";
        let headers = client_utils::bearer_headers(token)?;
        let envelope: DataEnvelope<Itinerary> = trace_request(
            SERVICE,
            "generate_itinerary",
            "POST",
            path,
            client_utils::send_json(
                &self.client,
                &self.url(path),
                request,
                headers,
                self.timeout,
            ),
        )
        .await?;
        Ok(envelope.data)
    }

    /// `GET /itinerary/{id}/`
    pub async fn itinerary(&self, token: &str, id: i64) -> ApiResult<Itinerary> {
        let path = format!("/itinerary/{id}/");
        let headers = client_utils::bearer_headers(token)?;
        let body: MaybeEnveloped<Itinerary> = trace_request(
            SERVICE,
            "itinerary",
            "GET",
            &path,
            client_utils::get_json(&self.client, &self.url(&path), headers, self.timeout),
        )
        .await?;
        Ok(body.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = TripPlannerClient::new(TripPlannerClientOptions {
            base_url: Some("https://planner.example/api/".into()),
            ..Default::default()
        });
        assert_eq!(client.base_url(), "https://planner.example/api");
        assert_eq!(
            client.url("/user/profile/"),
            "https://planner.example/api/user/profile/"
        );
    }

    #[tokio::test]
    async fn authenticated_calls_reject_a_missing_token() {
        let client = TripPlannerClient::new(TripPlannerClientOptions::default());
        let result = client.profile("").await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }
}
