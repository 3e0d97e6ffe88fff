use super::api::formatted_names;
use crate::{
    client_utils, opentelemetry::trace_request, ApiError, ApiResult, PlaceAutocomplete,
};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const PROVIDER: &str = "geoapify";
const DEFAULT_BASE_URL: &str = "https://api.geoapify.com/v1/geocode/autocomplete";

/// Destination suggestions from the Geoapify autocomplete endpoint.
pub struct GeoapifyAutocomplete {
    base_url: String,
    api_key: String,
    client: Client,
    timeout: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct GeoapifyAutocompleteOptions {
    /// Full autocomplete endpoint URL, not just the host.
    pub base_url: Option<String>,
    pub api_key: String,
    pub client: Option<Client>,
    pub timeout: Option<Duration>,
}

impl GeoapifyAutocomplete {
    #[must_use]
    pub fn new(mut options: GeoapifyAutocompleteOptions) -> Self {
        let base_url = options
            .base_url
            .take()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            api_key: options.api_key,
            client: options.client.take().unwrap_or_default(),
            timeout: options.timeout,
        }
    }
}

#[async_trait::async_trait]
impl PlaceAutocomplete for GeoapifyAutocomplete {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn autocomplete(&self, text: &str) -> ApiResult<Vec<String>> {
        if self.api_key.is_empty() {
            return Err(ApiError::InvalidInput(
                "Geoapify API key is not configured".to_string(),
            ));
        }

        let request = self
            .client
            .get(&self.base_url)
            .query(&[("text", text), ("apiKey", self.api_key.as_str())]);

        trace_request(PROVIDER, "autocomplete", "GET", "/v1/geocode/autocomplete", async {
            let response = client_utils::send(request, self.timeout).await?;
            let body: Value = response.json().await?;
            Ok(formatted_names(&body))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/v1/geocode/autocomplete")
    }

    #[tokio::test]
    async fn sends_text_and_key_and_parses_features() {
        let app = Router::new().route(
            "/v1/geocode/autocomplete",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "features": [
                        {"properties": {"formatted": format!("{} ({})", params["text"], params["apiKey"])}}
                    ]
                }))
            }),
        );
        let autocomplete = GeoapifyAutocomplete::new(GeoapifyAutocompleteOptions {
            base_url: Some(serve(app).await),
            api_key: "key-1".into(),
            ..Default::default()
        });

        let names = autocomplete
            .autocomplete("São Paulo")
            .await
            .expect("autocomplete succeeds");

        assert_eq!(names, vec!["São Paulo (key-1)"]);
    }

    #[tokio::test]
    async fn missing_key_is_invalid_input() {
        let autocomplete = GeoapifyAutocomplete::new(GeoapifyAutocompleteOptions::default());
        assert!(matches!(
            autocomplete.autocomplete("Rome").await,
            Err(ApiError::InvalidInput(_))
        ));
    }
}
