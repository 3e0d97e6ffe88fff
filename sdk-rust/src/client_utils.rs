use crate::{ApiError, ApiResult};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::Span;

/// Send the request. Throws error on non OK status code.
pub async fn send(request: RequestBuilder, timeout: Option<Duration>) -> ApiResult<Response> {
    let request = match timeout {
        Some(timeout) => request.timeout(timeout),
        None => request,
    };
    let response = request.send().await?;
    let status = response.status();
    Span::current().record("http.response.status_code", status.as_u16());
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::StatusCode(
            status,
            response.text().await.unwrap_or_default(),
        ))
    }
}

/// Create a JSON request, parse the response.
/// Throws error on non OK status code.
pub async fn send_json<T: Serialize + ?Sized, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
    timeout: Option<Duration>,
) -> ApiResult<R> {
    let response = send(client.post(url).headers(headers).json(data), timeout).await?;
    Ok(response.json::<R>().await?)
}

/// Create a JSON request whose response body is not needed.
/// Throws error on non OK status code.
pub async fn send_json_discard<T: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
    timeout: Option<Duration>,
) -> ApiResult<()> {
    send(client.post(url).headers(headers).json(data), timeout).await?;
    Ok(())
}

/// Issue a GET request, parse the JSON response.
/// Throws error on non OK status code.
pub async fn get_json<R: DeserializeOwned>(
    client: &Client,
    url: &str,
    headers: HeaderMap,
    timeout: Option<Duration>,
) -> ApiResult<R> {
    let response = send(client.get(url).headers(headers), timeout).await?;
    Ok(response.json::<R>().await?)
}

/// Headers carrying the bearer token for authenticated endpoints.
pub fn bearer_headers(token: &str) -> ApiResult<HeaderMap> {
    if token.trim().is_empty() {
        return Err(ApiError::InvalidInput("Bearer token is empty".to_string()));
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
            ApiError::InvalidInput(format!("Invalid bearer token header value: {error}"))
        })?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_headers_sets_authorization() {
        let headers = bearer_headers("abc.def").expect("valid token");
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc.def")
        );
    }

    #[test]
    fn bearer_headers_rejects_blank_and_control_characters() {
        assert!(matches!(
            bearer_headers("  "),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            bearer_headers("abc\ndef"),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
