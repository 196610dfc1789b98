//! HTTP client for the backend API with a consistent timeout, user agent and
//! error mapping. Feature clients build on these helpers so request setup is
//! not duplicated. Bearer tokens are supplied by callers per request; the client
//! itself holds no credentials.

pub mod endpoints;
pub mod errors;

pub use self::errors::AppError;

use reqwest::{header::AUTHORIZATION, multipart, Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, time::Duration};
use tracing::{debug, instrument};
use url::Url;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Response shape shared by every backend endpoint.
#[derive(Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub token: Option<String>,
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Envelope for a successful response that carried no body.
    fn empty_success() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            token: None,
            pagination: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Envelope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("success", &self.success)
            .field("message", &self.message)
            .field("data", &self.data)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("pagination", &self.pagination)
            .finish()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client for the given base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is not http(s) or the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API base URL must use http or https: {base_url}"
            )));
        }

        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins an endpoint path onto the base URL, appending `id` as an encoded
    /// path segment.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL cannot carry a path.
    pub fn url(&self, path: &str, id: Option<&str>) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| AppError::Config("API base URL cannot carry a path".to_string()))?;
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// # Errors
    /// Returns an `AppError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        bearer: Option<&SecretString>,
    ) -> Result<Envelope<T>, AppError> {
        let request = self.request(Method::GET, url, bearer);
        self.execute(request).await
    }

    /// # Errors
    /// Returns an `AppError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        bearer: Option<&SecretString>,
    ) -> Result<Envelope<T>, AppError> {
        let request = self.request(Method::POST, url, bearer).json(body);
        self.execute(request).await
    }

    /// # Errors
    /// Returns an `AppError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        bearer: Option<&SecretString>,
    ) -> Result<Envelope<T>, AppError> {
        let request = self.request(Method::PUT, url, bearer).json(body);
        self.execute(request).await
    }

    /// # Errors
    /// Returns an `AppError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        url: Url,
        bearer: Option<&SecretString>,
    ) -> Result<Envelope<T>, AppError> {
        let request = self.request(Method::DELETE, url, bearer);
        self.execute(request).await
    }

    /// Posts a multipart form; reqwest sets the boundary content type.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        form: multipart::Form,
        bearer: Option<&SecretString>,
    ) -> Result<Envelope<T>, AppError> {
        let request = self.request(Method::POST, url, bearer).multipart(form);
        self.execute(request).await
    }

    fn request(&self, method: Method, url: Url, bearer: Option<&SecretString>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match bearer {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret())),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, AppError> {
        let response = request.send().await.map_err(map_request_error)?;
        handle_envelope(response).await
    }
}

/// Maps transport errors into user-facing `AppError` variants.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else if err.is_decode() {
        AppError::Parse(format!("Failed to decode response: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Decodes the envelope of a 2xx response or turns the error body into an
/// `AppError::Http`.
async fn handle_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, AppError> {
    let status = response.status();
    let body = response.text().await.map_err(map_request_error)?;

    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Envelope::empty_success());
        }
        serde_json::from_str(&body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        debug!(status = status.as_u16(), "backend returned an error status");
        Err(AppError::Http {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Prefers the backend's `message` field and falls back to the raw body.
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string));

    match message {
        Some(message) if !message.trim().is_empty() => sanitize_body(&message),
        _ => sanitize_body(body),
    }
}

/// Trims and truncates error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(1)).expect("client")
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = ApiClient::new("ftp://files.example.com", Duration::from_secs(1));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn url_joins_paths_without_double_slashes() {
        let api = client("http://api.example.com/");
        let url = api.url(endpoints::AUTH_LOGIN, None).expect("url");
        assert_eq!(url.as_str(), "http://api.example.com/api/auth/login");
    }

    #[test]
    fn url_keeps_base_prefix() {
        let api = client("https://example.com/backend");
        let url = api.url(endpoints::ADMIN_USERS, Some("42")).expect("url");
        assert_eq!(url.as_str(), "https://example.com/backend/api/admin/users/42");
    }

    #[test]
    fn url_encodes_id_segment() {
        let api = client("http://api.example.com");
        let url = api
            .url(endpoints::ADMIN_USERS, Some("../a b"))
            .expect("url");
        assert_eq!(url.path(), "/api/admin/users/..%2Fa%20b");
    }

    #[test]
    fn error_message_prefers_backend_message() {
        let body = r#"{"success":false,"message":"Invalid credentials"}"#;
        assert_eq!(error_message(body), "Invalid credentials");
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(""), "Request failed.");
        assert_eq!(error_message(r#"{"message":"  "}"#), r#"{"message":"  "}"#);
    }

    #[test]
    fn sanitize_body_truncates() {
        let body = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_body(&body).len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn envelope_decodes_with_missing_fields() {
        let envelope: Envelope<Value> = serde_json::from_str(r#"{"message":"nope"}"#).expect("json");
        assert!(!envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("nope"));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn envelope_debug_redacts_token() {
        let envelope: Envelope<Value> =
            serde_json::from_str(r#"{"success":true,"token":"secret-token"}"#).expect("json");
        let debug = format!("{envelope:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }
}
