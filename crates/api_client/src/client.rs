//! The Cloud HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required). Every endpoint
//! wraps its payload in `{data, error?: {message?}}`; success is decided
//! by the HTTP status, not the envelope shape.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::types::{DashboardStats, Event, Instance, StorageObject, Vpc};

/// Fallback base URL when the environment does not provide one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "THECLOUD_API_URL";

/// Resolve the API base URL: environment variable > fixed fallback.
pub fn api_base_from_env() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// The Cloud API client (blocking).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    api_key: String,
}

/// Error type for API operations.
#[derive(Debug)]
pub enum ApiError {
    /// No API key configured; checked before any network call
    MissingKey,
    /// Network error
    Network(String),
    /// HTTP error with status code and extracted message
    Http(u16, String),
    /// Payload did not decode into the expected record type
    Parse(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingKey => write!(f, "API key required"),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Http(_, msg) => write!(f, "{}", msg),
            ApiError::Parse(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Wire-level wrapper returned by every endpoint.
#[derive(Debug, Default, serde::Deserialize)]
struct Envelope {
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    error: Option<EnvelopeError>,
}

#[derive(Debug, serde::Deserialize)]
struct EnvelopeError {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Create a client from the stored credential and the environment
    /// base URL. The key may be empty; every request then fails with
    /// `MissingKey` before touching the network.
    pub fn from_stored() -> Self {
        Self::new(api_base_from_env(), crate::credentials::load_api_key())
    }

    /// Create a client with an explicit base URL and credential.
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("thecloud/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn has_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    // ── Resource accessors ──────────────────────────────────────────

    /// List all compute instances.
    pub fn list_instances(&self) -> Result<Vec<Instance>, ApiError> {
        self.get("/instances")
    }

    /// List all VPCs.
    pub fn list_vpcs(&self) -> Result<Vec<Vpc>, ApiError> {
        self.get("/vpcs")
    }

    /// List the objects in a bucket.
    pub fn list_objects(&self, bucket: &str) -> Result<Vec<StorageObject>, ApiError> {
        self.get(&format!("/storage/{}", bucket))
    }

    /// List audit events, newest first.
    pub fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get("/events")
    }

    /// Fetch the overview summary and recent events.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/api/dashboard/stats")
    }

    /// Request a fresh API key from the bootstrap endpoint.
    /// The only unauthenticated call; used by `thecloud login --demo`.
    pub fn create_key(&self, name: &str) -> Result<String, ApiError> {
        let url = format!("{}/auth/keys", self.api_base);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let data = unwrap_envelope(response)?;
        data.as_str()
            .map(String::from)
            .or_else(|| data["api_key"].as_str().map(String::from))
            .or_else(|| data["key"].as_str().map(String::from))
            .ok_or_else(|| ApiError::Parse("Missing api_key in response".into()))
    }

    // ── Core request path ───────────────────────────────────────────

    /// Authenticated GET returning the raw envelope payload.
    ///
    /// 1. Empty key fails with `MissingKey` — no network call.
    /// 2. GET `base + path` with `X-API-Key`.
    /// 3. Non-2xx fails with the envelope's `error.message`, falling
    ///    back to the HTTP status text.
    /// 4. 2xx returns `data` untouched.
    pub fn get_value(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingKey);
        }

        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        unwrap_envelope(response)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let data = self.get_value(path)?;
        serde_json::from_value(data).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Extract `data` from an envelope response, or the normalized error.
/// A body that is not valid JSON counts as an empty envelope; the HTTP
/// status alone decides success.
fn unwrap_envelope(response: reqwest::blocking::Response) -> Result<serde_json::Value, ApiError> {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    let envelope: Envelope = serde_json::from_str(&body).unwrap_or_default();

    if !status.is_success() {
        let message = envelope
            .error
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(ApiError::Http(status.as_u16(), message));
    }

    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_data_and_error() {
        let env: Envelope =
            serde_json::from_str(r#"{"data":[1,2],"error":{"message":"nope"}}"#).unwrap();
        assert_eq!(env.data, serde_json::json!([1, 2]));
        assert_eq!(env.error.unwrap().message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_envelope_defaults_on_garbage() {
        let env: Envelope = serde_json::from_str("not json").unwrap_or_default();
        assert!(env.data.is_null());
        assert!(env.error.is_none());
    }

    #[test]
    fn test_envelope_error_without_message() {
        let env: Envelope = serde_json::from_str(r#"{"data":null,"error":{}}"#).unwrap();
        assert!(env.error.unwrap().message.is_none());
    }

    #[test]
    fn test_missing_key_fails_before_network() {
        // Unroutable base: reaching the network would error differently.
        let client = ApiClient::new("http://192.0.2.1:9", "");
        let err = client.get_value("/instances").unwrap_err();
        assert!(matches!(err, ApiError::MissingKey));
        assert_eq!(err.to_string(), "API key required");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::Http(403, "forbidden".into()).to_string(),
            "forbidden"
        );
        assert_eq!(
            ApiError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }
}
