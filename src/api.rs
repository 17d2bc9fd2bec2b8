use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// The remote school API, seen through the four verbs the dashboard needs.
/// Handlers depend on this trait so tests can swap in a canned stub.
pub trait Api {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value, ApiError>;
    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, ApiError>;
    fn put(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, ApiError>;
    fn delete(&self, path: &str) -> Result<serde_json::Value, ApiError>;
}

/// Blocking HTTP client for the remote API. Attaches the bearer token and a
/// fresh request id to every call; no retries here — retry policy, if any,
/// belongs to the caller's UI layer.
pub struct HttpApi {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl HttpApi {
    pub fn new(base_url: &str, token: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn execute(
        &self,
        req: reqwest::blocking::RequestBuilder,
        op: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let resp = req
            .header("Authorization", format!("Bearer {}", self.token))
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .send()
            .map_err(|e| ApiError::new("transport_failed", format!("{}: {}", op, e)))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(op, status = status.as_u16(), "remote API rejected request");
            return Err(ApiError::new(
                "remote_error",
                format!("{}: HTTP {}", op, status.as_u16()),
            ));
        }
        resp.json()
            .map_err(|e| ApiError::new("bad_response", format!("{}: {}", op, e)))
    }
}

impl Api for HttpApi {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(path, "GET");
        self.execute(self.client.get(self.url(path)).query(query), path)
    }

    fn post(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(path, "POST");
        self.execute(self.client.post(self.url(path)).json(&body), path)
    }

    fn put(&self, path: &str, body: serde_json::Value) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(path, "PUT");
        self.execute(self.client.put(self.url(path)).json(&body), path)
    }

    fn delete(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        tracing::debug!(path, "DELETE");
        self.execute(self.client.delete(self.url(path)), path)
    }
}
