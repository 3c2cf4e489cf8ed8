// API client module: a small blocking HTTP client for the NoCodeBackend
// REST service. Every call is one round trip and the outcome is always
// returned as an `ApiResult` value; nothing here returns `Err` or panics
// on remote input.

use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a call ended in `ApiResult::Failure`. Only the message reaches the
/// caller.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} - {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not encode request body: {0}")]
    Encode(serde_json::Error),

    #[error("invalid record id {0:?}")]
    InvalidId(String),
}

/// Normalized outcome of a remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// The remote body exactly as returned (`status`, `data`, `id`, ...).
    Success(Value),
    Failure { error: String },
}

impl ApiResult {
    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "unknown error".to_string()
        } else {
            error
        };
        ApiResult::Failure { error }
    }

    /// Classify a parsed 2xx body. Only `"status": "success"` counts as
    /// success; anything else is reported using the body's own message.
    pub fn from_body(body: Value) -> Self {
        match body.get("status").and_then(Value::as_str) {
            Some("success") => ApiResult::Success(body),
            status => {
                let message = body
                    .get("error")
                    .or_else(|| body.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| match status {
                        Some(s) => format!("remote reported status {:?}", s),
                        None => "remote response has no status".to_string(),
                    });
                ApiResult::failed(message)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiResult::Success(body) => Some(body),
            ApiResult::Failure { .. } => None,
        }
    }

    /// The `data` member of a successful body.
    pub fn data(&self) -> Option<&Value> {
        self.body().and_then(|b| b.get("data"))
    }

    /// `data` as a sequence of records; empty for failures or when `data`
    /// is not an array.
    pub fn records(&self) -> &[Value] {
        self.data()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Id assigned by a create call.
    pub fn id(&self) -> Option<&Value> {
        self.body().and_then(|b| b.get("id"))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResult::Success(_) => None,
            ApiResult::Failure { error } => Some(error),
        }
    }

    /// The loosely-typed mapping form: the body itself on success,
    /// `{"status": "failed", "error": ...}` otherwise.
    pub fn to_json(&self) -> Value {
        match self {
            ApiResult::Success(body) => body.clone(),
            ApiResult::Failure { error } => json!({ "status": "failed", "error": error }),
        }
    }
}

/// Authenticated client bound to one base URL and instance.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    instance: String,
    auth: HeaderValue,
}

impl ApiClient {
    /// Build the underlying reqwest client with the configured timeout.
    /// Fails if the base URL cannot take path segments or the token cannot
    /// be sent as a header, so no call ever goes out unauthenticated.
    pub fn new(config: &Config) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL {:?}", config.base_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Base URL {:?} cannot carry a path", config.base_url);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .context("API key contains characters not allowed in an HTTP header")?;
        auth.set_sensitive(true);

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base,
            instance: config.instance.clone(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }

    /// Base URL with `segments` appended. Each segment is percent-encoded,
    /// so `/`, `?` or `#` inside one cannot change the path or query.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET `{base}/read/{resource}` with `Instance` followed by `params`.
    /// Keys such as `total_usage[gt]` are forwarded untouched.
    pub fn list(&self, resource: &str, params: &[(String, String)]) -> ApiResult {
        let req = self
            .client
            .get(self.endpoint(&["read", resource]))
            .query(&[("Instance", self.instance.as_str())])
            .query(params);
        self.execute("list", req)
    }

    /// GET `{base}/read/{resource}/{id}`. The id is always one path
    /// segment; empty, `.` and `..` ids are refused without a request.
    pub fn get_by_id(&self, resource: &str, id: &str) -> ApiResult {
        if matches!(id, "" | "." | "..") {
            return self.fail("get", RequestError::InvalidId(id.to_string()));
        }
        let req = self
            .client
            .get(self.endpoint(&["read", resource, id]))
            .query(&[("Instance", self.instance.as_str())]);
        self.execute("get", req)
    }

    /// POST `{base}/create/{resource}` with the record as JSON body.
    pub fn create<T: Serialize + ?Sized>(&self, resource: &str, record: &T) -> ApiResult {
        let body = match serde_json::to_vec(record) {
            Ok(b) => b,
            Err(e) => return self.fail("create", RequestError::Encode(e)),
        };
        let req = self
            .client
            .post(self.endpoint(&["create", resource]))
            .query(&[("Instance", self.instance.as_str())])
            .body(body);
        self.execute("create", req)
    }

    fn execute(&self, op: &str, req: RequestBuilder) -> ApiResult {
        match self.send(req.headers(self.headers())) {
            Ok(result) => {
                if let ApiResult::Failure { error } = &result {
                    warn!(op, %error, "remote reported failure");
                }
                result
            }
            Err(e) => self.fail(op, e),
        }
    }

    fn send(&self, req: RequestBuilder) -> std::result::Result<ApiResult, RequestError> {
        let res = req.send()?;
        let status = res.status();
        debug!(url = %res.url(), %status, "response received");
        if !status.is_success() {
            let body = res.text().unwrap_or_else(|_| "".into());
            return Err(RequestError::Status { status, body });
        }
        let text = res.text()?;
        let body: Value = serde_json::from_str(&text)?;
        Ok(ApiResult::from_body(body))
    }

    fn fail(&self, op: &str, err: RequestError) -> ApiResult {
        warn!(op, error = %err, "request failed");
        ApiResult::failed(err.to_string())
    }
}
