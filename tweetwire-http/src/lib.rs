//! Minimal outbound JSON client with safe logging and flexible auth.
//!
//! - Request options: bearer token, query params, timeout
//! - Redacts sensitive query params and never logs secret values
//! - Non-2xx responses surface as [`HttpError::Api`] with the upstream status
//! - Optional *raw* request/response logging via `TWEETWIRE_HTTP_RAW=1`
//!
//! Every call is sent exactly once; callers decide what a failure means.
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), tweetwire_http::HttpError> {
//! let client = tweetwire_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", tweetwire_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: bearer tokens are sanitized before use, and logs only ever say
//! whether one was sent, never its value.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub use reqwest::StatusCode;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "TWEETWIRE_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)
const SNIPPET_MAX: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, with_bearer: bool) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    if with_bearer {
        parts.push("-H 'authorization: Bearer <redacted>'".to_string());
    }
    let mut shown = url.clone();
    let redacted: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if is_secret_key(&k) {
                "<redacted>".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if !redacted.is_empty() {
        shown.query_pairs_mut().clear().extend_pairs(redacted);
    }
    parts.push(format!("'{}'", shown.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") {
                val = "Bearer <redacted>".into();
            }
            (key, val)
        })
        .collect()
}

fn is_secret_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "access_token"
            | "authorization"
            | "auth"
            | "key"
            | "api_key"
            | "token"
            | "secret"
            | "client_secret"
            | "bearer"
    )
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}, request_id={request_id}")]
    Api {
        status: StatusCode,
        message: String,
        request_id: String,
    },
}

impl HttpError {
    /// Upstream status for [`HttpError::Api`], `None` for transport-level failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ==============================
// Request Options
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use tweetwire_http::RequestOpts;
/// use std::borrow::Cow;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     bearer: Some("demo"),
///     query: Some(vec![("screen_name", Cow::Borrowed("twitter"))]),
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert_eq!(opts.bearer, Some("demo"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    /// Sent as `Authorization: Bearer <token>` after sanitizing.
    pub bearer: Option<&'a str>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("query", "#rust".into())]
}

// ==============================
// Client
// ==============================

#[derive(Clone, Debug)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use tweetwire_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use tweetwire_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// GET JSON with per-request options (query/bearer/timeout).
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.request_json(Method::GET, path, opts).await
    }

    async fn request_json<T>(
        &self,
        method: Method,
        path: &str,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        // Query goes straight onto the URL so the raw log shows what was sent.
        let query: Vec<(&str, Cow<'_, str>)> = opts.query.clone().unwrap_or_default();
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_ref())));
        }

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let mut rb = self.inner.request(method.clone(), url.clone()).timeout(timeout);

        if let Some(tok) = opts.bearer {
            rb = rb.bearer_auth(sanitize_api_key(tok)?);
        }

        // ----- Safe request logging (pre-send) -----
        let with_bearer = opts.bearer.is_some();
        let redacted_q: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| {
                let v = if is_secret_key(k) {
                    "<redacted>".to_string()
                } else {
                    v.as_ref().to_string()
                };
                ((*k).to_string(), v)
            })
            .collect();

        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );
        let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%host_path,
            query=?redacted_q,
            timeout_ms=timeout.as_millis() as u64,
            with_bearer,
            "http.request.start"
        );

        if raw_enabled() {
            let curl = make_curl(&method, &url, with_bearer);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, host_path=%host_path, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, host_path=%host_path, message=%message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let req_hdr_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-correlation-id"))
            .or_else(|| headers.get("x-transaction-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        let limit = headers
            .get("x-rate-limit-limit")
            .and_then(|v| v.to_str().ok());
        let remain = headers
            .get("x-rate-limit-remaining")
            .and_then(|v| v.to_str().ok());
        let reset = headers
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok());

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            x_request_id=%req_hdr_id,
            rate_limit.limit=?limit,
            rate_limit.remaining=?remain,
            rate_limit.reset=?reset,
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let truncated = bytes.len() > RAW_MAX_BODY;
            let body_snip = &bytes[..bytes.len().min(RAW_MAX_BODY)];
            let text = String::from_utf8_lossy(body_snip);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        let snippet = snip_body(&bytes);
        tracing::trace!(
            req_id=%req_id,
            body_snippet=%snippet,
            "http.response.body_snippet"
        );

        if status.is_success() {
            // v2 envelopes carry a `meta` block worth surfacing
            if let Ok(val) = serde_json::from_slice::<serde_json::Value>(&bytes) {
                if let Some(meta) = val.get("meta") {
                    tracing::debug!(
                        req_id=%req_id,
                        result_count=?meta.get("result_count"),
                        next_token=?meta.get("next_token"),
                        "http.response.meta"
                    );
                }
            }

            return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                tracing::warn!(
                    req_id=%req_id,
                    serde_line=%e.line(),
                    serde_col=%e.column(),
                    serde_err=%e.to_string(),
                    body_snippet=%snippet,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snippet)
            });
        }

        let message = extract_error_message_multi(&bytes);
        let request_id = req_hdr_id.to_string();

        tracing::warn!(
            req_id=%req_id,
            %status,
            message=%message,
            x_request_id=%request_id,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Api {
            status,
            message,
            request_id,
        })
    }
}

// ==============================
// Helpers
// ==============================

fn extract_error_message_multi(body: &[u8]) -> String {
    // Twitter: {"errors":[{"message":"...", "detail":"...", "title":"..."}]}
    #[derive(Deserialize)]
    struct TwErrors {
        errors: Vec<TwErr>,
    }
    #[derive(Deserialize)]
    struct TwErr {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        title: String,
    }

    // Generic: {"message":"..."} or {"detail":"..."} or {"error":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(tw) = serde_json::from_slice::<TwErrors>(body) {
        if let Some(first) = tw.errors.into_iter().next() {
            for candidate in [first.message, first.detail, first.title] {
                if !candidate.is_empty() {
                    return candidate;
                }
            }
        }
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        for candidate in [m.message, m.detail, m.error] {
            if !candidate.is_empty() {
                return candidate;
            }
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    // 1) Trim outer spaces/quotes
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();

    // 2) Remove *all* ASCII whitespace (spaces, tabs, newlines, carriage returns)
    s.retain(|ch| !ch.is_ascii_whitespace());

    // 3) Ensure ASCII and no control chars
    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    // 4) Validate header value upfront for clear errors
    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}
