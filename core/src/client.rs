//! Blocking HTTP client shared by every storefront scenario.
//!
//! # Design
//! `ApiClient` owns one `ureq::Agent` (the session) and a list of default
//! headers. Every verb helper funnels into `execute`, so header handling and
//! base-URL resolution live in one place. The agent is built with
//! `http_status_as_error(false)`: a 401 or 500 comes back as an `Outcome`
//! and the calling test decides what it means. Only transport failures are
//! `Err`.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::HarnessError;
use crate::http::{validate_header, HttpMethod, HttpRequest, Outcome};

/// Synchronous client for the storefront API.
///
/// Not meant to be shared between threads without external locking; create
/// one per test group and `close` it when the group is done.
pub struct ApiClient {
    base_url: String,
    default_headers: Vec<(String, String)>,
    agent: Option<ureq::Agent>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers: vec![
                ("User-Agent".to_string(), config.user_agent.clone()),
                ("Accept".to_string(), "application/json".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            agent: Some(agent),
        }
    }

    /// Default configuration pointed at `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(&Config::default().with_base_url(base_url))
    }

    /// Replace (or add) a header sent with every request. A name or value
    /// HTTP cannot carry is rejected here rather than on the first request.
    pub fn with_default_header(mut self, name: &str, value: &str) -> Result<Self, HarnessError> {
        validate_header(name, value)?;
        self.default_headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.default_headers.push((name.to_string(), value.to_string()));
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    pub fn is_closed(&self) -> bool {
        self.agent.is_none()
    }

    pub fn get(&self, path: &str) -> Result<Outcome, HarnessError> {
        self.execute(HttpRequest::new(HttpMethod::Get, path))
    }

    /// POST `body` encoded as JSON.
    pub fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Outcome, HarnessError> {
        self.execute(HttpRequest::new(HttpMethod::Post, path).json(body)?)
    }

    /// POST with no payload.
    pub fn post_empty(&self, path: &str) -> Result<Outcome, HarnessError> {
        self.execute(HttpRequest::new(HttpMethod::Post, path))
    }

    pub fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Outcome, HarnessError> {
        self.execute(HttpRequest::new(HttpMethod::Put, path).json(body)?)
    }

    pub fn put_empty(&self, path: &str) -> Result<Outcome, HarnessError> {
        self.execute(HttpRequest::new(HttpMethod::Put, path))
    }

    pub fn delete(&self, path: &str) -> Result<Outcome, HarnessError> {
        self.execute(HttpRequest::new(HttpMethod::Delete, path))
    }

    /// Issue one request and time it.
    ///
    /// `method` is matched case-insensitively against GET, POST, PUT and
    /// DELETE; anything else fails before a request is built. The clock
    /// covers the round trip and reading the body bytes, nothing else.
    pub fn measure(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<(Outcome, Duration), HarnessError> {
        let method: HttpMethod = method.parse()?;
        let mut request = HttpRequest::new(method, path);
        if let (HttpMethod::Post | HttpMethod::Put, Some(body)) = (method, body) {
            request = request.json(body)?;
        }

        let start = Instant::now();
        let outcome = self.execute(request)?;
        Ok((outcome, start.elapsed()))
    }

    /// Send `request` through the session.
    ///
    /// Headers on the request win over default headers with the same name.
    pub fn execute(&self, request: HttpRequest) -> Result<Outcome, HarnessError> {
        let agent = self.agent.as_ref().ok_or(HarnessError::SessionClosed)?;
        let url = format!("{}{}", self.base_url, request.path);
        let headers = self.merged_headers(&request.headers);

        let start = Instant::now();
        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => with_headers(agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(&url), &headers).send(body.as_bytes()),
            (HttpMethod::Post, None) => with_headers(agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(agent.put(&url), &headers).send(body.as_bytes()),
            (HttpMethod::Put, None) => with_headers(agent.put(&url), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| {
            warn!("{} {url} failed: {e}", request.method);
            HarnessError::from(e)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        // Decoded later by `Outcome::text` / `Outcome::json`.
        let body = response.body_mut().read_to_vec()?;
        debug!(
            "{} {url} -> {status} ({} bytes in {:?})",
            request.method,
            body.len(),
            start.elapsed()
        );

        Ok(Outcome { status, headers, body })
    }

    /// Release the session. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.agent.take().is_some() {
            debug!("session for {} closed", self.base_url);
        }
    }

    fn merged_headers(&self, overrides: &[(String, String)]) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .default_headers
            .iter()
            .filter(|(name, _)| !overrides.iter().any(|(k, _)| k.eq_ignore_ascii_case(name)))
            .cloned()
            .collect();
        headers.extend(overrides.iter().cloned());
        headers
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
