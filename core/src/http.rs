//! Request and outcome types exchanged with `ApiClient`.
//!
//! # Design
//! Requests and responses are plain data with owned fields. An `Outcome`
//! keeps the body as raw bytes; text and JSON are decoded only when a test asks,
//! because the storefront answers some lookups of missing resources with an
//! empty body and a 200.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HarnessError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"get"`, `"Get"` and `"GET"` all parse.
impl FromStr for HttpMethod {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(HarnessError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// A request described as plain data.
///
/// `path` is relative to the client's base URL and is appended verbatim.
/// Headers listed here replace the client's default header of the same name.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header for this request only. The name and value are checked
    /// here, so a malformed header never reaches the wire.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, HarnessError> {
        validate_header(name, value)?;
        self.headers.push((name.to_string(), value.to_string()));
        Ok(self)
    }

    /// Attach `body` serialized as JSON text.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, body: &T) -> Result<Self, HarnessError> {
        let text = serde_json::to_string(body).map_err(|e| HarnessError::Serialization(e.to_string()))?;
        self.body = Some(text);
        Ok(self)
    }
}

/// Reject header names and values HTTP cannot carry.
pub(crate) fn validate_header(name: &str, value: &str) -> Result<(), HarnessError> {
    ureq::http::HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| HarnessError::InvalidHeader(format!("{name:?}: {e}")))?;
    ureq::http::HeaderValue::from_str(value)
        .map_err(|e| HarnessError::InvalidHeader(format!("{name}: {value:?}: {e}")))?;
    Ok(())
}

/// The result of one request: status, headers and raw body bytes.
///
/// The body is kept exactly as received; decoding happens in `text` and
/// `json`, so a body in an unexpected encoding still yields its status.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First response header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<&str, HarnessError> {
        std::str::from_utf8(&self.body).map_err(|e| HarnessError::Serialization(e.to_string()))
    }

    /// The body as text, with invalid UTF-8 sequences replaced.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON.
    ///
    /// An empty (or whitespace-only) body and a literal `null` both mean
    /// "absent" and yield `Ok(None)`. Anything else that is not JSON,
    /// including a body that is not UTF-8, is a `HarnessError::Serialization`.
    pub fn json(&self) -> Result<Option<Value>, HarnessError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let value: Value =
            serde_json::from_slice(&self.body).map_err(|e| HarnessError::Serialization(e.to_string()))?;
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }

    /// Same absent-value rules as [`Outcome::json`], decoding into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<Option<T>, HarnessError> {
        match self.json()? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| HarnessError::Serialization(e.to_string())),
        }
    }
}
