//! Outbound request description.
//!
//! # Responsibilities
//! - Validate method and URL at construction time
//! - Carry headers, an optional buffered body and the cancellation scope
//! - Convert into a wire request for the transport
//!
//! # Design Decisions
//! - Headers are appended, never replaced, so decorators stay additive
//! - The body is `Bytes`, so retries resend it without copying
//! - Every request has a scope; a fresh one is created if none is attached

use axum::body::{Body, Bytes};
use axum::http::{self, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use url::Url;

use crate::cancellation::CancellationScope;
use crate::http::error::{SendError, SendResult};

/// Header used to correlate a request across retries and logs.
pub const X_REQUEST_ID: &str = "x-request-id";

/// An outbound HTTP request bound to a cancellation scope.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    scope: CancellationScope,
}

impl Request {
    /// Create a request for the given method and absolute `http` URL.
    ///
    /// The base transport speaks plain HTTP only, so any other scheme
    /// (including `https`) is rejected here rather than failing at send time.
    pub fn new(method: Method, url: &str) -> SendResult<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            SendError::RequestConstruction(format!("invalid URL '{}': {}", url, e))
        })?;

        match parsed.scheme() {
            "http" => {}
            other => {
                return Err(SendError::RequestConstruction(format!(
                    "unsupported URL scheme '{}' in '{}'",
                    other, url
                )))
            }
        }

        Ok(Self {
            method,
            url: parsed,
            headers: HeaderMap::new(),
            body: None,
            scope: CancellationScope::new(),
        })
    }

    /// Create a request from a textual method such as `"GET"`.
    pub fn parse(method: &str, url: &str) -> SendResult<Self> {
        let method = Method::from_bytes(method.as_bytes()).map_err(|e| {
            SendError::RequestConstruction(format!("invalid method '{}': {}", method, e))
        })?;
        Self::new(method, url)
    }

    /// Shorthand for a `GET` request.
    pub fn get(url: &str) -> SendResult<Self> {
        Self::new(Method::GET, url)
    }

    /// Append a query parameter. The value is percent-encoded as needed.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    /// Append a header value, keeping any existing values for the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Attach a request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Bind the request to a cancellation scope.
    pub fn with_scope(mut self, scope: CancellationScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn scope(&self) -> &CancellationScope {
        &self.scope
    }

    /// Build the wire request for one attempt. The request itself is left intact.
    pub fn to_http(&self) -> SendResult<http::Request<Body>> {
        let uri: Uri = self.url.as_str().parse().map_err(|e| {
            SendError::RequestConstruction(format!("invalid URI '{}': {}", self.url, e))
        })?;

        let mut builder = http::Request::builder()
            .method(self.method.clone())
            .uri(uri);

        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let body = match &self.body {
            Some(bytes) => Body::from(bytes.clone()),
            None => Body::empty(),
        };

        builder
            .body(body)
            .map_err(|e| SendError::RequestConstruction(e.to_string()))
    }
}
