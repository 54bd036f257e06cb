//! Header-injection decorators.
//!
//! # Responsibilities
//! - Append a fixed header to every request
//! - Authorization shorthand
//! - Stamp a request ID once per logical request
//!
//! # Design Decisions
//! - Injection is additive: existing values for the same name are kept
//! - No retry and no error translation happens here

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use uuid::Uuid;

use crate::client::chain::Decorator;
use crate::client::sender::{BoxSender, Sender};
use crate::http::error::{SendError, SendResult};
use crate::http::{Request, Response, X_REQUEST_ID};

/// Appends a fixed header, then delegates.
pub struct HeaderSender {
    inner: BoxSender,
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderSender {
    pub fn new(inner: BoxSender, name: HeaderName, value: HeaderValue) -> Self {
        Self { inner, name, value }
    }
}

#[async_trait]
impl Sender for HeaderSender {
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        request
            .headers_mut()
            .append(self.name.clone(), self.value.clone());
        self.inner.send(request).await
    }
}

/// Decorator appending `name: value` to every request.
pub fn header(name: HeaderName, value: HeaderValue) -> Decorator {
    Decorator::new(move |inner| {
        Arc::new(HeaderSender::new(inner, name.clone(), value.clone())) as BoxSender
    })
}

/// Like [`header`], parsing the name and value first.
pub fn try_header(name: &str, value: &str) -> SendResult<Decorator> {
    let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        SendError::RequestConstruction(format!("invalid header name '{}': {}", name, e))
    })?;
    let value = HeaderValue::from_str(value).map_err(|e| {
        SendError::RequestConstruction(format!("invalid value for header '{}': {}", name, e))
    })?;
    Ok(header(name, value))
}

/// Decorator adding `Authorization: <token>` to every request.
pub fn authorization(token: &str) -> SendResult<Decorator> {
    let mut value = HeaderValue::from_str(token).map_err(|e| {
        SendError::RequestConstruction(format!("invalid authorization token: {}", e))
    })?;
    value.set_sensitive(true);
    Ok(header(AUTHORIZATION, value))
}

/// Inserts an `x-request-id` header when the request has none.
pub struct RequestIdSender {
    inner: BoxSender,
}

impl RequestIdSender {
    pub fn new(inner: BoxSender) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Sender for RequestIdSender {
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        let headers = request.headers_mut();
        if !headers.contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                headers.insert(HeaderName::from_static(X_REQUEST_ID), value);
            }
        }
        self.inner.send(request).await
    }
}

/// Decorator stamping each logical request with a UUID v4 request ID.
pub fn request_id() -> Decorator {
    Decorator::new(|inner| Arc::new(RequestIdSender::new(inner)) as BoxSender)
}
