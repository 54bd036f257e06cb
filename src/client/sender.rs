//! The `Sender` capability.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::http::error::SendResult;
use crate::http::{Request, Response};

/// Turns a request into a response or an error.
///
/// Implementations must honour the request's cancellation scope at every
/// suspension point and report it as `SendError::Cancelled`.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, request: &mut Request) -> SendResult<Response>;
}

/// Shared, type-erased sender. This is what decorators wrap.
pub type BoxSender = Arc<dyn Sender>;

#[async_trait]
impl<S: Sender + ?Sized> Sender for Arc<S> {
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        (**self).send(request).await
    }
}

/// Future returned by a function-backed sender. Borrows the request it sends.
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = SendResult<Response>> + Send + 'a>>;

/// Adapter lifting an async function into a [`Sender`].
///
/// The function borrows the caller's request mutably, so header changes it
/// makes are visible to every outer layer.
pub struct SenderFn<F> {
    f: F,
}

/// Wrap `f` so it can be used anywhere a [`Sender`] is expected.
pub fn sender_fn<F>(f: F) -> SenderFn<F>
where
    F: for<'a> Fn(&'a mut Request) -> SendFuture<'a> + Send + Sync,
{
    SenderFn { f }
}

#[async_trait]
impl<F> Sender for SenderFn<F>
where
    F: for<'a> Fn(&'a mut Request) -> SendFuture<'a> + Send + Sync,
{
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        (self.f)(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::SendError;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn sender_fn_is_a_sender() {
        let sender: BoxSender = Arc::new(sender_fn(|req| {
            Box::pin(async move { SendResult::Ok(Response::ok(req.url().path().to_string())) })
        }));

        let mut request = Request::get("http://localhost/hello").unwrap();
        let response = sender.send(&mut request).await.unwrap();
        assert_eq!(response.text(), "/hello");
    }

    #[tokio::test]
    async fn sender_fn_propagates_errors() {
        let sender = sender_fn(|_req| {
            Box::pin(async move { SendResult::Err(SendError::Transport("boom".into())) })
        });

        let mut request = Request::get("http://localhost/").unwrap();
        assert_eq!(
            sender.send(&mut request).await.unwrap_err(),
            SendError::Transport("boom".into())
        );
    }

    #[tokio::test]
    async fn sender_fn_mutates_the_callers_request() {
        let sender = sender_fn(|req| {
            Box::pin(async move {
                req.headers_mut()
                    .append("x-seen", HeaderValue::from_static("1"));
                SendResult::Ok(Response::ok("ok"))
            })
        });

        let mut request = Request::get("http://localhost/").unwrap();
        sender.send(&mut request).await.unwrap();
        assert_eq!(request.headers()["x-seen"], "1");
    }
}
