//! Slow and fast demo HTTP servers.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::Query, routing::get, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::cancellation::CancellationScope;

/// How long a stopping server may drain before it is aborted.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// A running demo server.
#[derive(Debug)]
pub struct DemoServer {
    addr: SocketAddr,
    shutdown: CancellationScope,
    handle: JoinHandle<()>,
}

impl DemoServer {
    /// Base URL, e.g. `http://127.0.0.1:41234/`.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Stop accepting connections and wait briefly for in-flight requests.
    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if tokio::time::timeout(DRAIN_GRACE, &mut self.handle).await.is_err() {
            tracing::debug!(address = %self.addr, "Demo server did not drain in time, aborting");
            self.handle.abort();
        }
    }
}

/// Router whose `/` answers `Slow Response` after `delay`.
pub fn slow_router(delay: Duration) -> Router {
    Router::new()
        .route(
            "/",
            get(move || async move {
                tokio::time::sleep(delay).await;
                "Slow Response"
            }),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct FastQuery {
    error: Option<String>,
}

async fn fast_handler(Query(query): Query<FastQuery>) -> &'static str {
    if query.error.as_deref() == Some("true") {
        "error"
    } else {
        "ok"
    }
}

/// Router whose `/` answers `error` when `?error=true`, otherwise `ok`.
pub fn fast_router() -> Router {
    Router::new()
        .route("/", get(fast_handler))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve the slow endpoint until `parent` (or the server itself) is shut down.
pub async fn spawn_slow(
    bind_address: &str,
    delay: Duration,
    parent: &CancellationScope,
) -> std::io::Result<DemoServer> {
    serve("slow", slow_router(delay), bind_address, parent).await
}

/// Bind and serve the fast endpoint until `parent` (or the server itself) is shut down.
pub async fn spawn_fast(
    bind_address: &str,
    parent: &CancellationScope,
) -> std::io::Result<DemoServer> {
    serve("fast", fast_router(), bind_address, parent).await
}

async fn serve(
    name: &'static str,
    router: Router,
    bind_address: &str,
    parent: &CancellationScope,
) -> std::io::Result<DemoServer> {
    let listener = TcpListener::bind(bind_address).await?;
    let addr = listener.local_addr()?;
    let shutdown = parent.child();

    tracing::info!(server = name, address = %addr, "Demo server listening");

    let signal = shutdown.clone();
    let handle = tokio::spawn(async move {
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await;
        if let Err(e) = result {
            tracing::error!(server = name, error = %e, "Demo server failed");
        }
        tracing::debug!(server = name, "Demo server stopped");
    });

    Ok(DemoServer {
        addr,
        shutdown,
        handle,
    })
}
